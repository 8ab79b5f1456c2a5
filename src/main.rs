mod error;
mod game;
mod grid;
mod input;
mod menu;
mod placement;
mod score;
mod session;
mod snake;
mod term;

use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::game::{Game, GameConfig};
use crate::menu::MenuChoice;
use crate::score::ScoreStore;
use crate::term::TermManager;

pub type TermInt = u16;
pub type ScreenPos = (TermInt, TermInt);
/// Grid position; signed so a head that left the grid is still representable.
pub type Coords = (i32, i32);

#[derive(Parser)]
#[command(name = "wallsnake")]
#[command(version, about = "Terminal snake with an optional wall-growing hard mode")]
struct Cli {
    /// File holding the best score
    #[arg(long, default_value = "bestScore.txt")]
    score_file: PathBuf,

    /// Delay between game ticks, in milliseconds
    #[arg(long, default_value = "100")]
    tick_ms: u64,

    /// Seed for food and wall placement
    #[arg(long)]
    seed: Option<u64>,

    /// Where log output goes (the terminal is busy with the game)
    #[arg(long, default_value = "snake.log")]
    log_file: PathBuf,

    /// Log debug events such as every food and wall placement
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = GameConfig::default();
    let store = ScoreStore::new(&cli.score_file);
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!("Starting, score file {}, tick {}ms, seed {:?}", store.path().display(), cli.tick_ms, cli.seed);

    let mut term = TermManager::new()?;
    // One extra row for the score line
    if !term.fits(config.width, config.height + 1) {
        bail!("Terminal too small: need at least {}x{} characters", config.width, config.height + 1);
    }

    term.setup()?;
    let result = play(&mut term, &store, &mut rng, &config, Duration::from_millis(cli.tick_ms));
    if let Err(e) = term.restore() {
        warn!("Terminal not restored cleanly: {:#}", e);
    }

    result
}

fn play(
    term: &mut TermManager,
    store: &ScoreStore,
    rng: &mut StdRng,
    config: &GameConfig,
    tick_interval: Duration,
) -> Result<()> {
    let mut best_score = store.load();

    loop {
        let difficulty = match menu::show_menu(term, best_score)? {
            MenuChoice::Play(difficulty) => difficulty,
            MenuChoice::Exit => return Ok(()),
        };

        term.clear()?;
        let mut game = Game::new(config, difficulty, &mut *rng)?;
        let outcome = session::run_session(&mut game, term, store, best_score, tick_interval)?;
        best_score = best_score.max(outcome.score);

        if !menu::show_game_over(term, &outcome, best_score)? {
            return Ok(());
        }
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let level = if cli.debug { LevelFilter::Debug } else { LevelFilter::Info };
    let file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?;

    WriteLogger::init(level, Config::default(), file).map_err(|e| anyhow!("Failed to initialize logger: {}", e))
}
