use std::thread::sleep;
use std::time::Duration;

use anyhow::Result;
use log::{info, warn};
use rand::Rng;

use crate::game::{EndReason, Game, Snapshot, TickEvent};
use crate::input::Command;
use crate::score::ScoreStore;

/// The terminal side of a session: where key presses come from and where
/// frames go.
pub trait Frontend {
    /// Must not block when nothing was pressed.
    fn poll_command(&mut self) -> Result<Option<Command>>;

    fn draw(&mut self, snapshot: &Snapshot<'_>, best_score: u32) -> Result<()>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SessionOutcome {
    pub score: u32,
    pub reason: EndReason,
    pub new_best: bool,
}

/// Ticks `game` until it ends, then offers the final score to `store`.
pub fn run_session<R: Rng, F: Frontend>(
    game: &mut Game<R>,
    frontend: &mut F,
    store: &ScoreStore,
    best_score: u32,
    tick_interval: Duration,
) -> Result<SessionOutcome> {
    frontend.draw(&game.snapshot(), best_score)?;

    let reason = loop {
        sleep(tick_interval);

        let command = frontend.poll_command()?;
        let event = game.tick(command);
        frontend.draw(&game.snapshot(), best_score)?;

        if let TickEvent::Ended(reason) = event {
            break reason;
        }
    };

    let score = game.score();
    let new_best = match store.submit(score) {
        Ok(updated) => updated,
        Err(e) => {
            warn!("Best score not saved to {}: {}", store.path().display(), e);
            false
        }
    };

    info!("Session finished: {:?}, score {}", reason, score);
    Ok(SessionOutcome { score, reason, new_best })
}
