use crate::{Coords, TermInt, ScreenPos};
use crate::game::{Snapshot, Status, EndReason};
use crate::grid::Cell;
use crate::input::{pending_command, Command};
use crate::session::Frontend;
use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

const SNAKE_BODY_CHAR: char = '█';
const FOOD_CHAR: char = '*';
const WALL_CHAR: char = '#';
const DEAD_SNAKE_CHAR: char = 'X';

type Glyph = (char, Color);

const BLANK: Glyph = (' ', Color::Reset);

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    screen: Vec<Glyph>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: ScreenPos,
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size().context("Error reading terminal size")?;
        let stdout = stdout();
        let screen = vec![BLANK; width as usize * height as usize];
        Ok(TermManager { width, height, stdout, screen, current_msg: None })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        self.set_raw_mode(true)?;
        self.set_cursor_visibility(false)?;
        self.set_cursor_blink(false)
    }

    pub fn restore(&mut self) -> Result<()> {
        self.set_raw_mode(false)?;
        self.set_cursor_visibility(true)?;
        self.set_cursor_blink(true)?;
        execute!(self.stdout, style::ResetColor, LeaveAlternateScreen).context("Error leaving alt screen")
    }

    pub fn fits(&self, width: usize, height: usize) -> bool {
        width <= self.width as usize && height <= self.height as usize
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    pub fn read_key_events_queue(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(0))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let longest = lines.iter().map(|x| x.chars().count()).max().unwrap_or(0);
        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (longest + 2) as TermInt;
        let center = (self.width / 2, self.height / 2);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        // Print the top and bottom empty lines
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, *y), BLANK)?;
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as TermInt, y), (ch, Color::Reset))?;
            }
        }

        self.current_msg = Some(Message::new(msg_width, msg_height, top_left));
        self.flush()
    }

    pub fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };
        let top_left = msg.top_left();

        // Restore the content from the screen buffer
        for y_diff in 0..msg.height() {
            for x_diff in 0..msg.width() {
                let (x, y) = (top_left.0 + x_diff, top_left.1 + y_diff);
                if let Some(glyph) = self.buffered(x, y) {
                    self.print_at_no_save((x, y), glyph)?;
                }
            }
        }

        self.flush()
    }

    /// Queues a glyph unless the screen already shows it.
    pub fn print_at(&mut self, pos: ScreenPos, glyph: Glyph) -> Result<()> {
        let idx = match self.buffer_index(pos.0, pos.1) {
            Some(idx) => idx,
            None => return Ok(()),
        };

        if self.screen[idx] != glyph {
            self.print_at_no_save(pos, glyph)?;
            self.screen[idx] = glyph;
        }
        Ok(())
    }

    pub fn print_str_at(&mut self, pos: ScreenPos, text: &str) -> Result<()> {
        for (i, ch) in text.chars().enumerate() {
            self.print_at((pos.0 + i as TermInt, pos.1), (ch, Color::Reset))?;
        }
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, style::ResetColor, terminal::Clear(ClearType::All)).context("Error clearing")?;
        self.screen = vec![BLANK; self.width as usize * self.height as usize];
        self.current_msg = None;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("Error flushing")
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn print_at_no_save(&mut self, pos: ScreenPos, (ch, color): Glyph) -> Result<()> {
        // To be used for printing messages, where we don't wanna overwrite our
        // local buffer to restore it when the message is hidden
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::SetForegroundColor(color), style::Print(ch))?;
        Ok(())
    }

    fn buffer_index(&self, x: TermInt, y: TermInt) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.width as usize * y as usize + x as usize)
    }

    fn buffered(&self, x: TermInt, y: TermInt) -> Option<Glyph> {
        self.buffer_index(x, y).map(|i| self.screen[i])
    }

    /// Top-left screen cell of a centred `width` x `height` area.
    fn origin(&self, width: usize, height: usize) -> ScreenPos {
        let x = (self.width as usize).saturating_sub(width) / 2;
        let y = (self.height as usize).saturating_sub(height + 1) / 2;
        (x as TermInt, y as TermInt)
    }

    fn set_raw_mode(&self, option: bool) -> Result<()> {
        let res = if option {
            terminal::enable_raw_mode()
        } else {
            terminal::disable_raw_mode()
        };

        res.context("Error setting raw mode")
    }

    fn set_cursor_blink(&mut self, option: bool) -> Result<()> {
        let res = if option {
            execute!(self.stdout, cursor::EnableBlinking)
        } else {
            execute!(self.stdout, cursor::DisableBlinking)
        };

        res.context("Error setting cursor blink")
    }

    fn set_cursor_visibility(&mut self, option: bool) -> Result<()> {
        let res = if option {
            execute!(self.stdout, cursor::Show)
        } else {
            execute!(self.stdout, cursor::Hide)
        };

        res.context("Error setting cursor visibility")
    }
}

impl Frontend for TermManager {
    fn poll_command(&mut self) -> Result<Option<Command>> {
        Ok(pending_command(&self.read_key_events_queue()?))
    }

    fn draw(&mut self, snapshot: &Snapshot<'_>, best_score: u32) -> Result<()> {
        let (grid_w, grid_h) = (snapshot.grid.width(), snapshot.grid.height());
        let origin = self.origin(grid_w, grid_h);

        for y in 0..grid_h {
            for x in 0..grid_w {
                let glyph = glyph_at(snapshot, (x as i32, y as i32));
                self.print_at((origin.0 + x as TermInt, origin.1 + y as TermInt), glyph)?;
            }
        }

        let status = format!(
            "Score: {}   Best: {}   {:?}",
            snapshot.score,
            best_score.max(snapshot.score),
            snapshot.difficulty
        );
        let status = format!("{:<width$}", status, width = grid_w);
        self.print_str_at((origin.0, origin.1 + grid_h as TermInt), &status)?;

        self.flush()
    }
}

/// What a grid cell looks like in a frame: snake over food over terrain.
fn glyph_at(snapshot: &Snapshot<'_>, pos: Coords) -> Glyph {
    let dead = matches!(snapshot.status, Status::GameOver(reason) if reason != EndReason::Quit);

    match snapshot.snake.body().iter().position(|seg| *seg == pos) {
        Some(_) if dead => return (DEAD_SNAKE_CHAR, Color::Red),
        Some(0) => return (snapshot.snake.head_char(), Color::Green),
        Some(_) => return (SNAKE_BODY_CHAR, Color::Green),
        None => {}
    }

    if pos == snapshot.food {
        return (FOOD_CHAR, Color::Red);
    }

    match snapshot.grid.cell_at(pos) {
        Some(Cell::Wall) => (WALL_CHAR, Color::Blue),
        Some(Cell::Food) => (FOOD_CHAR, Color::Red),
        _ => BLANK,
    }
}

impl Message {
    pub fn new(width: TermInt, height: TermInt, top_left: ScreenPos) -> Self {
        Message { width, height, top_left }
    }

    pub fn width(&self) -> TermInt {
        self.width
    }

    pub fn height(&self) -> TermInt {
        self.height
    }

    pub fn top_left(&self) -> ScreenPos {
        self.top_left
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Difficulty, Game, GameConfig};
    use crate::snake::{Direction, Snake};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn game() -> Game<StdRng> {
        let mut game = Game::new(&GameConfig::default(), Difficulty::Easy, StdRng::seed_from_u64(4)).unwrap();
        game.move_food((30, 5));
        game
    }

    #[test]
    fn glyphs_follow_cell_tags() {
        let game = game();
        let snapshot = game.snapshot();

        assert_eq!(glyph_at(&snapshot, (20, 10)), ('>', Color::Green));
        assert_eq!(glyph_at(&snapshot, (19, 10)), (SNAKE_BODY_CHAR, Color::Green));
        assert_eq!(glyph_at(&snapshot, (30, 5)), (FOOD_CHAR, Color::Red));
        assert_eq!(glyph_at(&snapshot, (0, 0)), (WALL_CHAR, Color::Blue));
        assert_eq!(glyph_at(&snapshot, (5, 5)), BLANK);
    }

    #[test]
    fn crashed_snake_is_crossed_out() {
        let mut game = game();
        game.replace_snake(Snake::new((1, 10), 3, Direction::Left));
        game.tick(None);
        let snapshot = game.snapshot();

        assert_eq!(glyph_at(&snapshot, (1, 10)), (DEAD_SNAKE_CHAR, Color::Red));
        assert_eq!(glyph_at(&snapshot, (0, 10)), (DEAD_SNAKE_CHAR, Color::Red));
    }
}
