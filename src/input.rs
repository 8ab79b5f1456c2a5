use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::Direction::{self, *};

/// Logical input the game understands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Quit,
}

pub fn command_for_key(ev: &KeyEvent) -> Option<Command> {
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Command::Turn(Up)),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Command::Turn(Left)),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Command::Turn(Down)),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Command::Turn(Right)),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// Collapses every key pressed during one tick into a single command:
/// quitting beats turning, and the last turn wins.
pub fn pending_command(events: &[KeyEvent]) -> Option<Command> {
    let commands = events.iter().filter_map(command_for_key);

    commands.fold(None, |acc, cmd| match (acc, cmd) {
        (Some(Command::Quit), _) => acc,
        _ => Some(cmd),
    })
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
