use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::game::{Difficulty, EndReason};
use crate::input::is_ctrl_c;
use crate::session::SessionOutcome;
use crate::term::TermManager;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    Play(Difficulty),
    Exit,
}

pub fn choice_for_key(ev: &KeyEvent) -> Option<MenuChoice> {
    if is_ctrl_c(ev) {
        return Some(MenuChoice::Exit);
    }

    match ev.code {
        KeyCode::Char('1') => Some(MenuChoice::Play(Difficulty::Easy)),
        KeyCode::Char('2') => Some(MenuChoice::Play(Difficulty::Hard)),
        KeyCode::Char('3') | KeyCode::Char('q') | KeyCode::Esc => Some(MenuChoice::Exit),
        _ => None,
    }
}

pub fn menu_lines(best_score: u32) -> Vec<String> {
    vec![
        "S N A K E".to_string(),
        String::new(),
        "1. Easy".to_string(),
        "2. Hard (a wall grows with every meal)".to_string(),
        "3. Exit".to_string(),
        String::new(),
        format!("Best score: {}", best_score),
        String::new(),
        "Arrow keys or WASD to move, Q or Esc to quit".to_string(),
    ]
}

pub fn game_over_lines(outcome: &SessionOutcome, best_score: u32) -> Vec<String> {
    let title = match outcome.reason {
        EndReason::BoardFull => "You filled the board!",
        EndReason::Quit => "Game abandoned",
        _ => "Game over!",
    };

    let mut lines = vec![
        title.to_string(),
        format!("Score: {}", outcome.score),
        format!("Best score: {}", best_score),
    ];
    if outcome.new_best {
        lines.push("New record!".to_string());
    }
    lines.push(String::new());
    lines.push("Press any key for the menu,".to_string());
    lines.push("or CTRL+C to quit.".to_string());
    lines
}

/// Blocks until the player picks something from the main menu.
pub fn show_menu(term: &mut TermManager, best_score: u32) -> Result<MenuChoice> {
    term.clear()?;
    show_lines(term, &menu_lines(best_score))?;

    loop {
        if let Some(choice) = choice_for_key(&term.read_key_blocking()?) {
            term.hide_message()?;
            return Ok(choice);
        }
    }
}

/// Returns false when the player asked to leave the program.
pub fn show_game_over(term: &mut TermManager, outcome: &SessionOutcome, best_score: u32) -> Result<bool> {
    show_lines(term, &game_over_lines(outcome, best_score))?;
    let key = term.read_key_blocking()?;
    term.hide_message()?;
    Ok(!is_ctrl_c(&key))
}

fn show_lines(term: &mut TermManager, lines: &[String]) -> Result<()> {
    let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
    term.show_message(&lines)
}
