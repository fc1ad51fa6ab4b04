//! Key mapping from terminal events to game actions.

use crate::types::{Direction, GameAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
///
/// Arrows and `hjkl` move the cursor, `wasd` swap the piece under the cursor.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => {
            Some(GameAction::MoveCursor(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => {
            Some(GameAction::MoveCursor(Direction::Right))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => {
            Some(GameAction::MoveCursor(Direction::Down))
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => {
            Some(GameAction::MoveCursor(Direction::Up))
        }

        // Swaps
        KeyCode::Char('a') | KeyCode::Char('A') => Some(GameAction::Swap(Direction::Left)),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(GameAction::Swap(Direction::Right)),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(GameAction::Swap(Direction::Down)),
        KeyCode::Char('w') | KeyCode::Char('W') => Some(GameAction::Swap(Direction::Up)),

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
