//! Key mapping for the in-game screen.

use crossterm::event::KeyCode;
use wager_tictactoe::Position;

use crate::InputEvent;

/// Maps a key to a session input event.
///
/// Arrows and `hjkl` move the cursor, Enter and Space place a mark, and
/// digits 1-9 place directly on the numbered square. Everything else,
/// including Esc, is ignored: a match runs until the board is decided.
pub fn key_to_event(key: KeyCode) -> Option<InputEvent> {
    match key {
        KeyCode::Up | KeyCode::Char('k') => Some(InputEvent::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(InputEvent::Down),
        KeyCode::Left | KeyCode::Char('h') => Some(InputEvent::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(InputEvent::Right),
        KeyCode::Enter | KeyCode::Char(' ') => Some(InputEvent::Confirm),
        KeyCode::Char(c) => c
            .to_digit(10)
            .filter(|d| (1..=9).contains(d))
            .and_then(|d| Position::from_index(d as usize - 1))
            .map(InputEvent::Place),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_map_to_cursor_moves() {
        assert_eq!(key_to_event(KeyCode::Up), Some(InputEvent::Up));
        assert_eq!(key_to_event(KeyCode::Char('l')), Some(InputEvent::Right));
    }

    #[test]
    fn test_digits_place_directly() {
        assert_eq!(
            key_to_event(KeyCode::Char('1')),
            Some(InputEvent::Place(Position::TopLeft))
        );
        assert_eq!(
            key_to_event(KeyCode::Char('9')),
            Some(InputEvent::Place(Position::BottomRight))
        );
        assert_eq!(key_to_event(KeyCode::Char('0')), None);
    }

    #[test]
    fn test_escape_ignored() {
        assert_eq!(key_to_event(KeyCode::Esc), None);
        assert_eq!(key_to_event(KeyCode::Char('q')), None);
    }
}
