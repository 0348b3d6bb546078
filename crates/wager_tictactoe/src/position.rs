//! Board positions and the keyboard cursor.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A position on the tic-tac-toe board (0-8, row-major).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Position {
    /// Top-left (position 0)
    TopLeft,
    /// Top-center (position 1)
    TopCenter,
    /// Top-right (position 2)
    TopRight,
    /// Middle-left (position 3)
    MiddleLeft,
    /// Center (position 4)
    Center,
    /// Middle-right (position 5)
    MiddleRight,
    /// Bottom-left (position 6)
    BottomLeft,
    /// Bottom-center (position 7)
    BottomCenter,
    /// Bottom-right (position 8)
    BottomRight,
}

impl Position {
    /// All 9 positions.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Get label for this position (for display).
    pub fn label(&self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Converts position to board index (0-8).
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Creates position from board index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Creates position from a zero-based row and column.
    pub fn from_row_col(row: usize, col: usize) -> Option<Self> {
        if row < 3 && col < 3 {
            Self::from_index(row * 3 + col)
        } else {
            None
        }
    }

    /// Zero-based row of this position.
    pub fn row(self) -> usize {
        self.to_index() / 3
    }

    /// Zero-based column of this position.
    pub fn col(self) -> usize {
        self.to_index() % 3
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Keyboard cursor over the board.
///
/// The cursor always lies within `[0,2] x [0,2]`. Moves that would leave the
/// grid are rejected and leave the cursor where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters)]
pub struct Cursor {
    row: usize,
    col: usize,
}

impl Cursor {
    /// Creates a cursor at the top-left square.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cursor resting on the given position.
    pub fn at(pos: Position) -> Self {
        Self {
            row: pos.row(),
            col: pos.col(),
        }
    }

    /// Moves the cursor by a row/column offset.
    ///
    /// Returns `false` and leaves the cursor unchanged when the target is
    /// off the board.
    #[instrument(skip(self), fields(row = self.row, col = self.col))]
    pub fn shift(&mut self, d_row: isize, d_col: isize) -> bool {
        let row = self.row as isize + d_row;
        let col = self.col as isize + d_col;
        if !(0..3).contains(&row) || !(0..3).contains(&col) {
            debug!(row, col, "Cursor move rejected");
            return false;
        }
        self.row = row as usize;
        self.col = col as usize;
        true
    }

    /// The board position under the cursor.
    pub fn position(&self) -> Position {
        // row and col are kept in range by `shift`
        Position::ALL[self.row * 3 + self.col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_row_col_round_trip() {
        for pos in Position::iter() {
            assert_eq!(Position::from_row_col(pos.row(), pos.col()), Some(pos));
        }
        assert_eq!(Position::from_row_col(3, 0), None);
        assert_eq!(Position::from_index(9), None);
    }

    #[test]
    fn test_cursor_rejects_row_minus_one() {
        let mut cursor = Cursor::new();
        assert!(!cursor.shift(-1, 0));
        assert_eq!(cursor.position(), Position::TopLeft);
    }

    #[test]
    fn test_cursor_rejects_past_right_edge() {
        let mut cursor = Cursor::at(Position::MiddleRight);
        assert!(!cursor.shift(0, 1));
        assert_eq!(cursor.position(), Position::MiddleRight);
    }

    #[test]
    fn test_cursor_moves_within_grid() {
        let mut cursor = Cursor::new();
        assert!(cursor.shift(1, 0));
        assert!(cursor.shift(0, 1));
        assert_eq!(cursor.position(), Position::Center);
        assert_eq!(*cursor.row(), 1);
        assert_eq!(*cursor.col(), 1);
    }
}
