//! Win detection logic for tic-tac-toe.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{Board, Player, Position, Square};

/// A run of three squares that can win the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Line {
    /// Horizontal run on the given row (0-2).
    #[display("row {_0}")]
    Row(usize),
    /// Vertical run on the given column (0-2).
    #[display("column {_0}")]
    Column(usize),
    /// Top-left to bottom-right.
    #[display("diagonal")]
    Diagonal,
    /// Top-right to bottom-left.
    #[display("anti-diagonal")]
    AntiDiagonal,
}

impl Line {
    /// All 8 lines in scan order: rows, columns, diagonals.
    pub const ALL: [Line; 8] = [
        Line::Row(0),
        Line::Row(1),
        Line::Row(2),
        Line::Column(0),
        Line::Column(1),
        Line::Column(2),
        Line::Diagonal,
        Line::AntiDiagonal,
    ];

    /// The three positions making up this line.
    ///
    /// Returns `None` for a row or column index outside 0-2.
    pub fn positions(self) -> Option<[Position; 3]> {
        let at = Position::from_row_col;
        match self {
            Line::Row(r) => Some([at(r, 0)?, at(r, 1)?, at(r, 2)?]),
            Line::Column(c) => Some([at(0, c)?, at(1, c)?, at(2, c)?]),
            Line::Diagonal => Some([Position::TopLeft, Position::Center, Position::BottomRight]),
            Line::AntiDiagonal => Some([
                Position::TopRight,
                Position::Center,
                Position::BottomLeft,
            ]),
        }
    }
}

/// Finds the first line fully owned by one player, scanning rows, then
/// columns, then diagonals.
#[instrument(skip(board))]
pub fn winning_line(board: &Board) -> Option<(Player, Line)> {
    Line::ALL.into_iter().find_map(|line| {
        let [a, b, c] = line.positions()?;
        match board.get(a) {
            Square::Occupied(p) if board.get(b) == board.get(a) && board.get(c) == board.get(a) => {
                Some((p, line))
            }
            _ => None,
        }
    })
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(player)` if the player has three in a row,
/// `None` otherwise.
pub fn check_winner(board: &Board) -> Option<Player> {
    winning_line(board).map(|(player, _)| player)
}
