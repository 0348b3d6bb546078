//! Turn state machine for one game of tic-tac-toe.
//!
//! The engine alternates turns between the first participant (who plays X)
//! and the second participant (who plays O), rejects moves onto occupied
//! squares, and classifies the board after every move. `Won` and `Draw` are
//! absorbing: once reached, further moves have no effect.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::rules::{self, Line};
use crate::{Board, Player, Position, Square};

/// Whose turn it is, by seat rather than by mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Turn {
    /// The first participant (X).
    #[display("first")]
    First,
    /// The second participant (O).
    #[display("second")]
    Second,
}

impl Turn {
    /// Mark placed by the participant holding this turn.
    pub fn mark(self) -> Player {
        match self {
            Turn::First => Player::X,
            Turn::Second => Player::O,
        }
    }

    /// The other seat.
    pub fn flip(self) -> Self {
        match self {
            Turn::First => Turn::Second,
            Turn::Second => Turn::First,
        }
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// A player owns a full line.
    Won {
        /// Owner of the winning line.
        winner: Player,
        /// The line that won.
        line: Line,
    },
    /// All nine squares are filled and nobody won.
    Draw,
}

impl GameStatus {
    /// True for `Won` and `Draw`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// What happened to a requested move.
///
/// Rejected moves are ordinary outcomes rather than errors: the board is left
/// untouched and the same player keeps the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The mark was placed and the turn passed.
    Placed {
        /// Mark that was placed.
        mark: Player,
        /// Where it was placed.
        position: Position,
    },
    /// The square already held a mark.
    Occupied,
    /// The game had already ended.
    GameOver,
}

/// Tic-tac-toe game engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Engine {
    board: Board,
    turn: Turn,
    status: GameStatus,
    history: Vec<Position>,
}

impl Engine {
    /// Creates a new game with an empty board and the first player to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Turn::First,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns whose turn it is.
    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// Returns the game status as of the last evaluation.
    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    /// Returns the positions played, in order.
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// True once the game is won or drawn.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Places the active player's mark at `pos` and passes the turn.
    ///
    /// Does nothing if the square is occupied or the game is over. The board
    /// is re-evaluated after a successful placement, so a winning or filling
    /// move makes the engine terminal immediately.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn attempt_move(&mut self, pos: Position) -> MoveOutcome {
        if self.status.is_terminal() {
            debug!("Move ignored, game is over");
            return MoveOutcome::GameOver;
        }
        if !self.board.is_empty(pos) {
            debug!(position = %pos, "Move ignored, square occupied");
            return MoveOutcome::Occupied;
        }

        let mark = self.turn.mark();
        self.board.set(pos, Square::Occupied(mark));
        self.history.push(pos);
        self.turn = self.turn.flip();
        debug!(mark = %mark, position = %pos, "Mark placed");

        self.evaluate();
        MoveOutcome::Placed {
            mark,
            position: pos,
        }
    }

    /// Scans rows, columns and diagonals for a full line, then checks for a
    /// full board.
    ///
    /// Evaluation is idempotent. A terminal status is never revised.
    #[instrument(skip(self))]
    pub fn evaluate(&mut self) -> &GameStatus {
        if self.status.is_terminal() {
            return &self.status;
        }

        if let Some((winner, line)) = rules::winning_line(&self.board) {
            info!(winner = %winner, line = %line, moves = self.history.len(), "Game won");
            self.status = GameStatus::Won { winner, line };
        } else if rules::is_full(&self.board) {
            info!("Game drawn");
            self.status = GameStatus::Draw;
        }

        &self.status
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_engine_first_to_move() {
        let engine = Engine::new();
        assert_eq!(engine.turn(), Turn::First);
        assert_eq!(*engine.status(), GameStatus::InProgress);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_turn_alternates() {
        let mut engine = Engine::new();
        engine.attempt_move(Position::Center);
        assert_eq!(engine.turn(), Turn::Second);
        engine.attempt_move(Position::TopLeft);
        assert_eq!(engine.turn(), Turn::First);
        assert_eq!(engine.board().get(Position::TopLeft), Square::Occupied(Player::O));
    }

    #[test]
    fn test_occupied_square_is_noop() {
        let mut engine = Engine::new();
        engine.attempt_move(Position::Center);
        let before = engine.clone();
        assert_eq!(engine.attempt_move(Position::Center), MoveOutcome::Occupied);
        assert_eq!(engine, before);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let mut engine = Engine::new();
        engine.attempt_move(Position::Center);
        let first = *engine.evaluate();
        let second = *engine.evaluate();
        assert_eq!(first, second);
        assert_eq!(first, GameStatus::InProgress);
    }
}
