//! Pure tic-tac-toe game logic.
//!
//! This crate holds the deterministic core of the game: the 3x3 board, the
//! keyboard cursor, the win/draw rules and the turn state machine
//! ([`Engine`]). It performs no I/O; rendering and input belong to callers.
//!
//! # Example
//!
//! ```
//! use wager_tictactoe::{Engine, GameStatus, Player, Position};
//!
//! let mut engine = Engine::new();
//! for pos in [
//!     Position::TopLeft,
//!     Position::Center,
//!     Position::TopCenter,
//!     Position::MiddleLeft,
//!     Position::TopRight,
//! ] {
//!     engine.attempt_move(pos);
//! }
//! assert!(matches!(engine.status(), GameStatus::Won { winner: Player::X, .. }));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod position;
pub mod rules;
mod types;

pub use engine::{Engine, GameStatus, MoveOutcome, Turn};
pub use position::{Cursor, Position};
pub use rules::Line;
pub use types::{Board, Player, Square};
