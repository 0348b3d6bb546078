//! Wager Games library - tic-tac-toe with persistent wager-based ratings.
//!
//! # Architecture
//!
//! - **Accounts**: players keyed by username, each with a rating and a tier
//! - **Ledger**: the single source of truth for accounts and match history;
//!   settles finished matches into both participants' ratings exactly once
//! - **Store**: wholesale persistence of accounts and history (JSON files)
//! - **Session**: drives one match from empty board to settlement
//! - **Lobby**: multi-screen terminal UI around all of the above
//!
//! # Example
//!
//! ```
//! use wager_games::{GameKind, Ledger, LedgerConfig, MatchResult, Tier};
//!
//! # fn example() -> Result<(), wager_games::LedgerError> {
//! let mut ledger = Ledger::new(LedgerConfig::default());
//! ledger.create_account("alice", Tier::Basic)?;
//! ledger.create_account("bob", Tier::Basic)?;
//!
//! let mut record = ledger.open_match("alice", "bob", 10, GameKind::Ranked)?;
//! record.resolve(MatchResult::Win, 5);
//! ledger.settle(&record)?;
//!
//! assert_eq!(*ledger.account("alice").unwrap().rating(), 110);
//! assert_eq!(*ledger.account("bob").unwrap().rating(), 90);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod account;
mod account_service;
mod config;
mod ledger;
mod lobby;
mod record;
mod session;
mod store;
mod tui;

// Crate-level exports - Accounts
pub use account::{Account, Tier};

// Crate-level exports - Ledger and rating rules
pub use ledger::{
    Ledger, LedgerConfig, LedgerError, LedgerErrorKind, RatingChange, RatingPolicy, Settlement,
    SettlementGuard, apply_delta,
};

// Crate-level exports - Match records
pub use record::{AggregatedStats, GameKind, Match, MatchCounter, MatchIndex, MatchResult};

// Crate-level exports - Persistence
pub use store::{JsonStore, MemoryStore, Store, StoreError};

// Crate-level exports - Service layer
pub use account_service::{AccountService, ServiceError};

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError};

// Crate-level exports - Session
pub use session::{
    BoardView, InputEvent, InputSource, Renderer, SessionController, SessionError, SessionReport,
};

// Crate-level exports - Terminal front end
pub use lobby::{LobbyController, Screen, ScreenTransition};
pub use tui::{CrosstermInput, TerminalRenderer, key_to_event, run_lobby};

// Crate-level exports - Game types (tic-tac-toe)
pub use wager_tictactoe::{
    Board, Cursor, Engine, GameStatus, Line, MoveOutcome, Player, Position, Square, Turn,
};
