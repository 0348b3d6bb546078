//! Rating ledger: account table, match history and settlement rules.

mod book;
mod config;
mod error;
mod policy;

pub use book::{Ledger, RatingChange, Settlement};
pub use config::{LedgerConfig, SettlementGuard};
pub use error::{LedgerError, LedgerErrorKind};
pub use policy::{RatingPolicy, apply_delta};
