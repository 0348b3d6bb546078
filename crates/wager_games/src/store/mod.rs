//! Persistence for accounts and match history.
//!
//! Both collections are read once at startup and rewritten wholesale after
//! every change. A missing collection reads as empty.

mod error;
mod json;
mod memory;

pub use error::StoreError;
pub use json::JsonStore;
pub use memory::MemoryStore;

use crate::{Account, Match};

/// Backing storage for the ledger's two collections.
pub trait Store: std::fmt::Debug {
    /// Loads all accounts. Missing data is an empty list.
    fn load_accounts(&self) -> Result<Vec<Account>, StoreError>;

    /// Replaces all stored accounts.
    fn save_accounts(&self, accounts: &[Account]) -> Result<(), StoreError>;

    /// Loads the match history. Missing data is an empty list.
    fn load_history(&self) -> Result<Vec<Match>, StoreError>;

    /// Replaces the stored match history.
    fn save_history(&self, history: &[Match]) -> Result<(), StoreError>;
}
