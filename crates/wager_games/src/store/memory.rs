//! In-memory store.

use std::cell::RefCell;

use crate::store::{Store, StoreError};
use crate::{Account, Match};

/// Keeps both collections in memory. Used by tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: RefCell<Vec<Account>>,
    history: RefCell<Vec<Match>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with data.
    pub fn with_data(accounts: Vec<Account>, history: Vec<Match>) -> Self {
        Self {
            accounts: RefCell::new(accounts),
            history: RefCell::new(history),
        }
    }
}

impl Store for MemoryStore {
    fn load_accounts(&self) -> Result<Vec<Account>, StoreError> {
        Ok(self.accounts.borrow().clone())
    }

    fn save_accounts(&self, accounts: &[Account]) -> Result<(), StoreError> {
        *self.accounts.borrow_mut() = accounts.to_vec();
        Ok(())
    }

    fn load_history(&self) -> Result<Vec<Match>, StoreError> {
        Ok(self.history.borrow().clone())
    }

    fn save_history(&self, history: &[Match]) -> Result<(), StoreError> {
        *self.history.borrow_mut() = history.to_vec();
        Ok(())
    }
}
