//! Account management business logic layer.

use derive_more::{Display, Error, From};
use tracing::{debug, info, instrument, warn};

use crate::{
    Account, AggregatedStats, GameKind, Ledger, LedgerConfig, LedgerError, Match, Settlement,
    Store, StoreError, Tier,
};

/// Error from the service layer: a ledger rule or a persistence failure.
#[derive(Debug, Clone, Display, Error, From)]
pub enum ServiceError {
    /// A ledger rule rejected the operation.
    #[display("{_0}")]
    Ledger(LedgerError),
    /// Reading or writing the store failed.
    #[display("{_0}")]
    Store(StoreError),
}

impl ServiceError {
    /// True for ledger integrity faults, which should stop the program.
    pub fn is_integrity_fault(&self) -> bool {
        matches!(self, Self::Ledger(e) if e.is_integrity_fault())
    }

    /// Short message suitable for an inline prompt.
    pub fn user_message(&self) -> String {
        match self {
            Self::Ledger(e) => e.kind.to_string(),
            Self::Store(e) => e.message.clone(),
        }
    }
}

/// Service layer over the [`Ledger`] and its [`Store`].
///
/// Loads the ledger once when opened and writes accounts and history back
/// wholesale after every mutation.
#[derive(Debug)]
pub struct AccountService {
    store: Box<dyn Store>,
    ledger: Ledger,
}

impl AccountService {
    /// Loads persisted accounts and history into a fresh ledger.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the stored data cannot be read.
    #[instrument(skip(store))]
    pub fn open(store: Box<dyn Store>, config: LedgerConfig) -> Result<Self, StoreError> {
        info!("Opening AccountService");
        let accounts = store.load_accounts()?;
        let history = store.load_history()?;
        let ledger = Ledger::from_parts(config, accounts, history);
        Ok(Self { store, ledger })
    }

    /// Returns the underlying ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    #[instrument(skip(self))]
    fn persist(&self) -> Result<(), StoreError> {
        debug!("Persisting ledger");
        self.store.save_history(self.ledger.history())?;
        self.store.save_accounts(self.ledger.accounts())?;
        Ok(())
    }

    /// Creates an account and persists it.
    #[instrument(skip(self))]
    pub fn create_account(&mut self, username: &str, tier: Tier) -> Result<Account, ServiceError> {
        let account = self.ledger.create_account(username, tier)?.clone();
        self.persist()?;
        info!(username = %account.username(), "Account saved");
        Ok(account)
    }

    /// Returns an existing account by name or creates one if not found.
    #[instrument(skip(self))]
    pub fn get_or_create_account(
        &mut self,
        username: &str,
        tier: Tier,
    ) -> Result<Account, ServiceError> {
        if let Some(account) = self.ledger.account(username.trim()) {
            info!("Existing account found");
            return Ok(account.clone());
        }
        self.create_account(username, tier)
    }

    /// Looks up an account.
    pub fn account(&self, username: &str) -> Option<&Account> {
        self.ledger.account(username)
    }

    /// All accounts in creation order.
    pub fn list_accounts(&self) -> &[Account] {
        self.ledger.accounts()
    }

    /// Opens a match. Nothing is persisted until it is recorded.
    #[instrument(skip(self))]
    pub fn open_match(
        &mut self,
        first: &str,
        second: &str,
        wager: u32,
        kind: GameKind,
    ) -> Result<Match, ServiceError> {
        Ok(self.ledger.open_match(first, second, wager, kind)?)
    }

    /// Settles a finished match and persists both collections.
    #[instrument(skip(self, record), fields(index = %record.index()))]
    pub fn record_match(&mut self, record: &Match) -> Result<Settlement, ServiceError> {
        let settlement = self.ledger.settle(record)?;
        if settlement == Settlement::AlreadySettled {
            warn!("Match was already recorded");
            return Ok(settlement);
        }
        self.persist()?;
        info!("Match recorded");
        Ok(settlement)
    }

    /// Returns aggregated stats (wins/losses/draws) for an account.
    pub fn stats(&self, username: &str) -> AggregatedStats {
        self.ledger.stats_for(username)
    }

    /// Returns the account's matches, most recent first.
    pub fn history(&self, username: &str) -> Vec<&Match> {
        self.ledger.history_for(username)
    }

    /// Accounts ordered by rating.
    pub fn leaderboard(&self) -> Vec<&Account> {
        self.ledger.leaderboard()
    }

    /// Wipes every account and match, on disk and then in memory.
    ///
    /// If the store rejects the write, the in-memory ledger is left intact.
    #[instrument(skip(self))]
    pub fn clear_data(&mut self) -> Result<(), ServiceError> {
        self.store.save_history(&[])?;
        self.store.save_accounts(&[])?;
        self.ledger.clear();
        info!("All data cleared");
        Ok(())
    }
}
