//! The ledger: account table plus the single source-of-truth match list.

use derive_getters::Getters;
use derive_new::new;
use tracing::{debug, error, info, instrument, warn};

use crate::ledger::{
    LedgerConfig, LedgerError, LedgerErrorKind, RatingPolicy, SettlementGuard, apply_delta,
};
use crate::{Account, AggregatedStats, GameKind, Match, MatchCounter, MatchIndex, Tier};

/// One account's rating before and after a settlement.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct RatingChange {
    username: String,
    before: u32,
    after: u32,
}

impl RatingChange {
    /// Signed rating difference.
    pub fn delta(&self) -> i64 {
        i64::from(self.after) - i64::from(self.before)
    }
}

/// Result of settling a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// Ratings and histories were updated.
    Applied {
        /// First player's change.
        first: RatingChange,
        /// Second player's change.
        second: RatingChange,
    },
    /// The match had already been settled; nothing changed.
    AlreadySettled,
}

/// Accounts and match history, with the rules that tie them together.
///
/// Accounts refer to matches by [`MatchIndex`]; matches refer to accounts by
/// username. The ledger owns both tables, so there are no back-references.
#[derive(Debug, Clone)]
pub struct Ledger {
    config: LedgerConfig,
    accounts: Vec<Account>,
    history: Vec<Match>,
    counter: MatchCounter,
}

impl Ledger {
    /// Creates an empty ledger.
    #[instrument]
    pub fn new(config: LedgerConfig) -> Self {
        Self::from_parts(config, Vec::new(), Vec::new())
    }

    /// Rebuilds a ledger from persisted accounts and history.
    ///
    /// The match counter resumes after the loaded history.
    #[instrument(skip(accounts, history), fields(accounts = accounts.len(), matches = history.len()))]
    pub fn from_parts(
        config: LedgerConfig,
        accounts: Vec<Account>,
        mut history: Vec<Match>,
    ) -> Self {
        history.sort_by_key(|m| *m.index());
        let counter = MatchCounter::resume(&history);
        info!(next_index = %counter.peek(), "Ledger loaded");
        Self {
            config,
            accounts,
            history,
            counter,
        }
    }

    /// Ledger rules in effect.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// All accounts, in creation order.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// All recorded matches, ordered by index.
    pub fn history(&self) -> &[Match] {
        &self.history
    }

    /// Index the next opened match will receive.
    pub fn next_index(&self) -> MatchIndex {
        self.counter.peek()
    }

    /// Looks up an account by username.
    pub fn account(&self, username: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.username() == username)
    }

    fn account_mut(&mut self, username: &str) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.username() == username)
    }

    /// Looks up a recorded match.
    pub fn find_match(&self, index: MatchIndex) -> Option<&Match> {
        self.history
            .binary_search_by_key(&index, |m| *m.index())
            .ok()
            .map(|i| &self.history[i])
    }

    /// Creates an account with the configured default rating.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerErrorKind::EmptyName`] for a blank name and
    /// [`LedgerErrorKind::DuplicateName`] if the name is taken.
    #[instrument(skip(self))]
    pub fn create_account(&mut self, username: &str, tier: Tier) -> Result<&Account, LedgerError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LedgerError::new(LedgerErrorKind::EmptyName));
        }
        if self.account(username).is_some() {
            debug!("Account name taken");
            return Err(LedgerError::new(LedgerErrorKind::DuplicateName(
                username.to_string(),
            )));
        }

        let account = Account::new(
            username.to_string(),
            *self.config.default_rating(),
            tier,
        );
        info!(rating = account.rating(), tier = %tier, "Account created");
        self.accounts.push(account);
        Ok(&self.accounts[self.accounts.len() - 1])
    }

    /// Opens a new match between two existing accounts.
    ///
    /// The wager must not exceed either player's current rating. Training
    /// matches carry no wager. The returned record is `Undetermined` and is
    /// not part of the history until it is settled.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown or identical participants, or a wager
    /// neither can cover.
    #[instrument(skip(self))]
    pub fn open_match(
        &mut self,
        first: &str,
        second: &str,
        wager: u32,
        kind: GameKind,
    ) -> Result<Match, LedgerError> {
        if first == second {
            return Err(LedgerError::new(LedgerErrorKind::SameParticipants(
                first.to_string(),
            )));
        }

        let wager = match kind {
            GameKind::Ranked => wager,
            GameKind::Training => 0,
        };

        for username in [first, second] {
            let account = self.account(username).ok_or_else(|| {
                LedgerError::new(LedgerErrorKind::UnknownAccount(username.to_string()))
            })?;
            if wager > *account.rating() {
                debug!(username, rating = account.rating(), "Wager too high");
                return Err(LedgerError::new(LedgerErrorKind::WagerTooHigh {
                    username: username.to_string(),
                    wager,
                    rating: *account.rating(),
                }));
            }
        }

        let index = self.counter.issue();
        info!(index = %index, wager, kind = %kind, "Match opened");
        Ok(Match::new(
            index,
            first.to_string(),
            second.to_string(),
            wager,
            kind,
        ))
    }

    /// Settles a finished match into both participants' ratings.
    ///
    /// Equivalent to [`Ledger::settle_for`] from the first player's side.
    pub fn settle(&mut self, record: &Match) -> Result<Settlement, LedgerError> {
        self.settle_for(record.first(), record)
    }

    /// Settles a finished match, starting from `username`'s side and
    /// cascading to the opponent.
    ///
    /// Both participants are settled together. A match already present in a
    /// participant's history is not applied again (see [`SettlementGuard`]).
    ///
    /// # Errors
    ///
    /// Integrity faults: the match is unresolved, `username` did not play it,
    /// or a participant is missing from the account table. Nothing is
    /// changed when an error is returned.
    #[instrument(skip(self, record), fields(index = %record.index(), result = %record.result()))]
    pub fn settle_for(
        &mut self,
        username: &str,
        record: &Match,
    ) -> Result<Settlement, LedgerError> {
        let index = *record.index();

        if !record.involves(username) {
            error!(username, "Settlement requested for a non-participant");
            return Err(LedgerError::new(LedgerErrorKind::NotAParticipant {
                username: username.to_string(),
                index,
            }));
        }
        if !record.result().is_resolved() {
            error!("Settlement requested for an unresolved match");
            return Err(LedgerError::new(LedgerErrorKind::Unresolved(index)));
        }
        for participant in [record.first(), record.second()] {
            if self.account(participant).is_none() {
                error!(participant = %participant, "Match references a missing account");
                return Err(LedgerError::new(LedgerErrorKind::UnknownAccount(
                    participant.clone(),
                )));
            }
        }

        let first_seen = self
            .account(record.first())
            .is_some_and(|a| a.has_played(index));
        let second_seen = self
            .account(record.second())
            .is_some_and(|a| a.has_played(index));
        let (settle_first, settle_second) = match self.config.settlement_guard() {
            SettlementGuard::Strict if first_seen || second_seen => (false, false),
            SettlementGuard::Strict => (true, true),
            SettlementGuard::PerAccount => (!first_seen, !second_seen),
        };
        if !settle_first && !settle_second {
            warn!("Match already settled, ignoring");
            return Ok(Settlement::AlreadySettled);
        }

        let delta = record.result().sign() * i64::from(*record.wager());
        let first = self.adjust(record.first(), index, delta, settle_first);
        let second = self.adjust(record.second(), index, -delta, settle_second);

        if self.find_match(index).is_none() {
            let pos = self.history.partition_point(|m| *m.index() < index);
            self.history.insert(pos, record.clone());
        }

        info!(
            first = %first.username(),
            first_delta = first.delta(),
            second = %second.username(),
            second_delta = second.delta(),
            "Match settled"
        );
        Ok(Settlement::Applied { first, second })
    }

    /// Applies one side of a settlement. Participants were checked by the
    /// caller.
    fn adjust(
        &mut self,
        username: &str,
        index: MatchIndex,
        delta: i64,
        apply: bool,
    ) -> RatingChange {
        let multiplier = *self.config.premium_multiplier();
        let floor = *self.config.rating_floor();
        let Some(account) = self.account_mut(username) else {
            return RatingChange::new(username.to_string(), 0, 0);
        };

        let before = *account.rating();
        if !apply {
            debug!(username, "Side already settled, skipping");
            return RatingChange::new(username.to_string(), before, before);
        }

        let policy = RatingPolicy::for_tier(*account.tier(), multiplier);
        let after = apply_delta(policy, before, delta, floor);
        account.set_rating(after);
        account.push_history(index);
        debug!(username, before, after, ?policy, "Rating adjusted");
        RatingChange::new(username.to_string(), before, after)
    }

    /// Matches the account played, most recent first.
    #[instrument(skip(self))]
    pub fn history_for(&self, username: &str) -> Vec<&Match> {
        let Some(account) = self.account(username) else {
            return Vec::new();
        };
        let mut matches: Vec<&Match> = account
            .history()
            .iter()
            .filter_map(|index| self.find_match(*index))
            .collect();
        matches.reverse();
        matches
    }

    /// Win/loss/draw totals for the account.
    #[instrument(skip(self))]
    pub fn stats_for(&self, username: &str) -> AggregatedStats {
        AggregatedStats::from_matches(username, self.history_for(username))
    }

    /// Accounts by rating, highest first; ties by name.
    pub fn leaderboard(&self) -> Vec<&Account> {
        let mut ranked: Vec<&Account> = self.accounts.iter().collect();
        ranked.sort_by(|a, b| {
            b.rating()
                .cmp(a.rating())
                .then_with(|| a.username().cmp(b.username()))
        });
        ranked
    }

    /// Removes every account and match and restarts the counter.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        warn!(
            accounts = self.accounts.len(),
            matches = self.history.len(),
            "Clearing ledger"
        );
        self.accounts.clear();
        self.history.clear();
        self.counter = MatchCounter::new();
    }
}
