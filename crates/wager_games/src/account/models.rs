//! Account model.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::MatchIndex;

/// Account tier, selecting how rating changes are scaled.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    Serialize,
    Deserialize,
    strum::EnumIter,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Rating changes are applied as-is.
    #[default]
    #[display("Basic")]
    Basic,
    /// Losses are divided by the premium multiplier.
    #[display("Premium")]
    Premium,
    /// Losses are divided and gains multiplied by the premium multiplier.
    #[display("Premium+")]
    PremiumPlus,
}

impl Tier {
    /// Cycles to the next tier (used by the profile screen).
    #[instrument]
    pub fn next(self) -> Self {
        match self {
            Self::Basic => Self::Premium,
            Self::Premium => Self::PremiumPlus,
            Self::PremiumPlus => Self::Basic,
        }
    }
}

/// A player account.
///
/// Accounts are keyed by username. The rating only changes through
/// [`Ledger::settle`](crate::Ledger::settle); the history holds indices into
/// the ledger's match list rather than copies of the matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Account {
    username: String,
    rating: u32,
    tier: Tier,
    #[serde(default)]
    history: Vec<MatchIndex>,
    created_at: DateTime<Utc>,
}

impl Account {
    /// Creates a fresh account with an empty history.
    #[instrument(skip(username), fields(username = %username))]
    pub fn new(username: String, rating: u32, tier: Tier) -> Self {
        Self {
            username,
            rating,
            tier,
            history: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Number of completed games recorded for this account.
    pub fn games_count(&self) -> usize {
        self.history.len()
    }

    /// Whether the given match is already in this account's history.
    pub fn has_played(&self, index: MatchIndex) -> bool {
        self.history.contains(&index)
    }

    pub(crate) fn set_rating(&mut self, rating: u32) {
        self.rating = rating;
    }

    pub(crate) fn push_history(&mut self, index: MatchIndex) {
        self.history.push(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_has_no_games() {
        let account = Account::new("alice".to_string(), 100, Tier::Premium);
        assert_eq!(account.games_count(), 0);
        assert_eq!(*account.rating(), 100);
        assert_eq!(*account.tier(), Tier::Premium);
    }

    #[test]
    fn test_tier_cycle_returns_to_start() {
        assert_eq!(Tier::Basic.next().next().next(), Tier::Basic);
    }

    #[test]
    fn test_tier_serializes_snake_case() {
        let json = serde_json::to_string(&Tier::PremiumPlus).expect("serialize");
        assert_eq!(json, "\"premium_plus\"");
    }
}
