//! Ledger configuration.

use derive_getters::Getters;
use derive_more::Display;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// How strictly settlement guards against applying a match twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementGuard {
    /// If either participant already lists the match, nothing is applied.
    #[default]
    #[display("strict")]
    Strict,
    /// Each participant is checked and settled independently.
    #[display("per_account")]
    PerAccount,
}

/// Rules the ledger applies when creating accounts and settling matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct LedgerConfig {
    /// Rating given to new accounts.
    default_rating: u32,
    /// No settlement takes a rating below this value.
    rating_floor: u32,
    /// Divisor for softened losses and factor for amplified gains.
    premium_multiplier: u32,
    /// Double-settlement guard.
    settlement_guard: SettlementGuard,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            default_rating: 100,
            rating_floor: 1,
            premium_multiplier: 2,
            settlement_guard: SettlementGuard::Strict,
        }
    }
}
