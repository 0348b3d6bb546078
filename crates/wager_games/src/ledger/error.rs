//! Ledger error types.

use derive_more::{Display, Error};
use tracing::instrument;

use crate::MatchIndex;

/// What went wrong in a ledger operation.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum LedgerErrorKind {
    /// Account name was empty after trimming.
    #[display("account name cannot be empty")]
    EmptyName,
    /// Account name is already taken.
    #[display("account '{_0}' already exists")]
    DuplicateName(String),
    /// No account with this name.
    #[display("no account named '{_0}'")]
    UnknownAccount(String),
    /// A match needs two different accounts.
    #[display("'{_0}' cannot play against itself")]
    SameParticipants(String),
    /// Wager exceeds a participant's current rating.
    #[display("wager {wager} exceeds {username}'s rating of {rating}")]
    WagerTooHigh {
        /// Account that cannot cover the wager.
        username: String,
        /// Requested wager.
        wager: u32,
        /// That account's rating.
        rating: u32,
    },
    /// Settlement was requested before the match finished.
    #[display("match #{_0} has no result yet")]
    Unresolved(MatchIndex),
    /// Settlement was requested for an account that did not play the match.
    #[display("account '{username}' did not play in match #{index}")]
    NotAParticipant {
        /// Account named in the request.
        username: String,
        /// Match being settled.
        index: MatchIndex,
    },
}

/// Ledger error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Ledger error: {} at {}:{}", kind, file, line)]
pub struct LedgerError {
    /// What went wrong.
    pub kind: LedgerErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LedgerError {
    /// Creates a new ledger error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: LedgerErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Integrity faults mean the stored data or the calling code is wrong;
    /// the process should stop rather than carry on with drifted ratings.
    pub fn is_integrity_fault(&self) -> bool {
        matches!(
            self.kind,
            LedgerErrorKind::Unresolved(_)
                | LedgerErrorKind::NotAParticipant { .. }
                | LedgerErrorKind::UnknownAccount(_)
        )
    }
}
