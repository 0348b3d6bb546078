//! Match-index counter.

use tracing::{debug, instrument};

use crate::{Match, MatchIndex};

/// Hands out unique, increasing match indices.
///
/// Owned by the ledger and resumed from persisted history at startup, so
/// indices keep increasing across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchCounter {
    next: u64,
}

impl MatchCounter {
    /// Counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Continues after the given history: past both its length and its
    /// highest index.
    #[instrument(skip(history), fields(len = history.len()))]
    pub fn resume(history: &[Match]) -> Self {
        let after_max = history
            .iter()
            .map(|m| m.index().value() + 1)
            .max()
            .unwrap_or(0);
        let next = after_max.max(history.len() as u64);
        debug!(next, "Match counter resumed");
        Self { next }
    }

    /// The index the next call to [`MatchCounter::issue`] returns.
    pub fn peek(&self) -> MatchIndex {
        MatchIndex::from(self.next)
    }

    /// Returns a fresh index and advances the counter.
    pub fn issue(&mut self) -> MatchIndex {
        let index = MatchIndex::from(self.next);
        self.next += 1;
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameKind;

    fn at(index: u64) -> Match {
        Match::new(
            MatchIndex::from(index),
            "a".to_string(),
            "b".to_string(),
            0,
            GameKind::Ranked,
        )
    }

    #[test]
    fn test_counter_issues_increasing() {
        let mut counter = MatchCounter::new();
        assert_eq!(counter.issue(), MatchIndex::from(0));
        assert_eq!(counter.issue(), MatchIndex::from(1));
        assert_eq!(counter.peek(), MatchIndex::from(2));
    }

    #[test]
    fn test_resume_from_history_length() {
        let counter = MatchCounter::resume(&[at(0), at(1), at(2)]);
        assert_eq!(counter.peek(), MatchIndex::from(3));
    }

    #[test]
    fn test_resume_skips_past_highest_index() {
        let counter = MatchCounter::resume(&[at(0), at(7)]);
        assert_eq!(counter.peek(), MatchIndex::from(8));
    }

    #[test]
    fn test_resume_empty() {
        assert_eq!(MatchCounter::resume(&[]).peek(), MatchIndex::from(0));
    }
}
