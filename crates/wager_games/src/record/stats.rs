//! Aggregated per-account statistics.

use derive_getters::Getters;
use tracing::instrument;

use crate::{Match, MatchResult};

/// Aggregated win/loss/draw counts for an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters)]
pub struct AggregatedStats {
    total_games: u32,
    wins: u32,
    losses: u32,
    draws: u32,
}

impl AggregatedStats {
    /// Creates new aggregated statistics.
    pub fn new(total_games: u32, wins: u32, losses: u32, draws: u32) -> Self {
        Self {
            total_games,
            wins,
            losses,
            draws,
        }
    }

    /// Tallies the resolved matches the account took part in.
    #[instrument(skip(matches))]
    pub fn from_matches<'a>(username: &str, matches: impl IntoIterator<Item = &'a Match>) -> Self {
        let mut stats = Self::default();
        for result in matches.into_iter().filter_map(|m| m.result_for(username)) {
            match result {
                MatchResult::Win => stats.wins += 1,
                MatchResult::Lose => stats.losses += 1,
                MatchResult::Draw => stats.draws += 1,
                MatchResult::Undetermined => continue,
            }
            stats.total_games += 1;
        }
        stats
    }

    /// Calculates win rate as a percentage (0.0-100.0).
    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            (self.wins as f64 / self.total_games as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameKind, MatchIndex};

    fn finished(index: u64, first: &str, second: &str, result: MatchResult) -> Match {
        let mut m = Match::new(
            MatchIndex::from(index),
            first.to_string(),
            second.to_string(),
            5,
            GameKind::Ranked,
        );
        m.resolve(result, 5);
        m
    }

    #[test]
    fn test_stats_from_both_seats() {
        let matches = [
            finished(0, "alice", "bob", MatchResult::Win),
            finished(1, "bob", "alice", MatchResult::Win),
            finished(2, "alice", "bob", MatchResult::Draw),
            finished(3, "carol", "bob", MatchResult::Lose),
        ];
        let stats = AggregatedStats::from_matches("alice", &matches);
        assert_eq!(stats, AggregatedStats::new(3, 1, 1, 1));

        let bob = AggregatedStats::from_matches("bob", &matches);
        assert_eq!(bob, AggregatedStats::new(4, 2, 1, 1));
        assert!((bob.win_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_win_rate_with_no_games() {
        assert_eq!(AggregatedStats::default().win_rate(), 0.0);
    }
}
