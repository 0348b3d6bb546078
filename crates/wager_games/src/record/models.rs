//! Match record model.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use wager_tictactoe::{GameStatus, Player};

/// Stable identifier of a match within the ledger's history.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Serialize, Deserialize,
)]
#[serde(transparent)]
#[display("{_0}")]
pub struct MatchIndex(u64);

impl MatchIndex {
    /// Raw numeric value.
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Result of a match, relative to the first player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    /// First player won.
    #[display("win")]
    Win,
    /// First player lost.
    #[display("lose")]
    Lose,
    /// Nobody won.
    #[display("draw")]
    Draw,
    /// The board has not reached a terminal state.
    #[display("undetermined")]
    Undetermined,
}

impl MatchResult {
    /// Maps a board status to a result. The first player always plays X.
    #[instrument]
    pub fn from_status(status: &GameStatus) -> Self {
        match status {
            GameStatus::Won {
                winner: Player::X, ..
            } => Self::Win,
            GameStatus::Won {
                winner: Player::O, ..
            } => Self::Lose,
            GameStatus::Draw => Self::Draw,
            GameStatus::InProgress => Self::Undetermined,
        }
    }

    /// The same result seen from the other seat.
    pub fn mirror(self) -> Self {
        match self {
            Self::Win => Self::Lose,
            Self::Lose => Self::Win,
            other => other,
        }
    }

    /// Everything except `Undetermined`.
    pub fn is_resolved(self) -> bool {
        self != Self::Undetermined
    }

    /// +1 for a win, -1 for a loss, 0 otherwise.
    pub fn sign(self) -> i64 {
        match self {
            Self::Win => 1,
            Self::Lose => -1,
            Self::Draw | Self::Undetermined => 0,
        }
    }
}

/// Kind of game, recorded as a label on each match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    /// Wager is transferred between the two accounts.
    #[default]
    #[display("ranked")]
    Ranked,
    /// Recorded in history, ratings untouched.
    #[display("training")]
    Training,
}

impl GameKind {
    /// Toggles between `Ranked` and `Training`.
    #[instrument]
    pub fn toggle(self) -> Self {
        match self {
            Self::Ranked => Self::Training,
            Self::Training => Self::Ranked,
        }
    }
}

/// One match between two accounts.
///
/// Created by [`Ledger::open_match`](crate::Ledger::open_match) with an
/// `Undetermined` result; the result is fixed once, when the board reaches a
/// terminal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Match {
    index: MatchIndex,
    first: String,
    second: String,
    wager: u32,
    result: MatchResult,
    kind: GameKind,
    #[serde(default)]
    moves: u32,
    #[serde(default)]
    played_at: Option<DateTime<Utc>>,
}

impl Match {
    /// Creates an undetermined match.
    #[instrument(skip(first, second), fields(first = %first, second = %second))]
    pub fn new(
        index: MatchIndex,
        first: String,
        second: String,
        wager: u32,
        kind: GameKind,
    ) -> Self {
        debug!("Creating match record");
        Self {
            index,
            first,
            second,
            wager,
            result: MatchResult::Undetermined,
            kind,
            moves: 0,
            played_at: None,
        }
    }

    /// Fixes the result of the match.
    ///
    /// Only the first resolution takes effect; later calls and attempts to
    /// resolve to `Undetermined` are ignored. Returns whether the record
    /// changed.
    #[instrument(skip(self), fields(index = %self.index))]
    pub fn resolve(&mut self, result: MatchResult, moves: u32) -> bool {
        if self.result.is_resolved() || !result.is_resolved() {
            warn!(current = %self.result, "Match result already fixed, ignoring");
            return false;
        }
        self.result = result;
        self.moves = moves;
        self.played_at = Some(Utc::now());
        true
    }

    /// Whether the account took part in this match.
    pub fn involves(&self, username: &str) -> bool {
        self.first == username || self.second == username
    }

    /// The result from the given account's point of view.
    pub fn result_for(&self, username: &str) -> Option<MatchResult> {
        if self.first == username {
            Some(self.result)
        } else if self.second == username {
            Some(self.result.mirror())
        } else {
            None
        }
    }

    /// The other participant's name.
    pub fn opponent_of(&self, username: &str) -> Option<&str> {
        if self.first == username {
            Some(&self.second)
        } else if self.second == username {
            Some(&self.first)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wager_tictactoe::Line;

    fn record() -> Match {
        Match::new(
            MatchIndex::from(3),
            "alice".to_string(),
            "bob".to_string(),
            10,
            GameKind::Ranked,
        )
    }

    #[test]
    fn test_status_mapping() {
        let x_wins = GameStatus::Won {
            winner: Player::X,
            line: Line::Row(0),
        };
        let o_wins = GameStatus::Won {
            winner: Player::O,
            line: Line::Diagonal,
        };
        assert_eq!(MatchResult::from_status(&x_wins), MatchResult::Win);
        assert_eq!(MatchResult::from_status(&o_wins), MatchResult::Lose);
        assert_eq!(MatchResult::from_status(&GameStatus::Draw), MatchResult::Draw);
        assert_eq!(
            MatchResult::from_status(&GameStatus::InProgress),
            MatchResult::Undetermined
        );
    }

    #[test]
    fn test_resolve_only_once() {
        let mut m = record();
        assert!(m.resolve(MatchResult::Win, 5));
        assert!(!m.resolve(MatchResult::Lose, 7));
        assert_eq!(*m.result(), MatchResult::Win);
        assert_eq!(*m.moves(), 5);
        assert!(m.played_at().is_some());
    }

    #[test]
    fn test_resolve_to_undetermined_is_ignored() {
        let mut m = record();
        assert!(!m.resolve(MatchResult::Undetermined, 2));
        assert!(m.played_at().is_none());
    }

    #[test]
    fn test_result_for_second_is_mirrored() {
        let mut m = record();
        m.resolve(MatchResult::Win, 5);
        assert_eq!(m.result_for("alice"), Some(MatchResult::Win));
        assert_eq!(m.result_for("bob"), Some(MatchResult::Lose));
        assert_eq!(m.result_for("carol"), None);
        assert_eq!(m.opponent_of("bob"), Some("alice"));
    }
}
