//! Match records, the match-index counter and per-account statistics.

mod counter;
mod models;
mod stats;

pub use counter::MatchCounter;
pub use models::{GameKind, Match, MatchIndex, MatchResult};
pub use stats::AggregatedStats;
