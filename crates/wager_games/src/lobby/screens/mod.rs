//! Screen implementations for the lobby state machine.

mod leaderboard;
mod main_lobby;
mod match_summary;
mod opponent_select;
mod profile_select;
mod stats_view;

pub use leaderboard::LeaderboardScreen;
pub use main_lobby::MainLobbyScreen;
pub use match_summary::MatchSummaryScreen;
pub use opponent_select::OpponentSelectScreen;
pub use profile_select::ProfileSelectScreen;
pub use stats_view::StatsViewScreen;
