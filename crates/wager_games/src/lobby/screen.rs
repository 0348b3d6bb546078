//! Screen trait and transition type for the lobby state machine.

use crossterm::event::KeyEvent;
use ratatui::Frame;

use crate::{AccountService, GameKind};

/// The result of handling a key on a screen.
///
/// Screens return this from [`Screen::handle_key`] to drive the
/// [`LobbyController`](crate::LobbyController) state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Stay on the current screen.
    Stay,
    /// Navigate to the profile selection screen.
    GoToProfileSelect,
    /// Navigate to the main lobby screen.
    GoToMainLobby,
    /// Navigate to opponent and wager selection.
    GoToOpponentSelect,
    /// Navigate to the match history of the current user.
    GoToStatsView,
    /// Navigate to the rating leaderboard.
    GoToLeaderboard,
    /// Open a match against `opponent` and play it.
    GoToInGame {
        /// Username of the second player.
        opponent: String,
        /// Rating points at stake.
        wager: u32,
        /// Ranked or training.
        kind: GameKind,
    },
    /// Wipe every account and match, then return to profile selection.
    ClearData,
    /// Exit the lobby.
    Quit,
}

/// Implemented by each screen in the lobby state machine.
///
/// Each screen owns its own state, renders its UI, and handles key events.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame, service: &AccountService);

    /// Handles a key event and returns the resulting [`ScreenTransition`].
    fn handle_key(&mut self, key: KeyEvent, service: &mut AccountService) -> ScreenTransition;
}
