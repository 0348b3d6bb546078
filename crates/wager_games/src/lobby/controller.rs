//! Lobby controller: the state machine driving the multi-screen TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, error, info, instrument, warn};

use crate::lobby::screen::{Screen, ScreenTransition};
use crate::lobby::screens::{
    LeaderboardScreen, MainLobbyScreen, MatchSummaryScreen, OpponentSelectScreen,
    ProfileSelectScreen, StatsViewScreen,
};
use crate::tui::{CrosstermInput, TerminalRenderer, Term};
use crate::{AccountService, GameKind, Match, SessionController};

/// How long to wait for a key before redrawing.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Active screen in the lobby state machine.
#[derive(Debug)]
enum ActiveScreen {
    ProfileSelect(ProfileSelectScreen),
    MainLobby(MainLobbyScreen),
    OpponentSelect(OpponentSelectScreen),
    StatsView(StatsViewScreen),
    Leaderboard(LeaderboardScreen),
    MatchSummary(MatchSummaryScreen),
}

impl ActiveScreen {
    fn as_screen(&self) -> &dyn Screen {
        match self {
            Self::ProfileSelect(s) => s,
            Self::MainLobby(s) => s,
            Self::OpponentSelect(s) => s,
            Self::StatsView(s) => s,
            Self::Leaderboard(s) => s,
            Self::MatchSummary(s) => s,
        }
    }

    fn as_screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            Self::ProfileSelect(s) => s,
            Self::MainLobby(s) => s,
            Self::OpponentSelect(s) => s,
            Self::StatsView(s) => s,
            Self::Leaderboard(s) => s,
            Self::MatchSummary(s) => s,
        }
    }
}

/// Controller that drives the lobby state machine.
///
/// Call [`LobbyController::run`] to start the event loop.
pub struct LobbyController {
    service: AccountService,
    current_user: Option<String>,
}

impl LobbyController {
    /// Creates a lobby over an opened service.
    pub fn new(service: AccountService) -> Self {
        info!("Creating LobbyController");
        Self {
            service,
            current_user: None,
        }
    }

    /// Username of the selected profile, if any.
    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    /// Runs the lobby event loop until the user quits.
    ///
    /// # Errors
    ///
    /// Terminal failures and ledger integrity faults end the loop with an
    /// error. Other game errors are logged and the lobby continues.
    #[instrument(skip(self, terminal))]
    pub fn run(&mut self, terminal: &mut Term) -> anyhow::Result<()> {
        info!("Starting lobby event loop");

        let mut screen = ActiveScreen::ProfileSelect(ProfileSelectScreen::new(&self.service));

        loop {
            terminal.draw(|f| screen.as_screen().render(f, &self.service))?;

            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            // crossterm fires both press and release on some platforms
            if key.kind == KeyEventKind::Release {
                continue;
            }

            let transition = screen.as_screen_mut().handle_key(key, &mut self.service);

            screen = match transition {
                // A game runs to completion before the next screen is shown.
                ScreenTransition::GoToInGame {
                    opponent,
                    wager,
                    kind,
                } => self.execute_game(terminal, &opponent, wager, kind)?,
                other => match self.apply_transition(other, screen) {
                    Some(next) => next,
                    None => {
                        info!("Lobby quitting");
                        return Ok(());
                    }
                },
            };
        }
    }

    /// Applies a screen transition, returning the next screen or `None` to quit.
    #[instrument(skip(self, current))]
    fn apply_transition(
        &mut self,
        transition: ScreenTransition,
        current: ActiveScreen,
    ) -> Option<ActiveScreen> {
        debug!(transition = ?transition, "Applying screen transition");
        match transition {
            ScreenTransition::Stay => Some(current),

            ScreenTransition::GoToProfileSelect => {
                info!("Navigating to ProfileSelect");
                Some(self.profile_select())
            }

            ScreenTransition::GoToMainLobby => {
                if let ActiveScreen::ProfileSelect(s) = &current
                    && let Some(username) = s.selected_username()
                {
                    self.current_user = Some(username.clone());
                }
                Some(self.main_lobby())
            }

            ScreenTransition::GoToOpponentSelect => Some(match &self.current_user {
                Some(user) => {
                    info!(user = %user, "Navigating to OpponentSelect");
                    ActiveScreen::OpponentSelect(OpponentSelectScreen::new(
                        user.clone(),
                        &self.service,
                    ))
                }
                None => self.profile_select(),
            }),

            ScreenTransition::GoToStatsView => Some(match &self.current_user {
                Some(user) => {
                    info!(user = %user, "Navigating to StatsView");
                    ActiveScreen::StatsView(StatsViewScreen::new(user.clone(), &self.service))
                }
                None => self.profile_select(),
            }),

            ScreenTransition::GoToLeaderboard => {
                info!("Navigating to Leaderboard");
                let user = self.current_user.clone().unwrap_or_default();
                Some(ActiveScreen::Leaderboard(LeaderboardScreen::new(user)))
            }

            // Played by the event loop before transitions are applied.
            ScreenTransition::GoToInGame { .. } => Some(current),

            ScreenTransition::ClearData => Some(self.clear_data()),

            ScreenTransition::Quit => None,
        }
    }

    /// Wipes all data and returns to profile selection, showing the failure
    /// if the store could not be cleared.
    fn clear_data(&mut self) -> ActiveScreen {
        self.current_user = None;
        match self.service.clear_data() {
            Ok(()) => self.profile_select(),
            Err(e) => {
                error!(error = %e, "Failed to clear data");
                let message = format!("Could not clear data: {}", e.user_message());
                ActiveScreen::ProfileSelect(
                    ProfileSelectScreen::new(&self.service).with_error(message),
                )
            }
        }
    }

    fn profile_select(&self) -> ActiveScreen {
        ActiveScreen::ProfileSelect(ProfileSelectScreen::new(&self.service))
    }

    /// Main lobby for the current user, or profile selection when the user
    /// is unset or no longer exists.
    fn main_lobby(&mut self) -> ActiveScreen {
        if let Some(user) = self.current_user.clone()
            && self.service.account(&user).is_some()
        {
            info!(user = %user, "Navigating to MainLobby");
            return ActiveScreen::MainLobby(MainLobbyScreen::new(user));
        }
        warn!("No user available for MainLobby, redirecting to ProfileSelect");
        self.current_user = None;
        self.profile_select()
    }

    /// Opens a match for the current user against `opponent`.
    ///
    /// On rejection, returns the screen to show instead: opponent selection
    /// with the reason, or profile selection when no user is set.
    fn open_match(
        &mut self,
        opponent: &str,
        wager: u32,
        kind: GameKind,
    ) -> Result<Match, ActiveScreen> {
        let Some(user) = self.current_user.clone() else {
            warn!("No user selected, cannot start a match");
            return Err(self.profile_select());
        };

        self.service
            .open_match(&user, opponent, wager, kind)
            .map_err(|e| {
                warn!(error = %e, "Match could not be opened");
                ActiveScreen::OpponentSelect(
                    OpponentSelectScreen::new(user, &self.service).with_error(e.user_message()),
                )
            })
    }

    /// Opens a match, plays it to the end and returns the next screen.
    ///
    /// Rejected match setups return to opponent selection. Session I/O
    /// failures return to the lobby. Ledger integrity faults are returned as
    /// errors.
    #[instrument(skip(self, terminal))]
    fn execute_game(
        &mut self,
        terminal: &mut Term,
        opponent: &str,
        wager: u32,
        kind: GameKind,
    ) -> anyhow::Result<ActiveScreen> {
        let record = match self.open_match(opponent, wager, kind) {
            Ok(record) => record,
            Err(screen) => return Ok(screen),
        };

        info!(index = %record.index(), "Launching session");
        let session = SessionController::new(record);
        let mut renderer = TerminalRenderer::new(terminal);
        let mut input = CrosstermInput;

        match session.run(&mut self.service, &mut renderer, &mut input) {
            Ok(report) => Ok(ActiveScreen::MatchSummary(MatchSummaryScreen::new(report))),
            Err(e) if e.is_integrity_fault() => {
                error!(error = %e, "Ledger integrity fault");
                Err(e.into())
            }
            Err(e) => {
                error!(error = %e, "Game session failed");
                Ok(self.main_lobby())
            }
        }
    }
}
