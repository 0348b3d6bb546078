//! Main lobby screen: hub for navigation after profile selection.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tracing::{debug, info, instrument, warn};

use crate::lobby::screen::{Screen, ScreenTransition};
use crate::AccountService;

/// Menu options available in the main lobby.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LobbyOption {
    Play,
    History,
    Leaderboard,
    ChangeProfile,
    ClearData,
    Quit,
}

impl LobbyOption {
    fn label(self) -> &'static str {
        match self {
            Self::Play => "Play",
            Self::History => "Match History",
            Self::Leaderboard => "Leaderboard",
            Self::ChangeProfile => "Change Profile",
            Self::ClearData => "Clear Data",
            Self::Quit => "Quit",
        }
    }

    fn all() -> &'static [LobbyOption] {
        &[
            Self::Play,
            Self::History,
            Self::Leaderboard,
            Self::ChangeProfile,
            Self::ClearData,
            Self::Quit,
        ]
    }
}

/// State for the main lobby screen.
#[derive(Debug, Getters)]
pub struct MainLobbyScreen {
    username: String,
    list_state: ListState,
    confirm_clear: bool,
}

impl MainLobbyScreen {
    /// Creates the main lobby for the given account.
    #[instrument]
    pub fn new(username: String) -> Self {
        debug!("Initializing MainLobbyScreen");
        let mut state = ListState::default();
        state.select(Some(0));
        Self {
            username,
            list_state: state,
            confirm_clear: false,
        }
    }

    fn select_previous(&mut self) {
        let count = LobbyOption::all().len();
        let i = match self.list_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => count - 1,
        };
        self.list_state.select(Some(i));
    }

    fn select_next(&mut self) {
        let count = LobbyOption::all().len();
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn selected_option(&self) -> LobbyOption {
        let options = LobbyOption::all();
        let idx = self.list_state.selected().unwrap_or(0);
        options[idx.min(options.len() - 1)]
    }
}

impl Screen for MainLobbyScreen {
    #[instrument(skip(self, frame, service))]
    fn render(&self, frame: &mut Frame, service: &AccountService) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new("Wager Games - Lobby")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let profile_text = match service.account(&self.username) {
            Some(account) => {
                let stats = service.stats(&self.username);
                format!(
                    "{} ({})   Rating: {}   W:{} / L:{} / D:{}   Win rate: {:.1}%",
                    account.username(),
                    account.tier(),
                    account.rating(),
                    stats.wins(),
                    stats.losses(),
                    stats.draws(),
                    stats.win_rate()
                )
            }
            None => format!("Player: {}", self.username),
        };
        let profile_bar = Paragraph::new(profile_text)
            .style(Style::default().fg(Color::Green))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(profile_bar, chunks[1]);

        let items: Vec<ListItem> = LobbyOption::all()
            .iter()
            .map(|opt| ListItem::new(opt.label()))
            .collect();

        let menu = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Menu"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = self.list_state;
        frame.render_stateful_widget(menu, chunks[2], &mut list_state);

        let (help_text, help_style) = if self.confirm_clear {
            (
                "Delete ALL accounts and matches? y: Yes | n: No",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )
        } else {
            (
                "↑↓: Navigate | Enter: Select | q: Quit",
                Style::default().fg(Color::DarkGray),
            )
        };
        let help = Paragraph::new(help_text)
            .style(help_style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    #[instrument(skip(self, key, _service))]
    fn handle_key(&mut self, key: KeyEvent, _service: &mut AccountService) -> ScreenTransition {
        if self.confirm_clear {
            self.confirm_clear = false;
            return match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    warn!("Clear data confirmed");
                    ScreenTransition::ClearData
                }
                _ => {
                    info!("Clear data cancelled");
                    ScreenTransition::Stay
                }
            };
        }

        match key.code {
            KeyCode::Up => {
                self.select_previous();
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                self.select_next();
                ScreenTransition::Stay
            }
            KeyCode::Enter => {
                let option = self.selected_option();
                info!(option = ?option, "Lobby option selected");
                match option {
                    LobbyOption::Play => ScreenTransition::GoToOpponentSelect,
                    LobbyOption::History => ScreenTransition::GoToStatsView,
                    LobbyOption::Leaderboard => ScreenTransition::GoToLeaderboard,
                    LobbyOption::ChangeProfile => ScreenTransition::GoToProfileSelect,
                    LobbyOption::ClearData => {
                        self.confirm_clear = true;
                        ScreenTransition::Stay
                    }
                    LobbyOption::Quit => ScreenTransition::Quit,
                }
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LedgerConfig, MemoryStore};
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn service() -> AccountService {
        AccountService::open(Box::new(MemoryStore::new()), LedgerConfig::default()).unwrap()
    }

    #[test]
    fn test_clear_data_requires_confirmation() {
        let mut service = service();
        let mut screen = MainLobbyScreen::new("alice".to_string());
        for _ in 0..4 {
            screen.handle_key(press(KeyCode::Down), &mut service);
        }

        assert_eq!(
            screen.handle_key(press(KeyCode::Enter), &mut service),
            ScreenTransition::Stay
        );
        assert!(*screen.confirm_clear());
        assert_eq!(
            screen.handle_key(press(KeyCode::Char('n')), &mut service),
            ScreenTransition::Stay
        );
        assert!(!*screen.confirm_clear());

        screen.handle_key(press(KeyCode::Enter), &mut service);
        assert_eq!(
            screen.handle_key(press(KeyCode::Char('y')), &mut service),
            ScreenTransition::ClearData
        );
    }

    #[test]
    fn test_up_from_top_wraps_to_quit() {
        let mut service = service();
        let mut screen = MainLobbyScreen::new("alice".to_string());
        screen.handle_key(press(KeyCode::Up), &mut service);
        assert_eq!(
            screen.handle_key(press(KeyCode::Enter), &mut service),
            ScreenTransition::Quit
        );
    }
}
