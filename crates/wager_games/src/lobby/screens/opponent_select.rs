//! Opponent selection screen: choose who to play, the wager and the match kind.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tracing::{debug, info, instrument};

use crate::lobby::screen::{Screen, ScreenTransition};
use crate::{Account, AccountService, GameKind};

/// Longest wager string accepted from the keyboard.
const MAX_WAGER_DIGITS: usize = 9;

/// State for the opponent selection screen.
#[derive(Debug, Getters)]
pub struct OpponentSelectScreen {
    username: String,
    opponents: Vec<Account>,
    list_state: ListState,
    wager_input: String,
    kind: GameKind,
    error_message: Option<String>,
}

impl OpponentSelectScreen {
    /// Creates the screen listing every account except `username`.
    #[instrument(skip(service))]
    pub fn new(username: String, service: &AccountService) -> Self {
        let opponents: Vec<Account> = service
            .list_accounts()
            .iter()
            .filter(|a| *a.username() != username)
            .cloned()
            .collect();
        info!(opponent_count = opponents.len(), "Initializing OpponentSelectScreen");
        let mut state = ListState::default();
        if !opponents.is_empty() {
            state.select(Some(0));
        }
        Self {
            username,
            opponents,
            list_state: state,
            wager_input: String::new(),
            kind: GameKind::default(),
            error_message: None,
        }
    }

    /// Shows why the last match could not start.
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    fn select_previous(&mut self) {
        if self.opponents.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => self.opponents.len() - 1,
        };
        self.list_state.select(Some(i));
    }

    fn select_next(&mut self) {
        if self.opponents.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % self.opponents.len(),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn selected_opponent(&self) -> Option<&Account> {
        self.list_state
            .selected()
            .and_then(|i| self.opponents.get(i))
    }

    /// Checks the wager against both current ratings.
    ///
    /// Training matches always carry a zero wager.
    #[instrument(skip(self, service))]
    fn validate(&self, service: &AccountService) -> Result<(String, u32), String> {
        let opponent = self
            .selected_opponent()
            .ok_or_else(|| "No opponent available - create another account first".to_string())?;

        if self.kind == GameKind::Training {
            return Ok((opponent.username().clone(), 0));
        }

        let wager = if self.wager_input.is_empty() {
            0
        } else {
            self.wager_input
                .parse::<u32>()
                .map_err(|_| "Wager must be a whole number".to_string())?
        };

        let own_rating = service
            .account(&self.username)
            .map(|a| *a.rating())
            .ok_or_else(|| format!("Account '{}' no longer exists", self.username))?;
        let opponent_rating = service
            .account(opponent.username())
            .map(|a| *a.rating())
            .ok_or_else(|| format!("Account '{}' no longer exists", opponent.username()))?;

        let limit = own_rating.min(opponent_rating);
        if wager > limit {
            return Err(format!("Wager {} exceeds the allowed maximum of {}", wager, limit));
        }
        Ok((opponent.username().clone(), wager))
    }
}

impl Screen for OpponentSelectScreen {
    #[instrument(skip(self, frame, service))]
    fn render(&self, frame: &mut Frame, service: &AccountService) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(area);

        let own_rating = service
            .account(&self.username)
            .map(|a| *a.rating())
            .unwrap_or_default();
        let title = Paragraph::new(format!(
            "Choose an Opponent - {} (rating {})",
            self.username, own_rating
        ))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let items: Vec<ListItem> = if self.opponents.is_empty() {
            vec![ListItem::new("No other accounts - create one from Change Profile")]
        } else {
            self.opponents
                .iter()
                .map(|a| {
                    ListItem::new(format!(
                        "{:<20} {:>6}  {}",
                        a.username(),
                        a.rating(),
                        a.tier()
                    ))
                })
                .collect()
        };

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Opponents"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = self.list_state;
        frame.render_stateful_widget(list, chunks[1], &mut list_state);

        let wager_text = match self.kind {
            GameKind::Ranked => self.wager_input.clone(),
            GameKind::Training => "0 (training)".to_string(),
        };
        let wager = Paragraph::new(wager_text).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Wager  [{}]", self.kind)),
        );
        frame.render_widget(wager, chunks[2]);

        let error_text = self.error_message.as_deref().unwrap_or("");
        let error = Paragraph::new(error_text)
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(error, chunks[3]);

        let help = Paragraph::new(
            "↑↓: Select | 0-9: Wager | Tab: Ranked/Training | Enter: Start | Esc: Back",
        )
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[4]);
    }

    #[instrument(skip(self, key, service))]
    fn handle_key(&mut self, key: KeyEvent, service: &mut AccountService) -> ScreenTransition {
        match key.code {
            KeyCode::Up => {
                self.select_previous();
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                self.select_next();
                ScreenTransition::Stay
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.wager_input.len() < MAX_WAGER_DIGITS {
                    self.wager_input.push(c);
                }
                self.error_message = None;
                ScreenTransition::Stay
            }
            KeyCode::Backspace => {
                self.wager_input.pop();
                ScreenTransition::Stay
            }
            KeyCode::Tab => {
                self.kind = self.kind.toggle();
                debug!(kind = %self.kind, "Match kind toggled");
                ScreenTransition::Stay
            }
            KeyCode::Enter => match self.validate(service) {
                Ok((opponent, wager)) => {
                    info!(opponent = %opponent, wager, kind = %self.kind, "Starting match");
                    ScreenTransition::GoToInGame {
                        opponent,
                        wager,
                        kind: self.kind,
                    }
                }
                Err(message) => {
                    debug!(message = %message, "Match setup rejected");
                    self.error_message = Some(message);
                    ScreenTransition::Stay
                }
            },
            KeyCode::Esc => ScreenTransition::GoToMainLobby,
            _ => ScreenTransition::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LedgerConfig, MemoryStore, Tier};
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn service() -> AccountService {
        let mut service =
            AccountService::open(Box::new(MemoryStore::new()), LedgerConfig::default()).unwrap();
        service.create_account("alice", Tier::Basic).unwrap();
        service.create_account("bob", Tier::Basic).unwrap();
        service
    }

    fn type_wager(screen: &mut OpponentSelectScreen, service: &mut AccountService, wager: &str) {
        for c in wager.chars() {
            screen.handle_key(press(KeyCode::Char(c)), service);
        }
    }

    #[test]
    fn test_lists_everyone_but_current_user() {
        let service = service();
        let screen = OpponentSelectScreen::new("alice".to_string(), &service);
        assert_eq!(screen.opponents().len(), 1);
        assert_eq!(screen.opponents()[0].username(), "bob");
    }

    #[test]
    fn test_wager_within_ratings_starts_game() {
        let mut service = service();
        let mut screen = OpponentSelectScreen::new("alice".to_string(), &service);
        type_wager(&mut screen, &mut service, "25");

        assert_eq!(
            screen.handle_key(press(KeyCode::Enter), &mut service),
            ScreenTransition::GoToInGame {
                opponent: "bob".to_string(),
                wager: 25,
                kind: GameKind::Ranked,
            }
        );
    }

    #[test]
    fn test_wager_above_rating_is_rejected() {
        let mut service = service();
        let mut screen = OpponentSelectScreen::new("alice".to_string(), &service);
        type_wager(&mut screen, &mut service, "101");

        assert_eq!(
            screen.handle_key(press(KeyCode::Enter), &mut service),
            ScreenTransition::Stay
        );
        assert!(screen.error_message().is_some());
    }

    #[test]
    fn test_training_ignores_wager() {
        let mut service = service();
        let mut screen = OpponentSelectScreen::new("alice".to_string(), &service);
        type_wager(&mut screen, &mut service, "500");
        screen.handle_key(press(KeyCode::Tab), &mut service);

        assert_eq!(
            screen.handle_key(press(KeyCode::Enter), &mut service),
            ScreenTransition::GoToInGame {
                opponent: "bob".to_string(),
                wager: 0,
                kind: GameKind::Training,
            }
        );
    }

    #[test]
    fn test_no_opponents_reports_error() {
        let mut service =
            AccountService::open(Box::new(MemoryStore::new()), LedgerConfig::default()).unwrap();
        service.create_account("alice", Tier::Basic).unwrap();
        let mut screen = OpponentSelectScreen::new("alice".to_string(), &service);

        assert_eq!(
            screen.handle_key(press(KeyCode::Enter), &mut service),
            ScreenTransition::Stay
        );
        assert!(screen.error_message().is_some());
    }
}
