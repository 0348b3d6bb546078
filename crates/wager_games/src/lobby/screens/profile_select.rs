//! Profile selection screen: pick an account or create one with a tier.

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
use crate::{Account, AccountService, Tier};

/// State for the profile selection screen.
#[derive(Debug, Getters)]
pub struct ProfileSelectScreen {
    accounts: Vec<Account>,
    list_state: ListState,
    new_name_input: String,
    new_tier: Tier,
    input_mode: bool,
    error_message: Option<String>,
    selected_username: Option<String>,
}

impl ProfileSelectScreen {
    /// Creates the screen, loading existing accounts.
    #[instrument(skip(service))]
    pub fn new(service: &AccountService) -> Self {
        let accounts = service.list_accounts().to_vec();
        info!(account_count = accounts.len(), "ProfileSelectScreen initialized");
        let mut state = ListState::default();
        if !accounts.is_empty() {
            state.select(Some(0));
        }
        Self {
            // Straight into name entry when there is nobody to pick.
            input_mode: accounts.is_empty(),
            accounts,
            list_state: state,
            new_name_input: String::new(),
            new_tier: Tier::default(),
            error_message: None,
            selected_username: None,
        }
    }

    /// Shows `message` in the error line.
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    fn select_previous(&mut self) {
        if self.accounts.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => self.accounts.len() - 1,
        };
        self.list_state.select(Some(i));
    }

    fn select_next(&mut self) {
        if self.accounts.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % self.accounts.len(),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Confirms the highlighted account.
    #[instrument(skip(self))]
    fn confirm_selection(&mut self) -> bool {
        if let Some(idx) = self.list_state.selected()
            && let Some(account) = self.accounts.get(idx)
        {
            info!(username = %account.username(), "Profile selected");
            self.selected_username = Some(account.username().clone());
            return true;
        }
        false
    }

    /// Creates an account from the typed name and chosen tier.
    #[instrument(skip(self, service))]
    fn create_profile(&mut self, service: &mut AccountService) -> bool {
        let name = self.new_name_input.trim().to_string();
        match service.create_account(&name, self.new_tier) {
            Ok(account) => {
                info!(username = %account.username(), tier = %account.tier(), "Profile created");
                self.accounts = service.list_accounts().to_vec();
                let pos = self
                    .accounts
                    .iter()
                    .position(|a| a.username() == account.username())
                    .unwrap_or(0);
                self.list_state.select(Some(pos));
                self.new_name_input.clear();
                self.input_mode = false;
                self.error_message = None;
                self.selected_username = Some(account.username().clone());
                true
            }
            Err(e) => {
                debug!(error = %e, "Profile creation rejected");
                self.error_message = Some(e.user_message());
                false
            }
        }
    }
}

impl Screen for ProfileSelectScreen {
    #[instrument(skip(self, frame, _service))]
    fn render(&self, frame: &mut Frame, _service: &AccountService) {
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

        let title = Paragraph::new("Select or Create Account")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let items: Vec<ListItem> = self
            .accounts
            .iter()
            .map(|a| {
                ListItem::new(format!(
                    "{:<20} {:>6}  {}",
                    a.username(),
                    a.rating(),
                    a.tier()
                ))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Accounts"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = self.list_state;
        frame.render_stateful_widget(list, chunks[1], &mut list_state);

        let input_title = if self.input_mode {
            format!("New account name  [tier: {}]", self.new_tier)
        } else {
            "Press 'n' to create a new account".to_string()
        };
        let input_style = if self.input_mode {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let input = Paragraph::new(self.new_name_input.as_str())
            .style(input_style)
            .block(Block::default().borders(Borders::ALL).title(input_title));
        frame.render_widget(input, chunks[2]);

        let error_text = self.error_message.as_deref().unwrap_or("");
        let error = Paragraph::new(error_text)
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(error, chunks[3]);

        let help_text = if self.input_mode {
            "Type name | Tab: Cycle tier | Enter: Create | Esc: Cancel"
        } else {
            "↑↓: Select | Enter: Confirm | n: New | q: Quit"
        };
        let help = Paragraph::new(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[4]);
    }

    #[instrument(skip(self, key, service))]
    fn handle_key(&mut self, key: KeyEvent, service: &mut AccountService) -> ScreenTransition {
        if self.input_mode {
            match key.code {
                KeyCode::Char(c) => {
                    self.new_name_input.push(c);
                    ScreenTransition::Stay
                }
                KeyCode::Backspace => {
                    self.new_name_input.pop();
                    ScreenTransition::Stay
                }
                KeyCode::Tab => {
                    self.new_tier = self.new_tier.next();
                    ScreenTransition::Stay
                }
                KeyCode::Enter => {
                    if self.create_profile(service) {
                        ScreenTransition::GoToMainLobby
                    } else {
                        ScreenTransition::Stay
                    }
                }
                KeyCode::Esc => {
                    if self.accounts.is_empty() {
                        return ScreenTransition::Quit;
                    }
                    self.input_mode = false;
                    self.new_name_input.clear();
                    self.error_message = None;
                    ScreenTransition::Stay
                }
                _ => ScreenTransition::Stay,
            }
        } else {
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
                    if self.confirm_selection() {
                        ScreenTransition::GoToMainLobby
                    } else {
                        self.input_mode = true;
                        ScreenTransition::Stay
                    }
                }
                KeyCode::Char('n') | KeyCode::Char('N') => {
                    self.input_mode = true;
                    self.error_message = None;
                    ScreenTransition::Stay
                }
                KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
                _ => ScreenTransition::Stay,
            }
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
    fn test_create_account_with_cycled_tier() {
        let mut service = service();
        let mut screen = ProfileSelectScreen::new(&service);
        assert!(*screen.input_mode());

        for c in "carol".chars() {
            screen.handle_key(press(KeyCode::Char(c)), &mut service);
        }
        screen.handle_key(press(KeyCode::Tab), &mut service);
        let transition = screen.handle_key(press(KeyCode::Enter), &mut service);

        assert_eq!(transition, ScreenTransition::GoToMainLobby);
        assert_eq!(screen.selected_username().as_deref(), Some("carol"));
        let account = service.account("carol").unwrap();
        assert_eq!(*account.tier(), Tier::Premium);
    }

    #[test]
    fn test_duplicate_name_stays_with_error() {
        let mut service = service();
        service.create_account("carol", Tier::Basic).unwrap();
        let mut screen = ProfileSelectScreen::new(&service);

        screen.handle_key(press(KeyCode::Char('n')), &mut service);
        for c in "carol".chars() {
            screen.handle_key(press(KeyCode::Char(c)), &mut service);
        }
        let transition = screen.handle_key(press(KeyCode::Enter), &mut service);

        assert_eq!(transition, ScreenTransition::Stay);
        assert!(screen.error_message().is_some());
        assert_eq!(service.list_accounts().len(), 1);
    }

    #[test]
    fn test_enter_selects_highlighted_account() {
        let mut service = service();
        service.create_account("alice", Tier::Basic).unwrap();
        service.create_account("bob", Tier::Basic).unwrap();
        let mut screen = ProfileSelectScreen::new(&service);

        screen.handle_key(press(KeyCode::Down), &mut service);
        let transition = screen.handle_key(press(KeyCode::Enter), &mut service);

        assert_eq!(transition, ScreenTransition::GoToMainLobby);
        assert_eq!(screen.selected_username().as_deref(), Some("bob"));
    }
}
