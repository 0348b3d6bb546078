//! Leaderboard screen: every account ranked by rating.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use tracing::instrument;

use crate::lobby::screen::{Screen, ScreenTransition};
use crate::AccountService;

/// Leaderboard screen. Reads the ledger on every frame.
#[derive(Debug)]
pub struct LeaderboardScreen {
    username: String,
}

impl LeaderboardScreen {
    /// Creates the screen, highlighting `username`.
    pub fn new(username: String) -> Self {
        Self { username }
    }
}

impl Screen for LeaderboardScreen {
    #[instrument(skip(self, frame, service))]
    fn render(&self, frame: &mut Frame, service: &AccountService) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new("Leaderboard")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let bold = Style::default().add_modifier(Modifier::BOLD);
        let header = Row::new(vec![
            Cell::from("Rank").style(bold),
            Cell::from("Account").style(bold),
            Cell::from("Tier").style(bold),
            Cell::from("Rating").style(bold),
            Cell::from("Games").style(bold),
        ])
        .style(Style::default().fg(Color::Yellow));

        let rows: Vec<Row> = service
            .leaderboard()
            .into_iter()
            .enumerate()
            .map(|(rank, account)| {
                let style = if *account.username() == self.username {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Cell::from((rank + 1).to_string()),
                    Cell::from(account.username().clone()),
                    Cell::from(account.tier().to_string()),
                    Cell::from(account.rating().to_string()),
                    Cell::from(account.games_count().to_string()),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Length(6),
            Constraint::Percentage(40),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(8),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title("Accounts"));
        frame.render_widget(table, chunks[1]);

        let help = Paragraph::new("Esc / b: Back to Lobby | q: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);
    }

    fn handle_key(&mut self, key: KeyEvent, _service: &mut AccountService) -> ScreenTransition {
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => {
                ScreenTransition::GoToMainLobby
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
