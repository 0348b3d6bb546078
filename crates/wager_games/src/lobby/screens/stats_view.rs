//! Statistics view screen: totals and match history for the current account.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use tracing::{debug, info, instrument};

use crate::lobby::screen::{Screen, ScreenTransition};
use crate::{AccountService, AggregatedStats, Match, MatchResult};

/// Number of matches shown in the table.
const RECENT_LIMIT: usize = 20;

/// State for the statistics view screen.
#[derive(Debug, Getters)]
pub struct StatsViewScreen {
    username: String,
    aggregated: AggregatedStats,
    recent_matches: Vec<Match>,
}

impl StatsViewScreen {
    /// Creates the screen, loading stats and history immediately.
    #[instrument(skip(service))]
    pub fn new(username: String, service: &AccountService) -> Self {
        debug!("Initializing StatsViewScreen");
        let aggregated = service.stats(&username);
        let recent_matches: Vec<Match> = service
            .history(&username)
            .into_iter()
            .take(RECENT_LIMIT)
            .cloned()
            .collect();
        info!(
            total_games = aggregated.total_games(),
            "StatsViewScreen initialized"
        );
        Self {
            username,
            aggregated,
            recent_matches,
        }
    }
}

impl Screen for StatsViewScreen {
    #[instrument(skip(self, frame, _service))]
    fn render(&self, frame: &mut Frame, _service: &AccountService) {
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

        let title = Paragraph::new(format!("Match History - {}", self.username))
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let stats = &self.aggregated;
        let summary = Paragraph::new(format!(
            "Games: {}   Wins: {}   Losses: {}   Draws: {}   Win Rate: {:.1}%",
            stats.total_games(),
            stats.wins(),
            stats.losses(),
            stats.draws(),
            stats.win_rate()
        ))
        .style(Style::default().fg(Color::Green))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Summary"));
        frame.render_widget(summary, chunks[1]);

        let bold = Style::default().add_modifier(Modifier::BOLD);
        let header = Row::new(vec![
            Cell::from("#").style(bold),
            Cell::from("Opponent").style(bold),
            Cell::from("Kind").style(bold),
            Cell::from("Wager").style(bold),
            Cell::from("Result").style(bold),
            Cell::from("Moves").style(bold),
            Cell::from("Played").style(bold),
        ])
        .style(Style::default().fg(Color::Yellow));

        let rows: Vec<Row> = self
            .recent_matches
            .iter()
            .map(|record| {
                let result = record
                    .result_for(&self.username)
                    .unwrap_or(MatchResult::Undetermined);
                let result_color = match result {
                    MatchResult::Win => Color::Green,
                    MatchResult::Lose => Color::Red,
                    MatchResult::Draw => Color::Yellow,
                    MatchResult::Undetermined => Color::White,
                };
                let played = record
                    .played_at()
                    .as_ref()
                    .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();
                Row::new(vec![
                    Cell::from(record.index().to_string()),
                    Cell::from(record.opponent_of(&self.username).unwrap_or("?").to_string()),
                    Cell::from(record.kind().to_string()),
                    Cell::from(record.wager().to_string()),
                    Cell::from(result.to_string()).style(Style::default().fg(result_color)),
                    Cell::from(record.moves().to_string()),
                    Cell::from(played),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(6),
            Constraint::Percentage(25),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Min(16),
        ];

        let table = Table::new(rows, widths).header(header).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Recent Matches (20 most recent)"),
        );
        frame.render_widget(table, chunks[2]);

        let help = Paragraph::new("Esc / b: Back to Lobby | q: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    #[instrument(skip(self, key, _service))]
    fn handle_key(&mut self, key: KeyEvent, _service: &mut AccountService) -> ScreenTransition {
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => {
                info!("Returning to main lobby from history");
                ScreenTransition::GoToMainLobby
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
