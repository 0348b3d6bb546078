//! Match summary screen: shown once a session has been settled.

use crossterm::event::KeyEvent;
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use tracing::{info, instrument};

use crate::lobby::screen::{Screen, ScreenTransition};
use crate::{
    AccountService, GameStatus, Match, Player, RatingChange, SessionReport, Settlement,
};

/// State for the match summary screen.
#[derive(Debug, Getters)]
pub struct MatchSummaryScreen {
    record: Match,
    settlement: Settlement,
    headline: String,
}

impl MatchSummaryScreen {
    /// Builds the summary from a finished session.
    #[instrument(skip(report), fields(index = %report.record().index()))]
    pub fn new(report: SessionReport) -> Self {
        let record = report.record().clone();
        let headline = match report.status() {
            GameStatus::Won { winner, line } => {
                let name = match winner {
                    Player::X => record.first(),
                    Player::O => record.second(),
                };
                format!("{} wins with {} on {}", name, winner, line)
            }
            GameStatus::Draw => "Draw".to_string(),
            GameStatus::InProgress => "Unfinished".to_string(),
        };
        info!(headline = %headline, "Showing match summary");
        Self {
            record,
            settlement: report.settlement().clone(),
            headline,
        }
    }

    fn change_line(change: &RatingChange) -> Line<'static> {
        let delta = change.delta();
        let sign = if delta > 0 { "+" } else { "" };
        Line::from(format!(
            "{}: {} -> {} ({}{})",
            change.username(),
            change.before(),
            change.after(),
            sign,
            delta
        ))
    }
}

impl Screen for MatchSummaryScreen {
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

        let title = Paragraph::new(format!("Match #{} Finished", self.record.index()))
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let headline = Paragraph::new(self.headline.as_str())
            .style(
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(headline, chunks[1]);

        let mut lines = vec![
            Line::from(format!(
                "{} vs {}   {} match   wager {}   {} moves",
                self.record.first(),
                self.record.second(),
                self.record.kind(),
                self.record.wager(),
                self.record.moves()
            )),
            Line::from(""),
        ];
        match &self.settlement {
            Settlement::Applied { first, second } => {
                lines.push(Self::change_line(first));
                lines.push(Self::change_line(second));
            }
            Settlement::AlreadySettled => {
                lines.push(Line::from("Match was already settled; ratings unchanged"));
            }
        }
        let body = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Ratings"));
        frame.render_widget(body, chunks[2]);

        let help = Paragraph::new("Press any key to return to the lobby")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    fn handle_key(&mut self, _key: KeyEvent, _service: &mut AccountService) -> ScreenTransition {
        ScreenTransition::GoToMainLobby
    }
}
