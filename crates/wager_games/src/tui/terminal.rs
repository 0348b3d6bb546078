//! Terminal-backed session collaborators.

use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, instrument};

use crate::tui::{Term, draw_session, key_to_event};
use crate::{BoardView, InputEvent, InputSource, Renderer, SessionError};

/// Renders session frames to the terminal.
pub struct TerminalRenderer<'t> {
    terminal: &'t mut Term,
}

impl<'t> TerminalRenderer<'t> {
    /// Wraps an initialised terminal.
    pub fn new(terminal: &'t mut Term) -> Self {
        Self { terminal }
    }
}

impl Renderer for TerminalRenderer<'_> {
    fn render(&mut self, view: &BoardView<'_>) -> Result<(), SessionError> {
        self.terminal.draw(|frame| draw_session(frame, view))?;
        Ok(())
    }
}

/// Blocking keyboard input from crossterm.
#[derive(Debug, Default)]
pub struct CrosstermInput;

impl InputSource for CrosstermInput {
    #[instrument(skip(self))]
    fn next_event(&mut self) -> Result<InputEvent, SessionError> {
        loop {
            if let Event::Key(key) = event::read()? {
                // crossterm reports both press and release on some platforms
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(input) = key_to_event(key.code) {
                    return Ok(input);
                }
                debug!(code = ?key.code, "Unmapped key ignored");
            }
        }
    }
}
