//! Session controller: drives one match from empty board to settlement.
//!
//! Each iteration evaluates the board, renders it, and either settles the
//! finished match or blocks for one input event. Rendering and input are
//! collaborators behind the [`Renderer`] and [`InputSource`] traits so the
//! loop can be driven by a terminal or by a script.

use derive_getters::Getters;
use derive_more::{Display, Error};
use tracing::{debug, info, instrument};
use wager_tictactoe::{Board, Cursor, Engine, GameStatus, MoveOutcome, Position, Turn};

use crate::{AccountService, Match, MatchResult, ServiceError, Settlement};

/// A discrete input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Move the cursor one row up.
    Up,
    /// Move the cursor one row down.
    Down,
    /// Move the cursor one column left.
    Left,
    /// Move the cursor one column right.
    Right,
    /// Place a mark under the cursor.
    Confirm,
    /// Move the cursor to a square and place a mark there.
    Place(Position),
}

/// Snapshot handed to the renderer.
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    board: &'a Board,
    cursor: Cursor,
    turn: Turn,
    status: &'a GameStatus,
    record: &'a Match,
}

impl<'a> BoardView<'a> {
    /// Current board.
    pub fn board(&self) -> &'a Board {
        self.board
    }

    /// Cursor position.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Whose turn it is.
    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// Board status.
    pub fn status(&self) -> &'a GameStatus {
        self.status
    }

    /// The match being played.
    pub fn record(&self) -> &'a Match {
        self.record
    }

    /// Name of the account whose turn it is.
    pub fn active_player(&self) -> &str {
        match self.turn {
            Turn::First => self.record.first(),
            Turn::Second => self.record.second(),
        }
    }

    /// One-line status text for the current state.
    pub fn status_text(&self) -> String {
        match self.status {
            GameStatus::InProgress => format!(
                "{} to move ({})",
                self.active_player(),
                self.turn.mark()
            ),
            GameStatus::Won { winner, line } => {
                let name = match winner {
                    wager_tictactoe::Player::X => self.record.first(),
                    wager_tictactoe::Player::O => self.record.second(),
                };
                format!("{} wins with {} on {}", name, winner, line)
            }
            GameStatus::Draw => "Draw - the board is full".to_string(),
        }
    }
}

/// Draws the current state of a session.
pub trait Renderer {
    /// Renders one frame.
    fn render(&mut self, view: &BoardView<'_>) -> Result<(), SessionError>;
}

/// Produces input events, blocking until one is available.
pub trait InputSource {
    /// Waits for the next event.
    fn next_event(&mut self) -> Result<InputEvent, SessionError>;
}

/// Error that ends a session before settlement.
#[derive(Debug, Display, Error)]
pub enum SessionError {
    /// Terminal or input I/O failed.
    #[display("Session I/O error: {_0}")]
    Io(std::io::Error),
    /// Settlement or persistence failed.
    #[display("{_0}")]
    Service(ServiceError),
    /// The input source has no more events.
    #[display("Input closed before the match finished")]
    InputClosed,
}

impl SessionError {
    /// True when settlement hit a ledger integrity fault.
    pub fn is_integrity_fault(&self) -> bool {
        matches!(self, Self::Service(e) if e.is_integrity_fault())
    }
}

impl From<std::io::Error> for SessionError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ServiceError> for SessionError {
    fn from(err: ServiceError) -> Self {
        Self::Service(err)
    }
}

/// Outcome of a completed session.
#[derive(Debug, Clone, Getters)]
pub struct SessionReport {
    record: Match,
    settlement: Settlement,
    board: Board,
    status: GameStatus,
}

/// Drives one match.
#[derive(Debug, Clone, Getters)]
pub struct SessionController {
    engine: Engine,
    cursor: Cursor,
    record: Match,
}

impl SessionController {
    /// Starts a session on an empty board for an opened match.
    #[instrument(skip(record), fields(index = %record.index()))]
    pub fn new(record: Match) -> Self {
        info!(first = %record.first(), second = %record.second(), "Session started");
        Self {
            engine: Engine::new(),
            cursor: Cursor::at(Position::Center),
            record,
        }
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> BoardView<'_> {
        BoardView {
            board: self.engine.board(),
            cursor: self.cursor,
            turn: self.engine.turn(),
            status: self.engine.status(),
            record: &self.record,
        }
    }

    /// Applies one input event.
    ///
    /// Cursor moves off the board are ignored. Returns the move outcome when
    /// the event tried to place a mark.
    #[instrument(skip(self))]
    pub fn handle(&mut self, event: InputEvent) -> Option<MoveOutcome> {
        match event {
            InputEvent::Up => {
                self.cursor.shift(-1, 0);
                None
            }
            InputEvent::Down => {
                self.cursor.shift(1, 0);
                None
            }
            InputEvent::Left => {
                self.cursor.shift(0, -1);
                None
            }
            InputEvent::Right => {
                self.cursor.shift(0, 1);
                None
            }
            InputEvent::Confirm => Some(self.engine.attempt_move(self.cursor.position())),
            InputEvent::Place(pos) => {
                self.cursor = Cursor::at(pos);
                Some(self.engine.attempt_move(pos))
            }
        }
    }

    /// Runs the session loop until the board is terminal, then fixes the
    /// match result and settles it through the service.
    ///
    /// # Errors
    ///
    /// Renderer or input failures end the session without settlement.
    /// Settlement errors are passed through; integrity faults among them are
    /// meant to stop the program.
    #[instrument(skip_all, fields(index = %self.record.index()))]
    pub fn run<R: Renderer, I: InputSource>(
        mut self,
        service: &mut AccountService,
        renderer: &mut R,
        input: &mut I,
    ) -> Result<SessionReport, SessionError> {
        loop {
            self.engine.evaluate();
            renderer.render(&self.view())?;

            if self.engine.is_terminal() {
                let status = *self.engine.status();
                let result = MatchResult::from_status(&status);
                let moves = self.engine.history().len() as u32;
                self.record.resolve(result, moves);
                info!(result = %result, moves, "Match finished");

                let settlement = service.record_match(&self.record)?;
                return Ok(SessionReport {
                    record: self.record,
                    settlement,
                    board: self.engine.board().clone(),
                    status,
                });
            }

            let event = input.next_event()?;
            debug!(?event, "Input received");
            self.handle(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameKind;
    use crate::MatchIndex;

    fn controller() -> SessionController {
        SessionController::new(Match::new(
            MatchIndex::from(0),
            "alice".to_string(),
            "bob".to_string(),
            10,
            GameKind::Ranked,
        ))
    }

    #[test]
    fn test_cursor_starts_centered() {
        assert_eq!(controller().cursor().position(), Position::Center);
    }

    #[test]
    fn test_cursor_clamped_at_top() {
        let mut session = controller();
        session.handle(InputEvent::Up);
        session.handle(InputEvent::Up);
        assert_eq!(session.cursor().position(), Position::TopCenter);
    }

    #[test]
    fn test_confirm_places_under_cursor() {
        let mut session = controller();
        session.handle(InputEvent::Left);
        let outcome = session.handle(InputEvent::Confirm);
        assert!(matches!(outcome, Some(MoveOutcome::Placed { .. })));
        assert_eq!(
            session.engine().board().get(Position::MiddleLeft),
            wager_tictactoe::Square::Occupied(wager_tictactoe::Player::X)
        );
    }

    #[test]
    fn test_status_text_names_active_player() {
        let mut session = controller();
        assert_eq!(session.view().status_text(), "alice to move (X)");
        session.handle(InputEvent::Confirm);
        assert_eq!(session.view().status_text(), "bob to move (O)");
    }
}
