//! Terminal front end: setup/teardown, board rendering and key mapping.

mod board;
mod input;
mod terminal;

pub use board::draw_session;
pub use input::key_to_event;
pub use terminal::{CrosstermInput, TerminalRenderer};

use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info, instrument};

use crate::{AccountService, LobbyController};

/// Terminal type used by the lobby.
pub type Term = Terminal<CrosstermBackend<Stdout>>;

/// Runs the lobby until the user quits, restoring the terminal afterwards.
#[instrument(skip(service))]
pub fn run_lobby(service: AccountService) -> Result<()> {
    info!("Starting lobby TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut controller = LobbyController::new(service);
    let res = controller.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = %err, "Lobby exited with error");
    }
    res
}
