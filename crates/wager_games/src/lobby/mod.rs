//! Lobby: multi-screen TUI around the session controller.

mod controller;
mod screen;
mod screens;

pub use controller::LobbyController;
pub use screen::{Screen, ScreenTransition};
