//! Command-line interface for wager_games.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use wager_games::Tier;

/// Wager Games - tic-tac-toe with persistent wager-based ratings
#[derive(Parser, Debug)]
#[command(name = "wager_games")]
#[command(about = "Console tic-tac-toe with wager-based player ratings", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults are used if it does not exist)
    #[arg(long, global = true, default_value = "wager_games.toml")]
    pub config: PathBuf,

    /// Override the data directory from the config file
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the lobby TUI (profiles, matches, history, leaderboard)
    Play,

    /// List every account with rating and tier
    Accounts,

    /// Show settled matches, optionally for one account
    History {
        /// Only matches this account played
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Create an account
    CreateAccount {
        /// Unique username
        name: String,

        /// Account tier
        #[arg(short, long, value_enum, default_value_t = Tier::Basic)]
        tier: Tier,
    },

    /// Show accounts ranked by rating
    Leaderboard,

    /// Delete every account and match
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}
