//! Wager Games - CLI entry point
//!
//! Runs the lobby TUI or one of the account maintenance commands.

#![warn(missing_docs)]

mod cli;

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use tracing::{error, info, instrument};
use tracing_subscriber::EnvFilter;
use wager_games::{AccountService, AppConfig, JsonStore, Tier};

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info,wager_games=debug";

/// Log file written inside the data directory while the TUI owns the terminal.
const LOG_FILE: &str = "wager_games.log";

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)?;
    if let Some(data_dir) = cli.data_dir.clone() {
        config = config.with_data_dir(data_dir);
    }

    init_tracing(&cli.command, config.data_dir())?;

    let result = run(cli.command, &config);
    if let Err(e) = &result {
        error!(error = %e, "Fatal error");
    }
    result
}

/// Sends logs to a file for the TUI and to stderr otherwise.
fn init_tracing(command: &Command, data_dir: &Path) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    if matches!(command, Command::Play) {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;
        let log_file = std::fs::File::create(data_dir.join(LOG_FILE))?;
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::sync::Arc::new(log_file))
            .with_ansi(false)
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
    Ok(())
}

/// Opens the store and dispatches the command.
#[instrument(skip(config), fields(data_dir = %config.data_dir().display()))]
fn run(command: Command, config: &AppConfig) -> Result<()> {
    let store = JsonStore::new(config.data_dir().clone());
    let mut service = AccountService::open(Box::new(store), config.ledger_config())?;
    info!(
        accounts = service.list_accounts().len(),
        "Account service ready"
    );

    match command {
        Command::Play => wager_games::run_lobby(service),
        Command::Accounts => {
            list_accounts(&service);
            Ok(())
        }
        Command::History { user } => show_history(&service, user.as_deref()),
        Command::CreateAccount { name, tier } => create_account(&mut service, &name, tier),
        Command::Leaderboard => {
            show_leaderboard(&service);
            Ok(())
        }
        Command::Clear { yes } => {
            if !yes {
                bail!("Refusing to delete all data without --yes");
            }
            service.clear_data()?;
            println!("All accounts and matches deleted");
            Ok(())
        }
    }
}

fn list_accounts(service: &AccountService) {
    if service.list_accounts().is_empty() {
        println!("No accounts");
        return;
    }
    println!("{:<20} {:>8} {:<10} {:>6}", "Account", "Rating", "Tier", "Games");
    for account in service.list_accounts() {
        println!(
            "{:<20} {:>8} {:<10} {:>6}",
            account.username(),
            account.rating(),
            account.tier().to_string(),
            account.games_count()
        );
    }
}

fn show_history(service: &AccountService, user: Option<&str>) -> Result<()> {
    let matches: Vec<_> = match user {
        Some(name) => {
            if service.account(name).is_none() {
                bail!("Unknown account: {}", name);
            }
            let stats = service.stats(name);
            println!(
                "{}: {} games, {} wins, {} losses, {} draws ({:.1}%)",
                name,
                stats.total_games(),
                stats.wins(),
                stats.losses(),
                stats.draws(),
                stats.win_rate()
            );
            service.history(name)
        }
        None => service.ledger().history().iter().rev().collect(),
    };

    if matches.is_empty() {
        println!("No matches");
        return Ok(());
    }
    for record in matches {
        let played = record
            .played_at()
            .as_ref()
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!(
            "#{:<5} {} vs {}  {}  wager {}  {}  {} moves  {}",
            record.index(),
            record.first(),
            record.second(),
            record.kind(),
            record.wager(),
            record.result(),
            record.moves(),
            played
        );
    }
    Ok(())
}

fn create_account(service: &mut AccountService, name: &str, tier: Tier) -> Result<()> {
    let account = service.create_account(name, tier)?;
    println!(
        "Created {} ({}) with rating {}",
        account.username(),
        account.tier(),
        account.rating()
    );
    Ok(())
}

fn show_leaderboard(service: &AccountService) {
    for (rank, account) in service.leaderboard().into_iter().enumerate() {
        println!(
            "{:>3}. {:<20} {:>8} {}",
            rank + 1,
            account.username(),
            account.rating(),
            account.tier()
        );
    }
}
