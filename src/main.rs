//! Parlor - demo command loop
//!
//! Drives the session lifecycle controller from the shell, standing in
//! for the webhook transport.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use parlor::{AppConfig, GameService, SessionStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config)?;
    let store = SessionStore::new(config.database_url().clone())?;
    store.run_migrations()?;
    let service = GameService::new(store, config.base_url().clone());

    info!("Service ready");

    let reply = match cli.command {
        Command::Start { game, user } => service.start(game.into(), &user)?,
        Command::Status { game, user } => service.status(game.into(), &user)?,
        Command::Move { user, cell } => service.place(&user, cell)?,
        Command::Guess { user, letter } => service.guess(&user, letter)?,
        Command::Send { game, user, text } => service.dispatch(game.into(), &user, &text)?,
        Command::Ping => GameService::ping(),
        Command::Board { token } => {
            let board = service
                .board_for_token(&token)
                .map_err(|e| anyhow::anyhow!("Could not get the state: {e}"))?;
            println!("{}", board.display());
            return Ok(());
        }
    };

    println!("{}", reply.text());
    if let Some(snapshot) = reply.snapshot() {
        println!("Snapshot: {snapshot}");
    }

    Ok(())
}
