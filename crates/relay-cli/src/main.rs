//! Relay CLI Application
//!
//! Command-line interface for the Relay workflow circuit engine.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use relay_core::{params::ListCircuits, RelayBuilder};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        backup_dir,
        no_color,
        command,
    } = Args::parse();

    let relay = RelayBuilder::new()
        .with_database_path(database_file)
        .with_backup_dir(backup_dir)
        .build()
        .await
        .context("Failed to initialize circuit engine")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Relay started");

    match command {
        Some(Circuit { command }) => {
            Cli::new(relay, renderer)
                .handle_circuit_command(command)
                .await
        }
        Some(Step { command }) => Cli::new(relay, renderer).handle_step_command(command).await,
        Some(Transition { command }) => {
            Cli::new(relay, renderer)
                .handle_transition_command(command)
                .await
        }
        None => {
            Cli::new(relay, renderer)
                .list_circuits(&ListCircuits {
                    include_inactive: false,
                })
                .await
        }
    }
}
