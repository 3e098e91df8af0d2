use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{CircuitCommands, StepCommands, TransitionCommands};

/// Main command-line interface for the Relay circuit engine
///
/// Relay manages workflow circuits: ordered sets of steps that documents
/// move through. Beyond circuit and step administration it provides the
/// lifecycle safety engine — dependency analysis, guarded deactivation, and
/// batch deletion with cascade, force, and backup options.
#[derive(Parser)]
#[command(version, about, name = "rly")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/relay/relay.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Directory for pre-deletion backup snapshots. Defaults to
    /// $XDG_DATA_HOME/relay/backups
    #[arg(long, global = true)]
    pub backup_dir: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Relay CLI
///
/// The CLI is organized into three command categories:
/// - `circuit`: Circuit lifecycle (create, list, analyze, delete, toggles)
/// - `step`: Steps within a circuit (add, list, remove)
/// - `transition`: Status transitions of a circuit (add, list)
#[derive(Subcommand)]
pub enum Commands {
    /// Manage circuits and their lifecycle
    #[command(alias = "c")]
    Circuit {
        #[command(subcommand)]
        command: CircuitCommands,
    },
    /// Manage steps within circuits
    #[command(alias = "s")]
    Step {
        #[command(subcommand)]
        command: StepCommands,
    },
    /// Manage status transitions within circuits
    #[command(alias = "t")]
    Transition {
        #[command(subcommand)]
        command: TransitionCommands,
    },
}
