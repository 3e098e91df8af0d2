//! High-level engine API for circuit lifecycle management.
//!
//! This module provides the main [`Relay`] interface. The engine is an
//! explicit struct built by [`RelayBuilder`] with its store location and
//! backup directory injected; there is no global instance.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌──────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │  Lifecycle ops   │    │  Safety engine   │    │    Database     │
//! │ (circuit_ops,    │───▶│ (analysis,       │───▶│   (via db/)     │
//! │  step_ops, ...)  │    │  deletion)       │    │                 │
//! └──────────────────┘    └──────────────────┘    └─────────────────┘
//!    Administration         Decision logic          Data persistence
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Relay`] instances with configuration
//! - [`circuit_ops`]: Circuit administration (create, list, activate, deactivate)
//! - [`step_ops`]: Step administration (add, list, remove)
//! - [`routing_ops`]: Records written on behalf of the document workflow
//! - [`analysis`]: Dependency analysis, pre-flight validation, activation guard
//! - [`deletion`]: Cascade dispatch and the bulk deletion coordinator
//!
//! All operations are async; blocking store calls run in
//! `tokio::task::spawn_blocking` with a fresh connection per operation.
//!
//! # Usage
//!
//! ```rust,no_run
//! use relay_core::{params::CreateCircuit, RelayBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let relay = RelayBuilder::new()
//!     .with_database_path(Some("relay.db"))
//!     .build()
//!     .await?;
//!
//! let circuit = relay
//!     .create_circuit(&CreateCircuit {
//!         key: "INVOICE-VALIDATION".to_string(),
//!         title: "Invoice validation".to_string(),
//!         description: None,
//!     })
//!     .await?;
//! println!("Created circuit: {}", circuit.key);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

pub mod analysis;
pub mod builder;
pub mod circuit_ops;
pub mod deletion;
pub mod routing_ops;
pub mod step_ops;

#[cfg(test)]
mod tests;

pub use analysis::DependencySource;
pub use builder::RelayBuilder;

/// Main engine interface for managing circuits and their lifecycle.
pub struct Relay {
    pub(crate) db_path: PathBuf,
    pub(crate) backup_dir: PathBuf,
}

impl Relay {
    /// Creates a new engine with the specified database path and backup
    /// directory.
    pub(crate) fn new(db_path: PathBuf, backup_dir: PathBuf) -> Self {
        Self {
            db_path,
            backup_dir,
        }
    }
}
