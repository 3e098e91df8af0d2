//! Core library for the Relay workflow circuit engine.
//!
//! This crate provides the lifecycle safety engine for workflow circuits:
//! dependency analysis, deletion policy, cascade deletion, bulk coordination
//! with per-circuit failure isolation, best-effort pre-deletion backups, and
//! the activation guard for deactivation toggles. It also carries the
//! surrounding administration surface (circuit, step, and transition
//! management) over an embedded SQLite store.
//!
//! # Display Architecture
//!
//! The crate implements a Display-based architecture for formatting output:
//!
//! - **Domain Models** ([`models`]): Implement [`std::fmt::Display`] for
//!   direct formatting
//! - **Display Wrappers** ([`display`]): Provide contextual and specialized
//!   formatting (analysis reports, deletion outcomes, collections)
//!
//! This separation lets the same data render differently depending on
//! context while keeping presentation out of the engine.
//!
//! # Quick Start
//!
//! ```rust
//! use relay_core::{params::CreateCircuit, RelayBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create an engine instance
//! let relay = RelayBuilder::new()
//!     .with_database_path(Some("relay.db"))
//!     .build()
//!     .await?;
//!
//! // Create a circuit
//! let circuit = relay
//!     .create_circuit(&CreateCircuit {
//!         key: "INVOICE-VALIDATION".to_string(),
//!         title: "Invoice validation".to_string(),
//!         description: Some("Three-step invoice review".to_string()),
//!     })
//!     .await?;
//! println!("Created circuit: {}", circuit);
//!
//! // Pre-flight check before deleting
//! use relay_core::params::CircuitIds;
//! let check = relay
//!     .validate_deletion(&CircuitIds { ids: vec![circuit.id] })
//!     .await?;
//! println!("Deletable: {}", check.can_delete);
//! # Ok(())
//! # }
//! ```

pub mod backup;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod policy;
pub mod relay;

// Re-export commonly used types
pub use backup::Snapshotter;
pub use db::Database;
pub use display::{
    AnalysisReport, CircuitSummaries, CreateResult, DeletionReport, LocalDateTime,
    OperationStatus, Steps, ValidationNotice,
};
pub use error::{RelayError, Result};
pub use models::{
    BackupSnapshot, Circuit, CircuitStatus, CircuitSummary, DeactivationCheck, DeletionCheck,
    DeletionResult, DependencyAnalysisResult, DependencyKind, DependencyRecord, Step, Transition,
};
pub use params::{
    ApprovalCreate, CircuitIds, CreateCircuit, DeleteCircuits, DeleteOptions, DocumentAssign, Id,
    ListCircuits, StepCreate, TransitionCreate,
};
pub use policy::{decide, PolicyDecision};
pub use relay::{DependencySource, Relay, RelayBuilder};
