//! Display formatting functions and result types.
//!
//! Domain models implement `Display` directly (markdown output); this module
//! adds newtype wrappers for collections and operation outcomes so the same
//! data can be rendered with context-appropriate framing: a created circuit,
//! an analysis report, a mixed-outcome deletion summary.
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (CircuitSummaries, Steps)
//! - [`results`]: Operation result types (CreateResult, AnalysisReport,
//!   ValidationNotice, DeletionReport)
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{CircuitSummaries, Steps};
pub use datetime::LocalDateTime;
pub use results::{AnalysisReport, CreateResult, DeletionReport, ValidationNotice};
pub use status::OperationStatus;
