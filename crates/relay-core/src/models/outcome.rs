//! Result shapes for deletion, validation, and backup operations.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Metadata describing a best-effort backup capture.
///
/// The capture payload itself is opaque to the engine; only the metadata
/// travels in results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackupSnapshot {
    /// Name of the written backup file
    pub filename: String,

    /// Size of the written payload in bytes
    pub size: u64,

    /// Capture timestamp the filename is derived from (UTC)
    pub timestamp: Timestamp,
}

/// Aggregated outcome of a bulk deletion request.
///
/// Invariant: once the coordinator has dispatched the execution stage,
/// `deleted_count + failed_count` equals the number of circuits submitted.
/// A batch-level policy denial instead returns zero counts and the denial
/// reason as the sole error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeletionResult {
    /// True iff at least one circuit was deleted
    pub success: bool,

    /// Number of circuits removed
    pub deleted_count: u64,

    /// Number of circuits that could not be removed
    pub failed_count: u64,

    /// One entry per failure (or the single policy denial reason)
    pub errors: Vec<String>,

    /// Non-fatal observations, including backup failures
    pub warnings: Vec<String>,

    /// Metadata of the pre-deletion backup, when one was written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<BackupSnapshot>,
}

impl DeletionResult {
    /// A batch-level denial: no side effects, the reason is the sole error.
    pub fn denied(reason: String, warnings: Vec<String>) -> Self {
        Self {
            success: false,
            deleted_count: 0,
            failed_count: 0,
            errors: vec![reason],
            warnings,
            backup: None,
        }
    }

    /// Whether some circuits were deleted while others failed.
    pub fn is_partial(&self) -> bool {
        self.deleted_count > 0 && self.failed_count > 0
    }
}

/// Pre-flight verdict on whether a batch of circuits could be deleted
/// without a force override. Read-only; nothing is mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletionCheck {
    /// True iff an unforced deletion would proceed
    pub can_delete: bool,

    /// One entry per blocking dependency record
    pub reasons: Vec<String>,
}

/// Verdict on whether a circuit can be switched to inactive.
///
/// There is deliberately no force path at this layer: deactivation must
/// never strand in-flight documents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeactivationCheck {
    /// True iff no documents are currently routed through the circuit
    pub allowed: bool,

    /// Number of documents currently routed through the circuit
    pub document_count: u64,
}
