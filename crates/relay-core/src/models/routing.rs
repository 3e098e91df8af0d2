//! Document assignment and approval models.
//!
//! Both record types are written by the document-editing workflow, an
//! external collaborator; the engine observes them as dependency counts and
//! removes approvals during cascade deletion. Document assignments are never
//! removed by the engine.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{ApprovalState, DocumentState};

/// A document currently or previously routed through a circuit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentAssignment {
    /// Unique identifier for the assignment
    pub id: u64,

    /// ID of the circuit the document is routed through
    pub circuit_id: u64,

    /// External reference of the document (e.g. "INV-2031")
    pub reference: String,

    /// Whether the document is still in progress
    pub status: DocumentState,

    /// Timestamp when the document entered the circuit (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the document finished the circuit, if it has
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
}

/// A pending human decision gating a document's advance past a step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Approval {
    /// Unique identifier for the approval
    pub id: u64,

    /// ID of the circuit the decision belongs to
    pub circuit_id: u64,

    /// ID of the step the decision gates, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_id: Option<u64>,

    /// External reference of the gated document
    pub document_ref: String,

    /// Whether the decision is still pending
    pub status: ApprovalState,

    /// Timestamp when the approval was opened (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the approval was resolved, if it has been
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<Timestamp>,
}
