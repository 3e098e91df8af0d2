//! Transition model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A directed edge between two named statuses within a circuit.
///
/// Transitions are scoped to one circuit but are not owned by any step;
/// they are removed first during a cascade delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transition {
    /// Unique identifier for the transition
    pub id: u64,

    /// ID of the circuit this transition belongs to
    pub circuit_id: u64,

    /// Status a document leaves when taking this edge
    pub from_status: String,

    /// Status a document arrives at when taking this edge
    pub to_status: String,

    /// Timestamp when the transition was defined (UTC)
    pub created_at: Timestamp,
}
