//! Step model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Represents one ordered stage of a circuit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    /// Unique identifier for the step
    pub id: u64,

    /// ID of the owning circuit
    pub circuit_id: u64,

    /// Key of the step, unique within its circuit (e.g. "MANAGER-REVIEW")
    pub key: String,

    /// Name of the role responsible for acting on documents at this step
    pub role: Option<String>,

    /// Order of the step within the circuit (0-indexed, unique per circuit)
    pub order: u32,

    /// Whether documents reaching this step have finished the circuit
    pub is_final: bool,

    /// Timestamp when the step was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the step was last updated (UTC)
    pub updated_at: Timestamp,
}
