//! Circuit model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{CircuitStatus, Step, Transition};

/// Represents a complete workflow circuit with metadata, steps, and
/// transitions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Circuit {
    /// Unique identifier for the circuit
    pub id: u64,

    /// Human-readable unique key (e.g. "INVOICE-VALIDATION")
    pub key: String,

    /// Title of the circuit
    pub title: String,

    /// Detailed multi-line description of the circuit
    pub description: Option<String>,

    /// Status of the circuit (active or inactive)
    #[serde(default)]
    pub status: CircuitStatus,

    /// Timestamp when the circuit was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the circuit was last modified (UTC)
    pub updated_at: Timestamp,

    /// Owned steps in order (lazy-loaded by default)
    #[serde(default)]
    pub steps: Vec<Step>,

    /// Transitions defined between the circuit's statuses
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transitions: Vec<Transition>,
}
