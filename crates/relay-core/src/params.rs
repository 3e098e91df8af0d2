//! Parameter structures for Relay operations
//!
//! Shared parameter structures used across interfaces (CLI today, other
//! front ends tomorrow) without framework-specific derives. Interface layers
//! wrap these with their own derives (clap, etc.) and convert via `From`,
//! keeping the core types free of UI concerns.

use serde::{Deserialize, Serialize};

/// Generic parameters for operations requiring just an ID.
///
/// Used for operations like show_circuit, deactivate_circuit,
/// activate_circuit, can_deactivate, remove_step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// A batch of circuit identifiers submitted to the safety engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CircuitIds {
    /// The IDs of the circuits to inspect or delete
    pub ids: Vec<u64>,
}

/// Parameters for creating a new circuit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCircuit {
    /// Unique human-readable key of the circuit (required)
    pub key: String,
    /// Title of the circuit (required)
    pub title: String,
    /// Optional detailed description of the circuit
    pub description: Option<String>,
}

/// Parameters for listing circuits.
///
/// Controls whether to show inactive circuits alongside active ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListCircuits {
    /// Whether to include deactivated circuits
    #[serde(default)]
    pub include_inactive: bool,
}

/// Parameters for adding a step to a circuit.
///
/// The step is appended after the circuit's current last step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepCreate {
    /// ID of the circuit to add the step to
    pub circuit_id: u64,
    /// Key of the step, unique within the circuit
    pub key: String,
    /// Optional name of the responsible role
    pub role: Option<String>,
    /// Whether documents reaching this step have finished the circuit
    #[serde(default)]
    pub is_final: bool,
}

/// Parameters for defining a transition between two circuit statuses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransitionCreate {
    /// ID of the circuit the transition belongs to
    pub circuit_id: u64,
    /// Status a document leaves when taking this edge
    pub from_status: String,
    /// Status a document arrives at when taking this edge
    pub to_status: String,
}

/// Parameters for routing a document into a circuit.
///
/// Written on behalf of the document-editing workflow; the engine itself
/// only observes assignments as dependency counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentAssign {
    /// ID of the circuit the document enters
    pub circuit_id: u64,
    /// External reference of the document
    pub reference: String,
}

/// Parameters for opening an approval on a circuit step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApprovalCreate {
    /// ID of the circuit the decision belongs to
    pub circuit_id: u64,
    /// Optional ID of the step the decision gates
    pub step_id: Option<u64>,
    /// External reference of the gated document
    pub document_ref: String,
}

/// Caller intent for a deletion request. Not persisted state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DeleteOptions {
    /// Proceed even when blocking dependencies exist
    #[serde(default)]
    pub force_delete: bool,
    /// Remove dependent records in safe order before each circuit;
    /// without this a plain delete is attempted and may fail naturally
    #[serde(default)]
    pub cascade_delete: bool,
    /// Attempt a best-effort backup snapshot before any destructive action
    #[serde(default)]
    pub backup_before_delete: bool,
}

/// Parameters for deleting a batch of circuits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteCircuits {
    /// The IDs of the circuits to delete
    pub ids: Vec<u64>,
    /// Caller-supplied force/cascade/backup intent
    #[serde(default)]
    pub options: DeleteOptions,
}
