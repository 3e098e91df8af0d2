//! Circuit summary types with dependency statistics.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::CircuitStatus;

/// Summary information about a circuit with step and dependency counts.
///
/// Backed by the `circuit_summaries` / `all_circuit_summaries` views so list
/// displays can show at a glance whether a circuit is safe to remove.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitSummary {
    /// Circuit ID
    pub id: u64,
    /// Human-readable unique key
    pub key: String,
    /// Title of the circuit
    pub title: String,
    /// Detailed multi-line description of the circuit
    pub description: Option<String>,
    /// Circuit status
    pub status: CircuitStatus,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Last update timestamp
    pub updated_at: Timestamp,
    /// Total number of owned steps
    pub total_steps: u32,
    /// Number of documents currently routed through the circuit
    pub live_documents: u32,
    /// Number of unresolved approvals
    pub pending_approvals: u32,
}

impl CircuitSummary {
    /// Whether deletion would currently be refused without a force override.
    pub fn has_hard_blocker(&self) -> bool {
        self.pending_approvals > 0
    }
}
