//! Status enumerations for circuits, documents, and approvals.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of circuit statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CircuitStatus {
    /// Circuit is active and accepts new documents
    #[default]
    Active,

    /// Circuit is deactivated (soft-deleted) and hidden from normal views
    Inactive,
}

impl FromStr for CircuitStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(CircuitStatus::Active),
            "inactive" => Ok(CircuitStatus::Inactive),
            _ => Err(format!("Invalid circuit status: {s}")),
        }
    }
}

impl CircuitStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            CircuitStatus::Active => "active",
            CircuitStatus::Inactive => "inactive",
        }
    }
}

/// State of a document assignment as observed by the engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DocumentState {
    /// Document is routed through the circuit and counts as a dependency
    InProgress,

    /// Document finished the circuit; no longer a live assignment
    Completed,
}

impl FromStr for DocumentState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in_progress" | "inprogress" => Ok(DocumentState::InProgress),
            "completed" => Ok(DocumentState::Completed),
            _ => Err(format!("Invalid document state: {s}")),
        }
    }
}

impl DocumentState {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentState::InProgress => "in_progress",
            DocumentState::Completed => "completed",
        }
    }
}

/// State of an approval gating a document's progress through a step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalState {
    /// Decision has not been made; blocks circuit deletion
    Pending,

    /// Decision was recorded; no longer blocking
    Resolved,
}

impl FromStr for ApprovalState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ApprovalState::Pending),
            "resolved" => Ok(ApprovalState::Resolved),
            _ => Err(format!("Invalid approval state: {s}")),
        }
    }
}

impl ApprovalState {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalState::Pending => "pending",
            ApprovalState::Resolved => "resolved",
        }
    }
}
