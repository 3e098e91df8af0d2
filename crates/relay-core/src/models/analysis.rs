//! Ephemeral shapes produced by dependency analysis.
//!
//! Everything in this module is computed per request and never persisted.

use serde::{Deserialize, Serialize};

/// Categories of dependent data inspected before a circuit is deleted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    /// Documents currently routed through the circuit
    Documents,
    /// Steps owned by the circuit
    Steps,
    /// Unresolved approvals gating documents in the circuit
    Approvals,
    /// Transitions defined between the circuit's statuses
    Transitions,
}

impl DependencyKind {
    /// All categories in the order they are analyzed and reported.
    pub const ALL: [DependencyKind; 4] = [
        DependencyKind::Documents,
        DependencyKind::Steps,
        DependencyKind::Approvals,
        DependencyKind::Transitions,
    ];

    /// Stable lowercase name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyKind::Documents => "documents",
            DependencyKind::Steps => "steps",
            DependencyKind::Approvals => "approvals",
            DependencyKind::Transitions => "transitions",
        }
    }
}

/// One category of dependent data found for one circuit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyRecord {
    /// Which category of dependent data this record describes
    pub kind: DependencyKind,

    /// Number of dependent rows found (zero when the query itself failed)
    pub count: u64,

    /// Operator-readable description naming the circuit
    pub description: String,

    /// Whether a forced deletion may proceed past this record.
    /// Pending approvals are the sole category for which this is false.
    pub can_force_delete: bool,

    /// Sample references of the dependent rows, for operator legibility
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl DependencyRecord {
    /// Whether this record denies deletion without a force override.
    pub fn is_blocking(&self) -> bool {
        !self.can_force_delete
    }
}

/// Aggregated outcome of analyzing a batch of circuits.
///
/// `warnings` and `suggestions` are derived text for the reporting layer;
/// only `dependencies` feeds the deletion policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyAnalysisResult {
    /// All reportable dependency records across the analyzed circuits
    pub dependencies: Vec<DependencyRecord>,

    /// True iff any record denies deletion without a force override
    pub has_blocking_dependencies: bool,

    /// True iff an unforced deletion would be allowed
    pub can_delete: bool,

    /// Operator-facing warnings (blocked categories, failed checks)
    pub warnings: Vec<String>,

    /// Operator-facing suggestions (deactivate instead, resolve approvals)
    pub suggestions: Vec<String>,
}

impl DependencyAnalysisResult {
    /// Assembles a result from collected records and derived text, computing
    /// the blocking flags.
    pub fn from_parts(
        dependencies: Vec<DependencyRecord>,
        warnings: Vec<String>,
        suggestions: Vec<String>,
    ) -> Self {
        let has_blocking_dependencies = dependencies.iter().any(DependencyRecord::is_blocking);
        Self {
            dependencies,
            has_blocking_dependencies,
            can_delete: !has_blocking_dependencies,
            warnings,
            suggestions,
        }
    }

    /// Total dependent rows across all records.
    pub fn total_count(&self) -> u64 {
        self.dependencies.iter().map(|d| d.count).sum()
    }

    /// Records that deny deletion without a force override.
    pub fn blocking(&self) -> impl Iterator<Item = &DependencyRecord> {
        self.dependencies.iter().filter(|d| d.is_blocking())
    }
}
