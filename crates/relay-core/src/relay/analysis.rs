//! Dependency analysis, pre-flight validation, and the activation guard.
//!
//! The analyzer answers, per circuit, which categories of dependent data
//! exist and whether each blocks deletion. It is written against the narrow
//! [`DependencySource`] trait so the conservative failure path can be tested
//! with a double; the SQLite [`Database`] is the production source.

use futures::{stream, StreamExt};
use log::warn;
use tokio::task;

use super::Relay;
use crate::{
    db::Database,
    error::{RelayError, Result},
    models::{
        Circuit, DeactivationCheck, DeletionCheck, DependencyAnalysisResult, DependencyKind,
        DependencyRecord,
    },
    params::{CircuitIds, Id},
};

/// Bound on concurrently analyzed circuits.
pub(crate) const ANALYSIS_CONCURRENCY: usize = 4;

/// Sample references carried per record for operator legibility.
const DETAIL_SAMPLE_LIMIT: u32 = 5;

/// Referential queries the analyzer needs from a store.
pub trait DependencySource {
    /// Documents currently routed through the circuit.
    fn live_documents(&self, circuit_id: u64) -> Result<u64>;

    /// Steps owned by the circuit.
    fn owned_steps(&self, circuit_id: u64) -> Result<u64>;

    /// Unresolved approvals within the circuit.
    fn pending_approvals(&self, circuit_id: u64) -> Result<u64>;

    /// Transitions defined for the circuit.
    fn defined_transitions(&self, circuit_id: u64) -> Result<u64>;

    /// Sample references for one category; cosmetic, may be empty.
    fn details(&self, kind: DependencyKind, circuit_id: u64, limit: u32) -> Result<Vec<String>> {
        let _ = (kind, circuit_id, limit);
        Ok(Vec::new())
    }
}

impl DependencySource for Database {
    fn live_documents(&self, circuit_id: u64) -> Result<u64> {
        self.count_live_documents(circuit_id)
    }

    fn owned_steps(&self, circuit_id: u64) -> Result<u64> {
        self.count_steps(circuit_id)
    }

    fn pending_approvals(&self, circuit_id: u64) -> Result<u64> {
        self.count_pending_approvals(circuit_id)
    }

    fn defined_transitions(&self, circuit_id: u64) -> Result<u64> {
        self.count_transitions(circuit_id)
    }

    fn details(&self, kind: DependencyKind, circuit_id: u64, limit: u32) -> Result<Vec<String>> {
        self.sample_dependency_details(kind, circuit_id, limit)
    }
}

/// Per-circuit analysis output before batch aggregation.
pub(crate) struct CircuitAnalysis {
    pub records: Vec<DependencyRecord>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Analyzes one circuit against a dependency source.
///
/// Only categories with dependents are recorded, except that a category
/// whose query failed is recorded with a zero count and
/// `can_force_delete = false` so the failure blocks deletion instead of
/// silently permitting it.
pub(crate) fn analyze_circuit(source: &impl DependencySource, circuit: &Circuit) -> CircuitAnalysis {
    let mut records = Vec::new();
    let mut warnings = Vec::new();
    let mut suggestions = Vec::new();

    for kind in DependencyKind::ALL {
        let counted = match kind {
            DependencyKind::Documents => source.live_documents(circuit.id),
            DependencyKind::Steps => source.owned_steps(circuit.id),
            DependencyKind::Approvals => source.pending_approvals(circuit.id),
            DependencyKind::Transitions => source.defined_transitions(circuit.id),
        };

        match counted {
            Ok(0) => {}
            Ok(count) => {
                let details = source
                    .details(kind, circuit.id, DETAIL_SAMPLE_LIMIT)
                    .unwrap_or_default();
                records.push(build_record(kind, count, &circuit.title, details));

                match kind {
                    DependencyKind::Documents => warnings.push(format!(
                        "Deleting circuit '{}' will orphan {count} in-progress document(s)",
                        circuit.title
                    )),
                    DependencyKind::Approvals => {
                        warnings.push(format!(
                            "Circuit '{}' has {count} pending approval(s); deletion is blocked \
                             until they are resolved or the operation is forced",
                            circuit.title
                        ));
                        suggestions.push(format!(
                            "Resolve the pending approvals in circuit '{}' before deleting it",
                            circuit.title
                        ));
                    }
                    DependencyKind::Steps | DependencyKind::Transitions => {}
                }
            }
            Err(e) => {
                warn!(
                    "Dependency check for {} of circuit {} failed: {e}",
                    kind.as_str(),
                    circuit.id
                );
                records.push(DependencyRecord {
                    kind,
                    count: 0,
                    description: format!(
                        "Could not check {} for circuit '{}'",
                        kind.as_str(),
                        circuit.title
                    ),
                    can_force_delete: false,
                    details: Vec::new(),
                });
                warnings.push(format!(
                    "Could not check {} for circuit '{}'; the category is treated as blocking",
                    kind.as_str(),
                    circuit.title
                ));
            }
        }
    }

    if records.iter().any(DependencyRecord::is_blocking) {
        suggestions.push(format!(
            "Deactivate circuit '{}' instead of deleting it to preserve its history",
            circuit.title
        ));
    }

    CircuitAnalysis {
        records,
        warnings,
        suggestions,
    }
}

fn build_record(
    kind: DependencyKind,
    count: u64,
    title: &str,
    details: Vec<String>,
) -> DependencyRecord {
    let (description, can_force_delete) = match kind {
        DependencyKind::Documents => (
            format!("{count} document(s) currently routed through circuit '{title}'"),
            true,
        ),
        DependencyKind::Steps => (format!("{count} step(s) owned by circuit '{title}'"), true),
        // Pending approvals are the sole hard blocker: forceable only when
        // none exist, i.e. never once this record is built.
        DependencyKind::Approvals => (
            format!("{count} pending approval(s) in circuit '{title}'"),
            count == 0,
        ),
        DependencyKind::Transitions => (
            format!("{count} transition(s) defined in circuit '{title}'"),
            true,
        ),
    };

    DependencyRecord {
        kind,
        count,
        description,
        can_force_delete,
        details,
    }
}

impl Relay {
    /// Inspects a batch of circuits and reports which categories of
    /// dependent data exist and whether each blocks deletion. Read-only.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::CircuitNotFound` when any submitted ID does not
    /// exist; analysis of a stale ID is a caller error.
    pub async fn analyze_dependencies(
        &self,
        params: &CircuitIds,
    ) -> Result<DependencyAnalysisResult> {
        let circuits = self.load_circuits(&params.ids).await?;
        self.analyze_loaded(circuits).await
    }

    /// Pre-flight deletion check: a thin wrapper over the analyzer that
    /// reports whether an unforced deletion would proceed, with one reason
    /// per blocking record. Nothing is mutated.
    pub async fn validate_deletion(&self, params: &CircuitIds) -> Result<DeletionCheck> {
        let analysis = self.analyze_dependencies(params).await?;
        Ok(DeletionCheck {
            can_delete: analysis.can_delete,
            reasons: analysis
                .blocking()
                .map(|record| record.description.clone())
                .collect(),
        })
    }

    /// Activation guard: reports whether a circuit can be switched to
    /// inactive. Deactivation is denied whenever documents are routed
    /// through the circuit; no force override exists at this layer.
    pub async fn can_deactivate(&self, params: &Id) -> Result<DeactivationCheck> {
        match self.deactivation_status(params.id).await? {
            Some((_, check)) => Ok(check),
            None => Err(RelayError::CircuitNotFound { id: params.id }),
        }
    }

    /// Shared guard lookup returning the circuit title alongside the check,
    /// or `None` when the circuit does not exist.
    pub(crate) async fn deactivation_status(
        &self,
        id: u64,
    ) -> Result<Option<(String, DeactivationCheck)>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            let circuit = match db.get_circuit(id)? {
                Some(circuit) => circuit,
                None => return Ok(None),
            };
            let document_count = db.count_live_documents(id)?;
            Ok::<_, RelayError>(Some((
                circuit.title,
                DeactivationCheck {
                    allowed: document_count == 0,
                    document_count,
                },
            )))
        })
        .await
        .map_err(|e| RelayError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Loads circuits for a batch operation, failing on the first unknown ID.
    pub(crate) async fn load_circuits(&self, ids: &[u64]) -> Result<Vec<Circuit>> {
        let db_path = self.db_path.clone();
        let ids = ids.to_vec();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            ids.iter()
                .map(|&id| {
                    db.get_circuit(id)?
                        .ok_or(RelayError::CircuitNotFound { id })
                })
                .collect::<Result<Vec<_>>>()
        })
        .await
        .map_err(|e| RelayError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Analyzes already-loaded circuits with bounded parallelism, joining
    /// the per-circuit results in submission order.
    pub(crate) async fn analyze_loaded(
        &self,
        circuits: Vec<Circuit>,
    ) -> Result<DependencyAnalysisResult> {
        let analyses = stream::iter(circuits.into_iter().enumerate().map(|(index, circuit)| {
            let db_path = self.db_path.clone();
            async move {
                let analysis = task::spawn_blocking(move || {
                    let db = Database::new(&db_path)?;
                    Ok::<_, RelayError>(analyze_circuit(&db, &circuit))
                })
                .await
                .map_err(|e| RelayError::Configuration {
                    message: format!("Task join error: {e}"),
                })??;
                Ok::<_, RelayError>((index, analysis))
            }
        }))
        .buffer_unordered(ANALYSIS_CONCURRENCY)
        .collect::<Vec<_>>()
        .await;

        let mut ordered = Vec::with_capacity(analyses.len());
        for analysis in analyses {
            ordered.push(analysis?);
        }
        ordered.sort_by_key(|(index, _)| *index);

        let mut dependencies = Vec::new();
        let mut warnings = Vec::new();
        let mut suggestions = Vec::new();
        for (_, analysis) in ordered {
            dependencies.extend(analysis.records);
            warnings.extend(analysis.warnings);
            suggestions.extend(analysis.suggestions);
        }

        Ok(DependencyAnalysisResult::from_parts(
            dependencies,
            warnings,
            suggestions,
        ))
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::CircuitStatus;

    /// Double with fixed counts and one optionally failing category.
    struct FixedSource {
        documents: u64,
        steps: u64,
        approvals: u64,
        transitions: u64,
        failing: Option<DependencyKind>,
    }

    impl FixedSource {
        fn clean() -> Self {
            Self {
                documents: 0,
                steps: 0,
                approvals: 0,
                transitions: 0,
                failing: None,
            }
        }

        fn answer(&self, kind: DependencyKind, value: u64) -> Result<u64> {
            if self.failing == Some(kind) {
                return Err(RelayError::Configuration {
                    message: "store unavailable".to_string(),
                });
            }
            Ok(value)
        }
    }

    impl DependencySource for FixedSource {
        fn live_documents(&self, _circuit_id: u64) -> Result<u64> {
            self.answer(DependencyKind::Documents, self.documents)
        }

        fn owned_steps(&self, _circuit_id: u64) -> Result<u64> {
            self.answer(DependencyKind::Steps, self.steps)
        }

        fn pending_approvals(&self, _circuit_id: u64) -> Result<u64> {
            self.answer(DependencyKind::Approvals, self.approvals)
        }

        fn defined_transitions(&self, _circuit_id: u64) -> Result<u64> {
            self.answer(DependencyKind::Transitions, self.transitions)
        }
    }

    fn circuit() -> Circuit {
        let ts = Timestamp::from_second(1_700_000_000).unwrap();
        Circuit {
            id: 1,
            key: "INVOICES".to_string(),
            title: "Invoice validation".to_string(),
            description: None,
            status: CircuitStatus::Active,
            created_at: ts,
            updated_at: ts,
            steps: Vec::new(),
            transitions: Vec::new(),
        }
    }

    #[test]
    fn test_clean_circuit_has_no_records() {
        let analysis = analyze_circuit(&FixedSource::clean(), &circuit());
        assert!(analysis.records.is_empty());
        assert!(analysis.warnings.is_empty());
        assert!(analysis.suggestions.is_empty());
    }

    #[test]
    fn test_zero_count_categories_are_omitted() {
        let source = FixedSource {
            steps: 3,
            ..FixedSource::clean()
        };
        let analysis = analyze_circuit(&source, &circuit());
        assert_eq!(analysis.records.len(), 1);
        assert_eq!(analysis.records[0].kind, DependencyKind::Steps);
        assert!(analysis.records[0].can_force_delete);
    }

    #[test]
    fn test_pending_approvals_are_the_sole_blocker() {
        let source = FixedSource {
            documents: 4,
            steps: 3,
            approvals: 2,
            transitions: 5,
            failing: None,
        };
        let analysis = analyze_circuit(&source, &circuit());
        assert_eq!(analysis.records.len(), 4);

        let blocking: Vec<_> = analysis
            .records
            .iter()
            .filter(|record| record.is_blocking())
            .collect();
        assert_eq!(blocking.len(), 1);
        assert_eq!(blocking[0].kind, DependencyKind::Approvals);
        assert!(analysis
            .suggestions
            .iter()
            .any(|s| s.contains("Deactivate circuit")));
    }

    #[test]
    fn test_failed_category_blocks_conservatively() {
        let source = FixedSource {
            failing: Some(DependencyKind::Transitions),
            ..FixedSource::clean()
        };
        let analysis = analyze_circuit(&source, &circuit());

        assert_eq!(analysis.records.len(), 1);
        let record = &analysis.records[0];
        assert_eq!(record.kind, DependencyKind::Transitions);
        assert_eq!(record.count, 0);
        assert!(record.is_blocking());
        assert!(analysis
            .warnings
            .iter()
            .any(|w| w.contains("treated as blocking")));
    }

    #[test]
    fn test_forceable_documents_warn_but_do_not_block() {
        let source = FixedSource {
            documents: 2,
            ..FixedSource::clean()
        };
        let analysis = analyze_circuit(&source, &circuit());

        assert!(!analysis.records[0].is_blocking());
        assert!(analysis.warnings.iter().any(|w| w.contains("orphan")));
        assert!(analysis.suggestions.is_empty());
    }
}
