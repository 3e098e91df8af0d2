//! Pure deletion policy.
//!
//! Combines analyzer output with caller intent into an allow/deny verdict.
//! The policy runs once per batch, before any destructive action; execution
//! isolation in the coordinator is a separate concern.

use crate::{models::DependencyAnalysisResult, params::DeleteOptions};

/// Allow/deny verdict of the deletion policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDecision {
    /// Whether the batch may proceed to backup and execution
    pub proceed: bool,

    /// The denial reason, present iff `proceed` is false
    pub reason: Option<String>,
}

impl PolicyDecision {
    fn allow() -> Self {
        Self {
            proceed: true,
            reason: None,
        }
    }

    fn deny(reason: String) -> Self {
        Self {
            proceed: false,
            reason: Some(reason),
        }
    }
}

/// Decides whether a deletion batch may proceed.
///
/// A force override proceeds regardless of blocking dependencies; otherwise
/// the batch proceeds only when the analysis found nothing blocking.
pub fn decide(analysis: &DependencyAnalysisResult, options: &DeleteOptions) -> PolicyDecision {
    if options.force_delete {
        return PolicyDecision::allow();
    }

    if analysis.can_delete {
        PolicyDecision::allow()
    } else {
        let blockers: Vec<&str> = analysis
            .blocking()
            .map(|record| record.description.as_str())
            .collect();
        PolicyDecision::deny(format!(
            "Blocking dependencies present: {}",
            blockers.join("; ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DependencyKind, DependencyRecord};

    fn analysis(records: Vec<DependencyRecord>) -> DependencyAnalysisResult {
        DependencyAnalysisResult::from_parts(records, Vec::new(), Vec::new())
    }

    fn blocking_record() -> DependencyRecord {
        DependencyRecord {
            kind: DependencyKind::Approvals,
            count: 2,
            description: "2 pending approvals in circuit 'Invoices'".to_string(),
            can_force_delete: false,
            details: Vec::new(),
        }
    }

    fn forceable_record() -> DependencyRecord {
        DependencyRecord {
            kind: DependencyKind::Documents,
            count: 3,
            description: "3 documents in circuit 'Invoices'".to_string(),
            can_force_delete: true,
            details: Vec::new(),
        }
    }

    #[test]
    fn test_clean_batch_proceeds() {
        let decision = decide(&analysis(Vec::new()), &DeleteOptions::default());
        assert!(decision.proceed);
        assert!(decision.reason.is_none());
    }

    #[test]
    fn test_forceable_dependencies_proceed_without_force() {
        let decision = decide(&analysis(vec![forceable_record()]), &DeleteOptions::default());
        assert!(decision.proceed);
    }

    #[test]
    fn test_blocking_dependencies_denied_without_force() {
        let decision = decide(&analysis(vec![blocking_record()]), &DeleteOptions::default());
        assert!(!decision.proceed);
        let reason = decision.reason.unwrap();
        assert!(reason.contains("Blocking dependencies present"));
        assert!(reason.contains("pending approvals"));
    }

    #[test]
    fn test_force_overrides_blockers() {
        let options = DeleteOptions {
            force_delete: true,
            ..Default::default()
        };
        let decision = decide(&analysis(vec![blocking_record()]), &options);
        assert!(decision.proceed);
    }

    #[test]
    fn test_cascade_and_backup_flags_do_not_affect_verdict() {
        let options = DeleteOptions {
            force_delete: false,
            cascade_delete: true,
            backup_before_delete: true,
        };
        let decision = decide(&analysis(vec![blocking_record()]), &options);
        assert!(!decision.proceed);
    }
}
