//! Result wrapper types for displaying operation outcomes.
//!
//! These wrappers give the reporting layer consistent markdown for creation
//! results, dependency analysis reports, pre-flight validation verdicts, and
//! deletion outcomes. Full, partial, and failed deletions each get distinct
//! messaging, with backup warnings surfaced alongside the primary outcome.

use std::fmt;

use crate::models::{
    Circuit, DeletionCheck, DeletionResult, DependencyAnalysisResult, Step, Transition,
};

/// Wrapper type for displaying the result of create operations.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Circuit> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created circuit with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Step> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created step with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Transition> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created transition with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying a dependency analysis report.
pub struct AnalysisReport(pub DependencyAnalysisResult);

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Dependency analysis")?;
        writeln!(f)?;

        if self.0.dependencies.is_empty() {
            writeln!(f, "No dependencies found.")?;
        } else {
            for record in &self.0.dependencies {
                let marker = if record.is_blocking() {
                    "blocking"
                } else {
                    "forceable"
                };
                writeln!(f, "- {} ({marker})", record.description)?;
                for detail in &record.details {
                    writeln!(f, "  - {detail}")?;
                }
            }
        }

        writeln!(f)?;
        if self.0.can_delete {
            writeln!(f, "These circuits can be deleted.")?;
        } else {
            writeln!(f, "These circuits can **not** be deleted without force.")?;
        }

        if !self.0.warnings.is_empty() {
            writeln!(f)?;
            writeln!(f, "## Warnings")?;
            writeln!(f)?;
            for warning in &self.0.warnings {
                writeln!(f, "- {warning}")?;
            }
        }

        if !self.0.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "## Suggestions")?;
            writeln!(f)?;
            for suggestion in &self.0.suggestions {
                writeln!(f, "- {suggestion}")?;
            }
        }

        Ok(())
    }
}

/// Wrapper type for displaying a pre-flight validation verdict.
pub struct ValidationNotice(pub DeletionCheck);

impl fmt::Display for ValidationNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.can_delete {
            writeln!(f, "Deletion is allowed: no blocking dependencies.")
        } else {
            writeln!(f, "Deletion is blocked:")?;
            for reason in &self.0.reasons {
                writeln!(f, "- {reason}")?;
            }
            Ok(())
        }
    }
}

/// Wrapper type for displaying the aggregated outcome of a bulk deletion.
///
/// Full success, partial success, and total failure each get their own
/// primary message; warnings (including backup failures) always follow as a
/// secondary section.
pub struct DeletionReport(pub DeletionResult);

impl fmt::Display for DeletionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = &self.0;

        if result.is_partial() {
            writeln!(
                f,
                "Partially completed: deleted {} circuit(s), {} failed.",
                result.deleted_count, result.failed_count
            )?;
        } else if result.success {
            writeln!(f, "Deleted {} circuit(s).", result.deleted_count)?;
        } else {
            writeln!(f, "No circuits were deleted.")?;
        }

        if let Some(backup) = &result.backup {
            writeln!(
                f,
                "Backup written to {} ({} bytes).",
                backup.filename, backup.size
            )?;
        }

        if !result.errors.is_empty() {
            writeln!(f)?;
            writeln!(f, "## Errors")?;
            writeln!(f)?;
            for error in &result.errors {
                writeln!(f, "- {error}")?;
            }
        }

        if !result.warnings.is_empty() {
            writeln!(f)?;
            writeln!(f, "## Warnings")?;
            writeln!(f)?;
            for warning in &result.warnings {
                writeln!(f, "- {warning}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BackupSnapshot, DependencyKind, DependencyRecord};

    fn record(can_force_delete: bool) -> DependencyRecord {
        DependencyRecord {
            kind: DependencyKind::Approvals,
            count: 2,
            description: "2 pending approval(s) in circuit 'Invoices'".to_string(),
            can_force_delete,
            details: vec!["INV-1".to_string()],
        }
    }

    #[test]
    fn test_analysis_report_marks_blockers() {
        let report = AnalysisReport(DependencyAnalysisResult::from_parts(
            vec![record(false)],
            Vec::new(),
            Vec::new(),
        ));
        let output = format!("{report}");
        assert!(output.contains("(blocking)"));
        assert!(output.contains("can **not** be deleted"));
        assert!(output.contains("INV-1"));
    }

    #[test]
    fn test_validation_notice_lists_reasons() {
        let notice = ValidationNotice(DeletionCheck {
            can_delete: false,
            reasons: vec!["2 pending approval(s) in circuit 'Invoices'".to_string()],
        });
        let output = format!("{notice}");
        assert!(output.contains("Deletion is blocked"));
        assert!(output.contains("pending approval"));
    }

    #[test]
    fn test_deletion_report_full_success() {
        let report = DeletionReport(DeletionResult {
            success: true,
            deleted_count: 3,
            failed_count: 0,
            errors: Vec::new(),
            warnings: Vec::new(),
            backup: None,
        });
        assert_eq!(format!("{report}"), "Deleted 3 circuit(s).\n");
    }

    #[test]
    fn test_deletion_report_partial_with_backup_warning() {
        let ts = jiff::Timestamp::from_second(1_700_000_000).unwrap();
        let report = DeletionReport(DeletionResult {
            success: true,
            deleted_count: 2,
            failed_count: 1,
            errors: vec!["Failed to delete circuit 'Expenses'".to_string()],
            warnings: vec!["Backup failed: disk full. Continuing with deletion.".to_string()],
            backup: Some(BackupSnapshot {
                filename: "circuits-20231114T221320Z.json".to_string(),
                size: 512,
                timestamp: ts,
            }),
        });
        let output = format!("{report}");
        assert!(output.contains("Partially completed"));
        assert!(output.contains("## Errors"));
        assert!(output.contains("## Warnings"));
        assert!(output.contains("Backup written to"));
    }

    #[test]
    fn test_deletion_report_total_failure() {
        let report = DeletionReport(DeletionResult {
            success: false,
            deleted_count: 0,
            failed_count: 0,
            errors: vec!["Blocking dependencies present".to_string()],
            warnings: Vec::new(),
            backup: None,
        });
        let output = format!("{report}");
        assert!(output.contains("No circuits were deleted."));
        assert!(output.contains("Blocking dependencies present"));
    }
}
