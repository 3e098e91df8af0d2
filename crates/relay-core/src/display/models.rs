//! Display implementations for domain models.
//!
//! All implementations produce markdown for rich terminal display. They live
//! here, separated from the model definitions, to keep data structures and
//! presentation apart.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{Circuit, CircuitStatus, CircuitSummary, Step, Transition};

impl fmt::Display for CircuitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {} [{}]", self.id, self.title, self.key)?;
        writeln!(f)?;

        // Metadata section
        writeln!(f, "- Status: {}", self.status.as_str())?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        // Description as a paragraph
        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        if !self.steps.is_empty() {
            writeln!(f, "\n## Steps")?;
            writeln!(f)?;
            for step in &self.steps {
                write!(f, "{}", step)?;
            }
        } else {
            writeln!(f, "\nNo steps in this circuit.")?;
        }

        if !self.transitions.is_empty() {
            writeln!(f, "\n## Transitions")?;
            writeln!(f)?;
            for transition in &self.transitions {
                write!(f, "{}", transition)?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.is_final { " (final)" } else { "" };
        writeln!(f, "### {}. {}{marker}", self.order + 1, self.key)?;
        writeln!(f)?;
        if let Some(role) = &self.role {
            writeln!(f, "- Responsible role: {role}")?;
        }
        writeln!(f, "- Step ID: {}", self.id)?;
        writeln!(f)?;
        Ok(())
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- {} -> {}", self.from_status, self.to_status)
    }
}

impl fmt::Display for CircuitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {}) [{}]", self.title, self.id, self.key)?;
        writeln!(f)?;

        if let Some(desc) = &self.description {
            writeln!(f, "- **Description**: {desc}")?;
        }

        writeln!(f, "- **Status**: {}", self.status.as_str())?;
        writeln!(f, "- **Steps**: {}", self.total_steps)?;
        if self.live_documents > 0 {
            writeln!(f, "- **Documents in progress**: {}", self.live_documents)?;
        }
        if self.pending_approvals > 0 {
            writeln!(f, "- **Pending approvals**: {}", self.pending_approvals)?;
        }
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)?;

        Ok(())
    }
}
