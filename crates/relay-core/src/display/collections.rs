//! Collection wrapper types for displaying groups of domain objects.
//!
//! Newtype wrappers provide Display implementations for collections with
//! consistent structure and graceful empty-collection handling.

use std::{fmt, ops::Index};

use crate::models::{CircuitSummary, Step};

/// Newtype wrapper for displaying collections of circuit summaries.
///
/// Formats each summary through its own Display implementation and handles
/// empty collections gracefully; title handling is left to consumers.
pub struct CircuitSummaries(pub Vec<CircuitSummary>);

impl CircuitSummaries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of circuit summaries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the circuit summary at the given index.
    pub fn get(&self, index: usize) -> Option<&CircuitSummary> {
        self.0.get(index)
    }

    /// Get an iterator over the circuit summaries.
    pub fn iter(&self) -> std::slice::Iter<'_, CircuitSummary> {
        self.0.iter()
    }
}

impl Index<usize> for CircuitSummaries {
    type Output = CircuitSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for CircuitSummaries {
    type Item = CircuitSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a CircuitSummaries {
    type Item = &'a CircuitSummary;
    type IntoIter = std::slice::Iter<'a, CircuitSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for CircuitSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No circuits found.")
        } else {
            for circuit in &self.0 {
                write!(f, "{}", circuit)?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying collections of steps.
pub struct Steps(pub Vec<Step>);

impl Steps {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of steps in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the step at the given index.
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.0.get(index)
    }

    /// Get an iterator over the steps.
    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.0.iter()
    }
}

impl Index<usize> for Steps {
    type Output = Step;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Steps {
    type Item = Step;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Steps {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Steps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No steps found.")
        } else {
            for step in &self.0 {
                write!(f, "{}", step)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::CircuitStatus;

    fn create_test_summary() -> CircuitSummary {
        CircuitSummary {
            id: 1,
            key: "TEST".to_string(),
            title: "Test Circuit".to_string(),
            description: Some("A test circuit".to_string()),
            status: CircuitStatus::Active,
            created_at: Timestamp::from_second(1_640_995_200).unwrap(),
            updated_at: Timestamp::from_second(1_640_995_200).unwrap(),
            total_steps: 3,
            live_documents: 0,
            pending_approvals: 0,
        }
    }

    #[test]
    fn test_empty_circuit_summaries() {
        let summaries = CircuitSummaries(Vec::new());
        assert!(summaries.is_empty());
        assert_eq!(format!("{summaries}"), "No circuits found.\n");
    }

    #[test]
    fn test_circuit_summaries_display() {
        let summaries = CircuitSummaries(vec![create_test_summary()]);
        let output = format!("{summaries}");
        assert!(output.contains("Test Circuit"));
        assert!(output.contains("[TEST]"));
        assert!(output.contains("**Steps**: 3"));
    }

    #[test]
    fn test_empty_steps() {
        let steps = Steps(Vec::new());
        assert!(steps.is_empty());
        assert_eq!(format!("{steps}"), "No steps found.\n");
    }
}
