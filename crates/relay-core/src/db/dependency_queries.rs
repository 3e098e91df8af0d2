//! Referential queries backing the deletion engine.
//!
//! The four count queries answer "what still references circuit X"; the
//! cascade delete removes those dependents in an order the schema's foreign
//! keys accept. Documents are counted but never deleted here — they belong
//! to the editing workflow.

use rusqlite::params;

use crate::{
    error::{DatabaseResultExt, RelayError, Result},
    models::DependencyKind,
};

const COUNT_LIVE_DOCUMENTS_SQL: &str =
    "SELECT COUNT(*) FROM documents WHERE circuit_id = ?1 AND status = 'in_progress'";
const COUNT_STEPS_SQL: &str = "SELECT COUNT(*) FROM steps WHERE circuit_id = ?1";
const COUNT_PENDING_APPROVALS_SQL: &str =
    "SELECT COUNT(*) FROM approvals WHERE circuit_id = ?1 AND status = 'pending'";
const COUNT_TRANSITIONS_SQL: &str = "SELECT COUNT(*) FROM transitions WHERE circuit_id = ?1";

const SAMPLE_DOCUMENTS_SQL: &str =
    "SELECT reference FROM documents WHERE circuit_id = ?1 AND status = 'in_progress' \
     ORDER BY id LIMIT ?2";
const SAMPLE_STEPS_SQL: &str =
    "SELECT key FROM steps WHERE circuit_id = ?1 ORDER BY step_order LIMIT ?2";
const SAMPLE_APPROVALS_SQL: &str =
    "SELECT document_ref FROM approvals WHERE circuit_id = ?1 AND status = 'pending' \
     ORDER BY id LIMIT ?2";
const SAMPLE_TRANSITIONS_SQL: &str =
    "SELECT from_status || ' -> ' || to_status FROM transitions WHERE circuit_id = ?1 \
     ORDER BY id LIMIT ?2";

/// Cascade removal order. Referencing tables come before the tables they
/// reference: approvals point at steps, and approvals/steps/transitions all
/// point at circuits.
pub(crate) const CASCADE_ORDER: [&str; 4] = [
    "DELETE FROM transitions WHERE circuit_id = ?1",
    "DELETE FROM approvals WHERE circuit_id = ?1",
    "DELETE FROM steps WHERE circuit_id = ?1",
    "DELETE FROM circuits WHERE id = ?1",
];

impl super::Database {
    /// Counts documents currently routed through the circuit.
    pub fn count_live_documents(&self, circuit_id: u64) -> Result<u64> {
        self.count(COUNT_LIVE_DOCUMENTS_SQL, circuit_id, "documents")
    }

    /// Counts steps owned by the circuit.
    pub fn count_steps(&self, circuit_id: u64) -> Result<u64> {
        self.count(COUNT_STEPS_SQL, circuit_id, "steps")
    }

    /// Counts unresolved approvals within the circuit.
    pub fn count_pending_approvals(&self, circuit_id: u64) -> Result<u64> {
        self.count(COUNT_PENDING_APPROVALS_SQL, circuit_id, "approvals")
    }

    /// Counts transitions defined for the circuit.
    pub fn count_transitions(&self, circuit_id: u64) -> Result<u64> {
        self.count(COUNT_TRANSITIONS_SQL, circuit_id, "transitions")
    }

    fn count(&self, sql: &str, circuit_id: u64, what: &str) -> Result<u64> {
        self.connection
            .query_row(sql, params![circuit_id as i64], |row| row.get::<_, i64>(0))
            .map(|n| n as u64)
            .db_context(&format!("Failed to count {what}"))
    }

    /// Fetches up to `limit` sample references for one dependency category,
    /// for operator-facing record details.
    pub fn sample_dependency_details(
        &self,
        kind: DependencyKind,
        circuit_id: u64,
        limit: u32,
    ) -> Result<Vec<String>> {
        let sql = match kind {
            DependencyKind::Documents => SAMPLE_DOCUMENTS_SQL,
            DependencyKind::Steps => SAMPLE_STEPS_SQL,
            DependencyKind::Approvals => SAMPLE_APPROVALS_SQL,
            DependencyKind::Transitions => SAMPLE_TRANSITIONS_SQL,
        };

        let mut stmt = self.connection.prepare(sql).db_context("Failed to prepare query")?;

        let details = stmt
            .query_map(params![circuit_id as i64, limit as i64], |row| {
                row.get::<_, String>(0)
            })
            .db_context("Failed to query dependency details")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch dependency details")?;

        Ok(details)
    }

    /// Removes a circuit and its dependent records in one transaction, in
    /// the fixed order transitions, approvals, steps, circuit.
    ///
    /// Each statement is idempotent-safe: re-running the cascade after a
    /// partial failure simply deletes whatever is left.
    pub fn cascade_delete_circuit(&mut self, id: u64) -> Result<()> {
        let exists = self.circuit_exists(id)?;
        if !exists {
            return Err(RelayError::CircuitNotFound { id });
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        for sql in CASCADE_ORDER {
            tx.execute(sql, params![id as i64])
                .db_context("Failed to delete dependent records")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::CASCADE_ORDER;

    #[test]
    fn test_cascade_order_references_before_referenced() {
        // approvals reference steps; transitions/approvals/steps reference
        // circuits. The statement order must respect that.
        let position = |table: &str| {
            CASCADE_ORDER
                .iter()
                .position(|sql| sql.contains(table))
                .unwrap()
        };

        assert!(position("transitions") < position("circuits WHERE"));
        assert!(position("approvals") < position("steps"));
        assert!(position("steps") < position("circuits WHERE"));
    }
}
