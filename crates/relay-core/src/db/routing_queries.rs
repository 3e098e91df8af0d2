//! Queries for transitions, document assignments, and approvals.
//!
//! Documents and approvals are written on behalf of the document-editing
//! workflow; the deletion engine consumes them read-only through
//! [`super::dependency_queries`].

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension, Row};

use crate::{
    error::{DatabaseResultExt, RelayError, Result},
    models::{Approval, ApprovalState, DocumentAssignment, DocumentState, Transition},
};

const INSERT_TRANSITION_SQL: &str =
    "INSERT INTO transitions (circuit_id, from_status, to_status, created_at) \
     VALUES (?1, ?2, ?3, ?4)";
const SELECT_TRANSITIONS_SQL: &str =
    "SELECT id, circuit_id, from_status, to_status, created_at \
     FROM transitions WHERE circuit_id = ?1 ORDER BY id";
const INSERT_DOCUMENT_SQL: &str =
    "INSERT INTO documents (circuit_id, reference, status, created_at) VALUES (?1, ?2, ?3, ?4)";
const COMPLETE_DOCUMENT_SQL: &str =
    "UPDATE documents SET status = ?1, completed_at = ?2 WHERE id = ?3 AND status = ?4";
const INSERT_APPROVAL_SQL: &str =
    "INSERT INTO approvals (circuit_id, step_id, document_ref, status, created_at) \
     VALUES (?1, ?2, ?3, ?4, ?5)";
const RESOLVE_APPROVAL_SQL: &str =
    "UPDATE approvals SET status = ?1, resolved_at = ?2 WHERE id = ?3 AND status = ?4";

fn transition_from_row(row: &Row<'_>) -> rusqlite::Result<Transition> {
    Ok(Transition {
        id: row.get::<_, i64>(0)? as u64,
        circuit_id: row.get::<_, i64>(1)? as u64,
        from_status: row.get(2)?,
        to_status: row.get(3)?,
        created_at: row
            .get::<_, String>(4)?
            .parse::<Timestamp>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?,
    })
}

impl super::Database {
    /// Defines a new transition between two statuses of a circuit.
    pub fn add_transition(
        &mut self,
        circuit_id: u64,
        from_status: &str,
        to_status: &str,
    ) -> Result<Transition> {
        if !self.circuit_exists(circuit_id)? {
            return Err(RelayError::CircuitNotFound { id: circuit_id });
        }

        let now = Timestamp::now();
        self.connection
            .execute(
                INSERT_TRANSITION_SQL,
                params![circuit_id as i64, from_status, to_status, now.to_string()],
            )
            .db_context("Failed to insert transition")?;

        Ok(Transition {
            id: self.connection.last_insert_rowid() as u64,
            circuit_id,
            from_status: from_status.into(),
            to_status: to_status.into(),
            created_at: now,
        })
    }

    /// Retrieves all transitions defined for a circuit.
    pub fn get_transitions(&self, circuit_id: u64) -> Result<Vec<Transition>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_TRANSITIONS_SQL)
            .db_context("Failed to prepare query")?;

        let transitions = stmt
            .query_map(params![circuit_id as i64], transition_from_row)
            .db_context("Failed to query transitions")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch transitions")?;

        Ok(transitions)
    }

    /// Routes a document into a circuit as an in-progress assignment.
    pub fn assign_document(&mut self, circuit_id: u64, reference: &str) -> Result<DocumentAssignment> {
        if !self.circuit_exists(circuit_id)? {
            return Err(RelayError::CircuitNotFound { id: circuit_id });
        }

        let now = Timestamp::now();
        self.connection
            .execute(
                INSERT_DOCUMENT_SQL,
                params![
                    circuit_id as i64,
                    reference,
                    DocumentState::InProgress.as_str(),
                    now.to_string()
                ],
            )
            .db_context("Failed to insert document assignment")?;

        Ok(DocumentAssignment {
            id: self.connection.last_insert_rowid() as u64,
            circuit_id,
            reference: reference.into(),
            status: DocumentState::InProgress,
            created_at: now,
            completed_at: None,
        })
    }

    /// Marks a document assignment as completed so it no longer counts as a
    /// live dependency. Completing an already-completed document is a no-op.
    pub fn complete_document(&mut self, document_id: u64) -> Result<()> {
        let now = Timestamp::now().to_string();
        self.connection
            .execute(
                COMPLETE_DOCUMENT_SQL,
                params![
                    DocumentState::Completed.as_str(),
                    &now,
                    document_id as i64,
                    DocumentState::InProgress.as_str()
                ],
            )
            .db_context("Failed to complete document assignment")?;

        Ok(())
    }

    /// Opens a pending approval gating a document at a step of the circuit.
    pub fn open_approval(
        &mut self,
        circuit_id: u64,
        step_id: Option<u64>,
        document_ref: &str,
    ) -> Result<Approval> {
        if !self.circuit_exists(circuit_id)? {
            return Err(RelayError::CircuitNotFound { id: circuit_id });
        }

        if let Some(step_id) = step_id {
            let step = self.get_step(step_id)?;
            match step {
                None => return Err(RelayError::StepNotFound { id: step_id }),
                Some(step) if step.circuit_id != circuit_id => {
                    return Err(RelayError::invalid_input(
                        "step_id",
                        "Step does not belong to the given circuit",
                    ));
                }
                Some(_) => {}
            }
        }

        let now = Timestamp::now();
        self.connection
            .execute(
                INSERT_APPROVAL_SQL,
                params![
                    circuit_id as i64,
                    step_id.map(|id| id as i64),
                    document_ref,
                    ApprovalState::Pending.as_str(),
                    now.to_string()
                ],
            )
            .db_context("Failed to insert approval")?;

        Ok(Approval {
            id: self.connection.last_insert_rowid() as u64,
            circuit_id,
            step_id,
            document_ref: document_ref.into(),
            status: ApprovalState::Pending,
            created_at: now,
            resolved_at: None,
        })
    }

    /// Records the decision for a pending approval. Returns `false` when the
    /// approval was not pending (or does not exist).
    pub fn resolve_approval(&mut self, approval_id: u64) -> Result<bool> {
        let pending: Option<String> = self
            .connection
            .query_row(
                "SELECT status FROM approvals WHERE id = ?1",
                params![approval_id as i64],
                |row| row.get(0),
            )
            .optional()
            .db_context("Failed to query approval status")?;

        match pending {
            Some(status) if status == ApprovalState::Pending.as_str() => {
                let now = Timestamp::now().to_string();
                self.connection
                    .execute(
                        RESOLVE_APPROVAL_SQL,
                        params![
                            ApprovalState::Resolved.as_str(),
                            &now,
                            approval_id as i64,
                            ApprovalState::Pending.as_str()
                        ],
                    )
                    .db_context("Failed to resolve approval")?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
