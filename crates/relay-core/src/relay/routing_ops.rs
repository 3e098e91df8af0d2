//! Routing record operations: transitions, documents, approvals.
//!
//! Transitions belong to circuit design. Document assignments and approvals
//! are written on behalf of the document-editing workflow, which owns them
//! in production; the engine needs this surface so its referential queries
//! have real rows to count.

use tokio::task;

use super::Relay;
use crate::{
    db::Database,
    error::{RelayError, Result},
    models::{Approval, DocumentAssignment, Transition},
    params::{ApprovalCreate, DocumentAssign, Id, TransitionCreate},
};

impl Relay {
    /// Defines a transition between two named statuses of a circuit.
    pub async fn define_transition(&self, params: &TransitionCreate) -> Result<Transition> {
        if params.from_status.trim().is_empty() || params.to_status.trim().is_empty() {
            return Err(RelayError::invalid_input(
                "status",
                "Transition endpoints must not be empty",
            ));
        }

        let db_path = self.db_path.clone();
        let circuit_id = params.circuit_id;
        let from_status = params.from_status.clone();
        let to_status = params.to_status.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.add_transition(circuit_id, &from_status, &to_status)
        })
        .await
        .map_err(|e| RelayError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves all transitions defined for a circuit.
    pub async fn list_transitions(&self, params: &Id) -> Result<Vec<Transition>> {
        let db_path = self.db_path.clone();
        let circuit_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_transitions(circuit_id)
        })
        .await
        .map_err(|e| RelayError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Routes a document into a circuit as an in-progress assignment.
    pub async fn assign_document(&self, params: &DocumentAssign) -> Result<DocumentAssignment> {
        let db_path = self.db_path.clone();
        let circuit_id = params.circuit_id;
        let reference = params.reference.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.assign_document(circuit_id, &reference)
        })
        .await
        .map_err(|e| RelayError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Marks a document assignment as completed so it stops counting as a
    /// live dependency.
    pub async fn complete_document(&self, params: &Id) -> Result<()> {
        let db_path = self.db_path.clone();
        let document_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.complete_document(document_id)
        })
        .await
        .map_err(|e| RelayError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Opens a pending approval gating a document at a step of the circuit.
    pub async fn open_approval(&self, params: &ApprovalCreate) -> Result<Approval> {
        let db_path = self.db_path.clone();
        let circuit_id = params.circuit_id;
        let step_id = params.step_id;
        let document_ref = params.document_ref.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.open_approval(circuit_id, step_id, &document_ref)
        })
        .await
        .map_err(|e| RelayError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Records the decision for a pending approval. Returns `false` when the
    /// approval was not pending.
    pub async fn resolve_approval(&self, params: &Id) -> Result<bool> {
        let db_path = self.db_path.clone();
        let approval_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.resolve_approval(approval_id)
        })
        .await
        .map_err(|e| RelayError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
