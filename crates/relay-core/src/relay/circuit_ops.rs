//! Circuit administration operations for the Relay engine.

use tokio::task;

use super::Relay;
use crate::{
    db::Database,
    error::{RelayError, Result},
    models::{Circuit, CircuitStatus, CircuitSummary},
    params::{CreateCircuit, Id, ListCircuits},
};

impl Relay {
    /// Creates a new circuit with the given key, title, and optional
    /// description. New circuits start active with no steps.
    pub async fn create_circuit(&self, params: &CreateCircuit) -> Result<Circuit> {
        if params.key.trim().is_empty() {
            return Err(RelayError::invalid_input("key", "Circuit key must not be empty"));
        }
        if params.title.trim().is_empty() {
            return Err(RelayError::invalid_input(
                "title",
                "Circuit title must not be empty",
            ));
        }

        let db_path = self.db_path.clone();
        let key = params.key.clone();
        let title = params.title.clone();
        let description = params.description.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_circuit(&key, &title, description.as_deref())
        })
        .await
        .map_err(|e| RelayError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves a circuit by its ID with steps and transitions loaded.
    pub async fn get_circuit(&self, params: &Id) -> Result<Option<Circuit>> {
        let db_path = self.db_path.clone();
        let circuit_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_circuit(circuit_id)
        })
        .await
        .map_err(|e| RelayError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists circuit summaries with step and dependency counts. Inactive
    /// circuits are included only on request.
    pub async fn list_circuits(&self, params: &ListCircuits) -> Result<Vec<CircuitSummary>> {
        let db_path = self.db_path.clone();
        let include_inactive = params.include_inactive;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_circuits(include_inactive)
        })
        .await
        .map_err(|e| RelayError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Deactivates a circuit (soft delete). The activation guard refuses
    /// when documents are still routed through it; there is no force
    /// override for this path.
    ///
    /// Returns the updated circuit, or `None` when it does not exist.
    pub async fn deactivate_circuit(&self, params: &Id) -> Result<Option<Circuit>> {
        let Some((title, check)) = self.deactivation_status(params.id).await? else {
            return Ok(None);
        };

        if !check.allowed {
            return Err(RelayError::DeactivationBlocked {
                title,
                documents: check.document_count,
            });
        }

        self.set_status(params.id, CircuitStatus::Active, CircuitStatus::Inactive)
            .await
    }

    /// Reactivates a previously deactivated circuit.
    ///
    /// Returns the updated circuit, or `None` when it does not exist.
    pub async fn activate_circuit(&self, params: &Id) -> Result<Option<Circuit>> {
        self.set_status(params.id, CircuitStatus::Inactive, CircuitStatus::Active)
            .await
    }

    async fn set_status(
        &self,
        id: u64,
        from: CircuitStatus,
        to: CircuitStatus,
    ) -> Result<Option<Circuit>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.set_circuit_status(id, from, to)
        })
        .await
        .map_err(|e| RelayError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
