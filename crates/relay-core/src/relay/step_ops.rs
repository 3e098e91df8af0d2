//! Step administration operations for the Relay engine.

use tokio::task;

use super::Relay;
use crate::{
    db::Database,
    error::{RelayError, Result},
    models::Step,
    params::{Id, StepCreate},
};

impl Relay {
    /// Appends a new step to a circuit. The step is placed after the
    /// circuit's current last step.
    pub async fn add_step(&self, params: &StepCreate) -> Result<Step> {
        if params.key.trim().is_empty() {
            return Err(RelayError::invalid_input("key", "Step key must not be empty"));
        }

        let db_path = self.db_path.clone();
        let circuit_id = params.circuit_id;
        let key = params.key.clone();
        let role = params.role.clone();
        let is_final = params.is_final;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.add_step(circuit_id, &key, role.as_deref(), is_final)
        })
        .await
        .map_err(|e| RelayError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves all steps of a circuit in order.
    pub async fn get_steps(&self, params: &Id) -> Result<Vec<Step>> {
        let db_path = self.db_path.clone();
        let circuit_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_steps(circuit_id)
        })
        .await
        .map_err(|e| RelayError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Removes a step from its circuit, compacting the order of the steps
    /// after it.
    pub async fn remove_step(&self, params: &Id) -> Result<()> {
        let db_path = self.db_path.clone();
        let step_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.remove_step(step_id)
        })
        .await
        .map_err(|e| RelayError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
