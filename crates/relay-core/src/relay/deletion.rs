//! Bulk deletion coordination and cascade dispatch.
//!
//! The coordinator runs the deletion policy once per batch before anything
//! destructive happens, attempts an optional best-effort backup, then fans
//! the per-circuit deletes out as isolated units of work. One failing
//! circuit never cancels or rolls back its siblings; the aggregate counters
//! are owned by the single collecting loop at the end.

use futures::{stream, StreamExt};
use log::{info, warn};
use tokio::task;

use super::Relay;
use crate::{
    backup::Snapshotter,
    db::Database,
    error::{RelayError, Result},
    models::{Circuit, DeletionResult},
    params::DeleteCircuits,
    policy,
};

/// Bound on concurrently executing per-circuit deletions.
pub(crate) const DELETE_CONCURRENCY: usize = 4;

impl Relay {
    /// Deletes a batch of circuits under the caller's force/cascade/backup
    /// options and aggregates a single result.
    ///
    /// A batch-level policy denial aborts before backup or execution with no
    /// side effects; the denial reason is the sole error in the result.
    /// Once execution begins, `deleted_count + failed_count` equals the
    /// number of submitted IDs.
    pub async fn delete_circuits(&self, params: &DeleteCircuits) -> Result<DeletionResult> {
        let (circuits, missing) = self.load_for_deletion(&params.ids).await?;

        // Policy gate, once for the whole batch, before any mutation.
        let analysis = self.analyze_loaded(circuits.clone()).await?;
        let decision = policy::decide(&analysis, &params.options);
        if !decision.proceed {
            let reason = decision
                .reason
                .unwrap_or_else(|| "Blocking dependencies present".to_string());
            info!("Deletion denied for batch of {}: {reason}", params.ids.len());
            return Ok(DeletionResult::denied(reason, analysis.warnings));
        }

        let mut warnings = analysis.warnings;
        let mut errors = Vec::new();

        // Best-effort backup; a failure downgrades to a warning and the
        // destructive path continues.
        let mut backup = None;
        if params.options.backup_before_delete {
            match self.snapshot_circuits(circuits.clone()).await {
                Ok(snapshot) => {
                    info!(
                        "Backed up {} circuit(s) to {} ({} bytes)",
                        circuits.len(),
                        snapshot.filename,
                        snapshot.size
                    );
                    backup = Some(snapshot);
                }
                Err(e) => {
                    warn!("Backup before deletion failed: {e}");
                    warnings.push(format!("Backup failed: {e}. Continuing with deletion."));
                }
            }
        }

        // Isolated per-circuit dispatch with bounded parallelism.
        let cascade = params.options.cascade_delete;
        let mut outcomes = stream::iter(circuits.into_iter().map(|circuit| {
            let db_path = self.db_path.clone();
            let id = circuit.id;
            let title = circuit.title;
            async move {
                let outcome = task::spawn_blocking(move || {
                    let mut db = Database::new(&db_path)?;
                    if cascade {
                        db.cascade_delete_circuit(id)
                    } else {
                        db.delete_circuit(id)
                    }
                })
                .await
                .map_err(|e| RelayError::Configuration {
                    message: format!("Task join error: {e}"),
                })
                .and_then(|result| result);
                (title, outcome)
            }
        }))
        .buffer_unordered(DELETE_CONCURRENCY);

        // Single aggregation point for the batch counters.
        let mut deleted_count = 0u64;
        let mut failed_count = 0u64;
        while let Some((title, outcome)) = outcomes.next().await {
            match outcome {
                Ok(()) => deleted_count += 1,
                Err(e) => {
                    failed_count += 1;
                    errors.push(format!("Failed to delete circuit '{title}': {e}"));
                }
            }
        }

        for id in missing {
            failed_count += 1;
            errors.push(format!("Failed to delete circuit with ID {id}: not found"));
        }

        info!("Deleted {deleted_count} circuit(s), {failed_count} failure(s)");

        Ok(DeletionResult {
            success: deleted_count > 0,
            deleted_count,
            failed_count,
            errors,
            warnings,
            backup,
        })
    }

    /// Loads the submitted circuits, separating IDs that no longer exist so
    /// they can be reported as per-circuit failures instead of aborting the
    /// batch.
    async fn load_for_deletion(&self, ids: &[u64]) -> Result<(Vec<Circuit>, Vec<u64>)> {
        let db_path = self.db_path.clone();
        let ids = ids.to_vec();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            let mut circuits = Vec::new();
            let mut missing = Vec::new();
            for id in ids {
                match db.get_circuit(id)? {
                    Some(circuit) => circuits.push(circuit),
                    None => missing.push(id),
                }
            }
            Ok::<_, RelayError>((circuits, missing))
        })
        .await
        .map_err(|e| RelayError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Writes a snapshot of the circuits about to be deleted.
    async fn snapshot_circuits(
        &self,
        circuits: Vec<Circuit>,
    ) -> Result<crate::models::BackupSnapshot> {
        let snapshotter = Snapshotter::new(self.backup_dir.clone());

        task::spawn_blocking(move || snapshotter.snapshot(&circuits))
            .await
            .map_err(|e| RelayError::Configuration {
                message: format!("Task join error: {e}"),
            })?
    }
}
