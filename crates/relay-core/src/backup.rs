//! Best-effort backup snapshots of circuits about to be mutated.
//!
//! A snapshot is a JSON file in the backup directory: a small metadata
//! envelope (schema version, circuit count, capture timestamp) around the
//! serialized circuits with their steps and transitions. Snapshots never
//! block the destructive path — callers downgrade failures to warnings.

use std::{fs, path::PathBuf};

use jiff::{tz::TimeZone, Timestamp};
use serde::Serialize;

use crate::{
    error::{RelayError, Result},
    models::{BackupSnapshot, Circuit},
};

/// Version of the backup payload layout.
const BACKUP_SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct BackupEnvelope<'a> {
    schema_version: u32,
    circuit_count: usize,
    created_at: Timestamp,
    circuits: &'a [Circuit],
}

/// Writes point-in-time captures of circuits into a backup directory.
pub struct Snapshotter {
    backup_dir: PathBuf,
}

impl Snapshotter {
    /// Creates a snapshotter writing into the given directory.
    pub fn new(backup_dir: PathBuf) -> Self {
        Self { backup_dir }
    }

    /// Captures the given circuits into a timestamped JSON file and returns
    /// the snapshot metadata.
    pub fn snapshot(&self, circuits: &[Circuit]) -> Result<BackupSnapshot> {
        let timestamp = Timestamp::now();
        let filename = Self::filename_for(timestamp);

        let envelope = BackupEnvelope {
            schema_version: BACKUP_SCHEMA_VERSION,
            circuit_count: circuits.len(),
            created_at: timestamp,
            circuits,
        };

        let payload = serde_json::to_vec_pretty(&envelope).map_err(|e| RelayError::Backup {
            message: format!("Could not serialize circuits: {e}"),
        })?;

        fs::create_dir_all(&self.backup_dir).map_err(|e| RelayError::Backup {
            message: format!(
                "Could not create backup directory '{}': {e}",
                self.backup_dir.display()
            ),
        })?;

        let path = self.backup_dir.join(&filename);
        fs::write(&path, &payload).map_err(|e| RelayError::Backup {
            message: format!("Could not write backup file '{}': {e}", path.display()),
        })?;

        Ok(BackupSnapshot {
            filename,
            size: payload.len() as u64,
            timestamp,
        })
    }

    /// Derives the backup filename from the capture timestamp.
    fn filename_for(timestamp: Timestamp) -> String {
        format!(
            "circuits-{}.json",
            timestamp
                .to_zoned(TimeZone::UTC)
                .strftime("%Y%m%dT%H%M%SZ")
        )
    }
}
