//! Builder for creating and configuring Relay instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::Relay;
use crate::{
    db::Database,
    error::{RelayError, Result},
};

/// Builder for creating and configuring Relay instances.
#[derive(Debug, Clone)]
pub struct RelayBuilder {
    database_path: Option<PathBuf>,
    backup_dir: Option<PathBuf>,
}

impl RelayBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            backup_dir: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/relay/relay.db` or `~/.local/share/relay/relay.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets a custom directory for pre-deletion backup snapshots.
    ///
    /// If not specified, uses `$XDG_DATA_HOME/relay/backups`.
    pub fn with_backup_dir<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.backup_dir = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured engine instance.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::FileSystem` if the database path is invalid
    /// Returns `RelayError::Database` if database initialization fails
    pub async fn build(self) -> Result<Relay> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        let backup_dir = if let Some(path) = self.backup_dir {
            path
        } else {
            Self::default_backup_dir()?
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| RelayError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), RelayError>(())
        })
        .await
        .map_err(|e| RelayError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(Relay::new(db_path, backup_dir))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("relay")
            .place_data_file("relay.db")
            .map_err(|e| RelayError::XdgDirectory(e.to_string()))
    }

    /// Returns the default backup directory following XDG Base Directory
    /// specification.
    fn default_backup_dir() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("relay")
            .create_data_directory("backups")
            .map_err(|e| RelayError::XdgDirectory(e.to_string()))
    }
}

impl Default for RelayBuilder {
    fn default() -> Self {
        Self::new()
    }
}
