//! Database operations and SQLite management for circuits and their
//! dependents.
//!
//! This module provides the low-level store for the Relay engine. It handles
//! the SQLite connection, schema management, and specialized query
//! interfaces: circuit CRUD, step ordering, routing records (transitions,
//! documents, approvals), and the referential queries the deletion engine is
//! built on.

use std::{path::Path, time::Duration};

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod circuit_queries;
pub mod dependency_queries;
pub mod migrations;
pub mod routing_queries;
pub mod step_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        // Concurrent per-circuit workers each open their own connection;
        // writers wait instead of failing with SQLITE_BUSY.
        connection
            .busy_timeout(Duration::from_secs(5))
            .db_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
