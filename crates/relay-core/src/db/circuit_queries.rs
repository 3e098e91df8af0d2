//! Circuit CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension, Row};

use crate::{
    error::{DatabaseResultExt, RelayError, Result},
    models::{Circuit, CircuitStatus, CircuitSummary},
};

const INSERT_CIRCUIT_SQL: &str =
    "INSERT INTO circuits (key, title, description, status, created_at, updated_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_CIRCUIT_SQL: &str =
    "SELECT id, key, title, description, status, created_at, updated_at \
     FROM circuits WHERE id = ?1";
const CHECK_CIRCUIT_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM circuits WHERE id = ?1)";
const UPDATE_CIRCUIT_STATUS_SQL: &str =
    "UPDATE circuits SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4";
const DELETE_CIRCUIT_SQL: &str = "DELETE FROM circuits WHERE id = ?1";

const SUMMARY_COLUMNS: &str = "id, key, title, description, status, created_at, updated_at, \
                               total_steps, live_documents, pending_approvals";
const SUMMARIES_VIEW: &str = "circuit_summaries";
const ALL_SUMMARIES_VIEW: &str = "all_circuit_summaries";

/// Maps one row of the circuit column set to a [`Circuit`] without steps.
fn circuit_from_row(row: &Row<'_>) -> rusqlite::Result<Circuit> {
    let status_str: String = row.get(4)?;
    let status = status_str.parse::<CircuitStatus>().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            Type::Text,
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Invalid circuit status: {status_str}"),
            )),
        )
    })?;

    Ok(Circuit {
        id: row.get::<_, i64>(0)? as u64,
        key: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        status,
        created_at: row
            .get::<_, String>(5)?
            .parse::<Timestamp>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?,
        updated_at: row
            .get::<_, String>(6)?
            .parse::<Timestamp>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?,
        steps: Vec::new(),
        transitions: Vec::new(),
    })
}

impl super::Database {
    /// Creates a new circuit with the given key, title, and optional
    /// description. New circuits start active with no steps.
    pub fn create_circuit(
        &mut self,
        key: &str,
        title: &str,
        description: Option<&str>,
    ) -> Result<Circuit> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_CIRCUIT_SQL,
            params![
                key,
                title,
                description,
                CircuitStatus::Active.as_str(),
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert circuit")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Circuit {
            id,
            key: key.into(),
            title: title.into(),
            description: description.map(String::from),
            status: CircuitStatus::Active,
            created_at: now,
            updated_at: now,
            steps: Vec::new(),
            transitions: Vec::new(),
        })
    }

    /// Retrieves a circuit by its ID with steps and transitions eagerly
    /// loaded.
    pub fn get_circuit(&self, id: u64) -> Result<Option<Circuit>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_CIRCUIT_SQL)
            .db_context("Failed to prepare query")?;

        let mut circuit = stmt
            .query_row(params![id as i64], circuit_from_row)
            .optional()
            .db_context("Failed to query circuit")?;

        if let Some(ref mut circuit) = circuit {
            circuit.steps = self.get_steps(circuit.id)?;
            circuit.transitions = self.get_transitions(circuit.id)?;
        }

        Ok(circuit)
    }

    /// Checks whether a circuit row exists.
    pub fn circuit_exists(&self, id: u64) -> Result<bool> {
        self.connection
            .query_row(CHECK_CIRCUIT_EXISTS_SQL, params![id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to check circuit existence")
    }

    /// Lists circuit summaries, active only by default.
    pub fn list_circuits(&self, include_inactive: bool) -> Result<Vec<CircuitSummary>> {
        let view_name = if include_inactive {
            ALL_SUMMARIES_VIEW
        } else {
            SUMMARIES_VIEW
        };

        let query =
            format!("SELECT {SUMMARY_COLUMNS} FROM {view_name} ORDER BY created_at DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let summaries = stmt
            .query_map([], |row| {
                let status_str: String = row.get(4)?;
                let status = status_str.parse::<CircuitStatus>().map_err(|_| {
                    rusqlite::Error::FromSqlConversionFailure(
                        4,
                        Type::Text,
                        Box::new(std::io::Error::new(
                            std::io::ErrorKind::InvalidData,
                            format!("Invalid circuit status: {status_str}"),
                        )),
                    )
                })?;

                Ok(CircuitSummary {
                    id: row.get::<_, i64>(0)? as u64,
                    key: row.get(1)?,
                    title: row.get(2)?,
                    description: row.get(3)?,
                    status,
                    created_at: row.get::<_, String>(5)?.parse::<Timestamp>().map_err(
                        |e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)),
                    )?,
                    updated_at: row.get::<_, String>(6)?.parse::<Timestamp>().map_err(
                        |e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)),
                    )?,
                    total_steps: row.get::<_, i64>(7)? as u32,
                    live_documents: row.get::<_, i64>(8)? as u32,
                    pending_approvals: row.get::<_, i64>(9)? as u32,
                })
            })
            .db_context("Failed to query circuits")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch circuits")?;

        Ok(summaries)
    }

    /// Flips a circuit's status. Returns the updated circuit, or `None` when
    /// it does not exist. A circuit already in the target status is returned
    /// unchanged.
    pub fn set_circuit_status(
        &mut self,
        id: u64,
        from: CircuitStatus,
        to: CircuitStatus,
    ) -> Result<Option<Circuit>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now().to_string();
        let rows_affected = tx
            .execute(
                UPDATE_CIRCUIT_STATUS_SQL,
                params![to.as_str(), &now, id as i64, from.as_str()],
            )
            .db_context("Failed to update circuit status")?;

        if rows_affected == 0 {
            let exists: bool = tx
                .query_row(CHECK_CIRCUIT_EXISTS_SQL, params![id as i64], |row| {
                    row.get(0)
                })
                .db_context("Failed to check circuit existence")?;

            if !exists {
                return Ok(None);
            }
            // Circuit exists but was already in the target status
        }

        let circuit = tx
            .query_row(SELECT_CIRCUIT_SQL, params![id as i64], circuit_from_row)
            .optional()
            .db_context("Failed to query updated circuit")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(circuit)
    }

    /// Attempts a plain delete of a circuit row without touching its
    /// dependents. With steps, transitions, or approvals still referencing
    /// the circuit this fails on the store's foreign keys, which is the
    /// expected outcome when cascade was not requested.
    pub fn delete_circuit(&mut self, id: u64) -> Result<()> {
        let exists = self.circuit_exists(id)?;
        if !exists {
            return Err(RelayError::CircuitNotFound { id });
        }

        self.connection
            .execute(DELETE_CIRCUIT_SQL, params![id as i64])
            .db_context("Failed to delete circuit")?;

        Ok(())
    }
}
