//! Step CRUD operations and ordering queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension, Row};

use crate::{
    error::{DatabaseResultExt, RelayError, Result},
    models::Step,
};

const INSERT_STEP_SQL: &str =
    "INSERT INTO steps (circuit_id, key, role, step_order, is_final, created_at, updated_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const SELECT_STEPS_SQL: &str =
    "SELECT id, circuit_id, key, role, step_order, is_final, created_at, updated_at \
     FROM steps WHERE circuit_id = ?1 ORDER BY step_order";
const SELECT_STEP_SQL: &str =
    "SELECT id, circuit_id, key, role, step_order, is_final, created_at, updated_at \
     FROM steps WHERE id = ?1";
const NEXT_STEP_ORDER_SQL: &str =
    "SELECT COALESCE(MAX(step_order), -1) + 1 FROM steps WHERE circuit_id = ?1";
const DELETE_STEP_SQL: &str = "DELETE FROM steps WHERE id = ?1";
const COMPACT_STEP_ORDER_SQL: &str =
    "UPDATE steps SET step_order = step_order - 1 WHERE circuit_id = ?1 AND step_order > ?2";

fn step_from_row(row: &Row<'_>) -> rusqlite::Result<Step> {
    Ok(Step {
        id: row.get::<_, i64>(0)? as u64,
        circuit_id: row.get::<_, i64>(1)? as u64,
        key: row.get(2)?,
        role: row.get(3)?,
        order: row.get::<_, i64>(4)? as u32,
        is_final: row.get::<_, i64>(5)? != 0,
        created_at: row
            .get::<_, String>(6)?
            .parse::<Timestamp>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?,
        updated_at: row
            .get::<_, String>(7)?
            .parse::<Timestamp>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(e)))?,
    })
}

impl super::Database {
    /// Appends a new step to the specified circuit.
    pub fn add_step(
        &mut self,
        circuit_id: u64,
        key: &str,
        role: Option<&str>,
        is_final: bool,
    ) -> Result<Step> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let circuit_exists: bool = tx
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM circuits WHERE id = ?1)",
                params![circuit_id as i64],
                |row| row.get(0),
            )
            .db_context("Failed to check circuit existence")?;

        if !circuit_exists {
            return Err(RelayError::CircuitNotFound { id: circuit_id });
        }

        let next_order: i64 = tx
            .query_row(NEXT_STEP_ORDER_SQL, params![circuit_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to get next step order")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_STEP_SQL,
            params![
                circuit_id as i64,
                key,
                role,
                next_order,
                is_final as i64,
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert step")?;

        let id = tx.last_insert_rowid() as u64;

        tx.execute(
            "UPDATE circuits SET updated_at = ?1 WHERE id = ?2",
            params![&now_str, circuit_id as i64],
        )
        .db_context("Failed to update circuit timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Step {
            id,
            circuit_id,
            key: key.into(),
            role: role.map(String::from),
            order: next_order as u32,
            is_final,
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves all steps of a circuit, ordered by their position.
    pub fn get_steps(&self, circuit_id: u64) -> Result<Vec<Step>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_STEPS_SQL)
            .db_context("Failed to prepare query")?;

        let steps = stmt
            .query_map(params![circuit_id as i64], step_from_row)
            .db_context("Failed to query steps")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch steps")?;

        Ok(steps)
    }

    /// Retrieves a single step by its ID.
    pub fn get_step(&self, step_id: u64) -> Result<Option<Step>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_STEP_SQL)
            .db_context("Failed to prepare query")?;

        let step = stmt
            .query_row(params![step_id as i64], step_from_row)
            .optional()
            .db_context("Failed to get step")?;

        Ok(step)
    }

    /// Removes a step from its circuit and compacts the order indexes of the
    /// steps after it.
    pub fn remove_step(&mut self, step_id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let (circuit_id, step_order): (i64, i64) = tx
            .query_row(
                "SELECT circuit_id, step_order FROM steps WHERE id = ?1",
                params![step_id as i64],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .map_err(|e| {
                if matches!(e, rusqlite::Error::QueryReturnedNoRows) {
                    RelayError::StepNotFound { id: step_id }
                } else {
                    RelayError::database_error("Failed to query step", e)
                }
            })?;

        tx.execute(DELETE_STEP_SQL, params![step_id as i64])
            .db_context("Failed to delete step")?;

        tx.execute(COMPACT_STEP_ORDER_SQL, params![circuit_id, step_order])
            .db_context("Failed to compact step orders")?;

        let now_str = Timestamp::now().to_string();
        tx.execute(
            "UPDATE circuits SET updated_at = ?1 WHERE id = ?2",
            params![&now_str, circuit_id],
        )
        .db_context("Failed to update circuit timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }
}
