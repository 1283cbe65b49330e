//! SQLite connection collaborator
//!
//! Implements the mapper's connection traits over an sqlx `SqlitePool`.
//! Every `acquire` checks out one pooled connection, statements collect
//! their text parameters and run through `sqlx::query(..).bind(..)`, and
//! result columns come back as text with `NULL` kept as `None`.

use async_trait::async_trait;
use entity_mapper::{
    Connection, ConnectionProvider, MapperError, MemoryRowSet, ParameterSlots, RowSet, Statement,
};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool, TypeInfo, ValueRef};
use std::sync::Arc;
use tokio::sync::Mutex;

type SharedConnection = Arc<Mutex<PoolConnection<Sqlite>>>;

/// Hands out pooled SQLite connections to repositories
#[derive(Debug, Clone)]
pub struct SqliteConnector {
    pool: SqlitePool,
}

impl SqliteConnector {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConnectionProvider for SqliteConnector {
    async fn acquire(&self) -> Result<Box<dyn Connection>, MapperError> {
        let conn = self.pool.acquire().await.map_err(MapperError::connection)?;
        crate::trace_log!("Acquired pooled SQLite connection");
        Ok(Box::new(SqliteSession {
            conn: Arc::new(Mutex::new(conn)),
        }))
    }
}

/// One checked-out connection; returned to the pool once it and every
/// statement prepared on it are dropped
struct SqliteSession {
    conn: SharedConnection,
}

#[async_trait]
impl Connection for SqliteSession {
    async fn prepare(&self, sql: &str) -> Result<Box<dyn Statement>, MapperError> {
        Ok(Box::new(SqliteStatement {
            conn: Arc::clone(&self.conn),
            sql: sql.to_string(),
            params: ParameterSlots::new(),
        }))
    }
}

struct SqliteStatement {
    conn: SharedConnection,
    sql: String,
    params: ParameterSlots,
}

impl SqliteStatement {
    fn bound_values(&self) -> Result<Vec<String>, MapperError> {
        Ok(self.params.values()?)
    }
}

#[async_trait]
impl Statement for SqliteStatement {
    fn sql(&self) -> &str {
        &self.sql
    }

    fn bind_string(&mut self, position: usize, value: String) -> Result<(), MapperError> {
        self.params.bind(position, value)?;
        Ok(())
    }

    async fn execute_query(&mut self) -> Result<Box<dyn RowSet>, MapperError> {
        let values = self.bound_values()?;
        crate::debug_log!("Executing query with {} parameters: {}", values.len(), self.sql);

        let mut query = sqlx::query(&self.sql);
        for value in values {
            query = query.bind(value);
        }

        let mut conn = self.conn.lock().await;
        let rows = query
            .fetch_all(&mut **conn)
            .await
            .map_err(|e| MapperError::query_execution(&self.sql, e))?;

        let rows = rows
            .iter()
            .map(|row| row_as_text(&self.sql, row))
            .collect::<Result<Vec<_>, _>>()?;
        crate::trace_log!("Query returned {} rows", rows.len());

        Ok(Box::new(MemoryRowSet::new(rows)))
    }

    async fn execute_update(&mut self) -> Result<u64, MapperError> {
        let values = self.bound_values()?;
        crate::debug_log!("Executing update with {} parameters: {}", values.len(), self.sql);

        let mut query = sqlx::query(&self.sql);
        for value in values {
            query = query.bind(value);
        }

        let mut conn = self.conn.lock().await;
        let result = query
            .execute(&mut **conn)
            .await
            .map_err(|e| MapperError::query_execution(&self.sql, e))?;

        Ok(result.rows_affected())
    }
}

// SQLite renders REAL as text with 15 significant digits, which loses
// precision. REAL values are decoded as f64 and printed in shortest
// round-trip form; every other storage class goes through the text decoder.
fn row_as_text(sql: &str, row: &SqliteRow) -> Result<Vec<Option<String>>, MapperError> {
    (0..row.len())
        .map(|i| column_as_text(row, i).map_err(|e| MapperError::query_execution(sql, e)))
        .collect()
}

fn column_as_text(row: &SqliteRow, index: usize) -> Result<Option<String>, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(None);
    }
    if raw.type_info().name() == "REAL" {
        let value = row.try_get_unchecked::<f64, _>(index)?;
        return Ok(Some(value.to_string()));
    }
    row.try_get_unchecked::<Option<String>, _>(index)
}
