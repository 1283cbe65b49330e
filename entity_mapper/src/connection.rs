//! Boundary with the database connection collaborator
//!
//! The mapper never talks to a driver directly. It acquires a connection,
//! prepares one statement, binds string parameters by position and reads
//! result columns as text. Statements and connections are released when
//! dropped, so every exit path of an operation releases them.

use crate::errors::{BindingError, MapperError};
use async_trait::async_trait;

/// Source of connections, typically backed by a pool
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    async fn acquire(&self) -> Result<Box<dyn Connection>, MapperError>;
}

#[async_trait]
pub trait Connection: Send + Sync {
    async fn prepare(&self, sql: &str) -> Result<Box<dyn Statement>, MapperError>;
}

/// A prepared statement scoped to one operation
#[async_trait]
pub trait Statement: Send {
    /// SQL text this statement was prepared from
    fn sql(&self) -> &str;

    /// Bind `value` at a 1-based position
    fn bind_string(&mut self, position: usize, value: String) -> Result<(), MapperError>;

    async fn execute_query(&mut self) -> Result<Box<dyn RowSet>, MapperError>;

    /// Returns the number of affected rows
    async fn execute_update(&mut self) -> Result<u64, MapperError>;
}

/// Forward-only cursor over result rows
pub trait RowSet: Send {
    /// Move to the next row; `false` once exhausted
    fn advance(&mut self) -> bool;

    /// Number of columns in the current row
    fn column_count(&self) -> usize;

    /// Column of the current row as text, 1-based. `None` is SQL NULL.
    fn column_as_string(&self, index: usize) -> Result<Option<String>, MapperError>;
}

/// A fully fetched result set held in memory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryRowSet {
    rows: Vec<Vec<Option<String>>>,
    current: Option<usize>,
}

impl MemoryRowSet {
    pub fn new(rows: Vec<Vec<Option<String>>>) -> Self {
        Self {
            rows,
            current: None,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn current_row(&self) -> Option<&Vec<Option<String>>> {
        self.current.and_then(|i| self.rows.get(i))
    }
}

impl RowSet for MemoryRowSet {
    fn advance(&mut self) -> bool {
        let next = self.current.map_or(0, |i| i + 1);
        self.current = Some(next.min(self.rows.len()));
        next < self.rows.len()
    }

    fn column_count(&self) -> usize {
        self.current_row().map_or(0, Vec::len)
    }

    fn column_as_string(&self, index: usize) -> Result<Option<String>, MapperError> {
        let row = self.current_row().ok_or_else(|| {
            MapperError::QueryExecution {
                sql: String::new(),
                message: "no current row; call advance() first".to_string(),
            }
        })?;
        index
            .checked_sub(1)
            .and_then(|i| row.get(i))
            .cloned()
            .ok_or_else(|| BindingError::PositionOutOfRange { position: index }.into())
    }
}

/// Highest parameter position a statement accepts; SQLite's default limit
pub const MAX_PARAMETERS: usize = 32_766;

/// Positional parameter slots shared by statement implementations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSlots {
    values: Vec<Option<String>>,
}

impl ParameterSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` at a 1-based position up to [`MAX_PARAMETERS`],
    /// rebinding replaces
    pub fn bind(&mut self, position: usize, value: String) -> Result<(), BindingError> {
        if position > MAX_PARAMETERS {
            return Err(BindingError::PositionOutOfRange { position });
        }
        let index = position
            .checked_sub(1)
            .ok_or(BindingError::PositionOutOfRange { position })?;
        if self.values.len() <= index {
            self.values.resize(index + 1, None);
        }
        self.values[index] = Some(value);
        Ok(())
    }

    /// All bound values in position order; fails on a gap
    pub fn values(&self) -> Result<Vec<String>, BindingError> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| v.clone().ok_or(BindingError::Unbound { position: i + 1 }))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
