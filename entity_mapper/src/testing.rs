//! In-memory connection collaborator for unit tests.
//!
//! Records every executed statement with its parameters, serves canned
//! rows, and counts open statements so tests can check release on every
//! exit path.

use crate::connection::{
    Connection, ConnectionProvider, MemoryRowSet, ParameterSlots, RowSet, Statement,
};
use crate::errors::MapperError;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub struct Executed {
    pub sql: String,
    pub params: Vec<String>,
}

#[derive(Default)]
struct State {
    rows: Vec<Vec<Option<String>>>,
    executed: Vec<Executed>,
    open_statements: usize,
    open_connections: usize,
    fail_acquire: bool,
    fail_execute: Option<String>,
    affected: u64,
}

#[derive(Clone, Default)]
pub struct FakeDatabase {
    state: Arc<Mutex<State>>,
}

impl FakeDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows returned by every query
    pub fn with_rows(self, rows: Vec<Vec<&str>>) -> Self {
        self.state.lock().unwrap().rows = rows
            .into_iter()
            .map(|r| r.into_iter().map(|c| Some(c.to_string())).collect())
            .collect();
        self
    }

    pub fn with_raw_rows(self, rows: Vec<Vec<Option<String>>>) -> Self {
        self.state.lock().unwrap().rows = rows;
        self
    }

    pub fn with_affected(self, affected: u64) -> Self {
        self.state.lock().unwrap().affected = affected;
        self
    }

    pub fn failing_acquire(self) -> Self {
        self.state.lock().unwrap().fail_acquire = true;
        self
    }

    pub fn failing_execute(self, message: &str) -> Self {
        self.state.lock().unwrap().fail_execute = Some(message.to_string());
        self
    }

    pub fn provider(&self) -> Arc<dyn ConnectionProvider> {
        Arc::new(self.clone())
    }

    pub async fn statement(&self, sql: &str) -> Box<dyn Statement> {
        let conn = self.acquire().await.unwrap();
        conn.prepare(sql).await.unwrap()
    }

    pub fn executed(&self) -> Vec<Executed> {
        self.state.lock().unwrap().executed.clone()
    }

    pub fn last_sql(&self) -> String {
        self.executed().last().map(|e| e.sql.clone()).unwrap_or_default()
    }

    pub fn last_params(&self) -> Vec<String> {
        self.executed()
            .last()
            .map(|e| e.params.clone())
            .unwrap_or_default()
    }

    pub fn open_statements(&self) -> usize {
        self.state.lock().unwrap().open_statements
    }

    pub fn open_connections(&self) -> usize {
        self.state.lock().unwrap().open_connections
    }
}

#[async_trait]
impl ConnectionProvider for FakeDatabase {
    async fn acquire(&self) -> Result<Box<dyn Connection>, MapperError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_acquire {
            return Err(MapperError::connection("pool exhausted"));
        }
        state.open_connections += 1;
        Ok(Box::new(FakeConnection {
            state: self.state.clone(),
        }))
    }
}

struct FakeConnection {
    state: Arc<Mutex<State>>,
}

impl Drop for FakeConnection {
    fn drop(&mut self) {
        self.state.lock().unwrap().open_connections -= 1;
    }
}

#[async_trait]
impl Connection for FakeConnection {
    async fn prepare(&self, sql: &str) -> Result<Box<dyn Statement>, MapperError> {
        self.state.lock().unwrap().open_statements += 1;
        Ok(Box::new(FakeStatement {
            state: self.state.clone(),
            sql: sql.to_string(),
            params: ParameterSlots::new(),
        }))
    }
}

struct FakeStatement {
    state: Arc<Mutex<State>>,
    sql: String,
    params: ParameterSlots,
}

impl FakeStatement {
    fn record(&self) -> Result<(), MapperError> {
        let params = self.params.values()?;
        let mut state = self.state.lock().unwrap();
        state.executed.push(Executed {
            sql: self.sql.clone(),
            params,
        });
        match &state.fail_execute {
            Some(message) => Err(MapperError::query_execution(&self.sql, message)),
            None => Ok(()),
        }
    }
}

impl Drop for FakeStatement {
    fn drop(&mut self) {
        self.state.lock().unwrap().open_statements -= 1;
    }
}

#[async_trait]
impl Statement for FakeStatement {
    fn sql(&self) -> &str {
        &self.sql
    }

    fn bind_string(&mut self, position: usize, value: String) -> Result<(), MapperError> {
        Ok(self.params.bind(position, value)?)
    }

    async fn execute_query(&mut self) -> Result<Box<dyn RowSet>, MapperError> {
        self.record()?;
        let rows = self.state.lock().unwrap().rows.clone();
        Ok(Box::new(MemoryRowSet::new(rows)))
    }

    async fn execute_update(&mut self) -> Result<u64, MapperError> {
        self.record()?;
        Ok(self.state.lock().unwrap().affected)
    }
}
