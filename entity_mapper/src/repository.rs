//! Repository facade
//!
//! Composes statement synthesis, binding and materialization over a
//! connection provider. Each call acquires one connection, prepares exactly
//! one statement and releases both before returning, whatever the outcome.
//! No state is kept between calls.

use crate::binder::{bind_for_insert, bind_for_update, bind_key, bind_values};
use crate::connection::{Connection, ConnectionProvider, Statement};
use crate::criteria::Criteria;
use crate::descriptor::EntityDescriptor;
use crate::entity::Entity;
use crate::errors::MapperError;
use crate::find_query::FindQuery;
use crate::materializer::{materialize_all, materialize_first};
use crate::statement::{build_find, insert_sql, select_all_sql, select_by_id_sql, update_sql};
use std::fmt::{self, Display};
use std::marker::PhantomData;
use std::sync::Arc;

/// Convention-based repository for one entity type
pub struct Repository<T: Entity> {
    provider: Arc<dyn ConnectionProvider>,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: Entity> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T: Entity> fmt::Debug for Repository<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("entity", &T::entity_name())
            .finish()
    }
}

impl<T: Entity> Repository<T> {
    pub fn new(provider: Arc<dyn ConnectionProvider>) -> Self {
        Self {
            provider,
            _phantom: PhantomData,
        }
    }

    /// Run caller-supplied SQL, binding `criteria` values in the criteria's
    /// iteration order. Returns the first row; further rows are discarded.
    pub async fn find(&self, query: &str, criteria: &Criteria) -> Result<Option<T>, MapperError> {
        let result = async {
            let bound = build_find(query, criteria)?;
            let (_conn, mut stmt) = self.prepare(&bound.sql).await?;
            bind_values(stmt.as_mut(), &bound.params)?;
            let mut rows = stmt.execute_query().await?;
            materialize_first::<T>(rows.as_mut())
        }
        .await;
        self.report("find", result)
    }

    /// Run a validated, parameter-carrying query and return its first row
    pub async fn find_by(&self, query: FindQuery<T>) -> Result<Option<T>, MapperError> {
        let result = async {
            let bound = query.build()?;
            let (_conn, mut stmt) = self.prepare(&bound.sql).await?;
            bind_values(stmt.as_mut(), &bound.params)?;
            let mut rows = stmt.execute_query().await?;
            materialize_first::<T>(rows.as_mut())
        }
        .await;
        self.report("find_by", result)
    }

    /// Run a validated, parameter-carrying query and return every row
    pub async fn find_all_by(&self, query: FindQuery<T>) -> Result<Vec<T>, MapperError> {
        let result = async {
            let bound = query.build()?;
            let (_conn, mut stmt) = self.prepare(&bound.sql).await?;
            bind_values(stmt.as_mut(), &bound.params)?;
            let mut rows = stmt.execute_query().await?;
            materialize_all::<T>(rows.as_mut())
        }
        .await;
        self.report("find_all_by", result)
    }

    /// Look up a row by its first declared field. `Ok(None)` means not found.
    pub async fn find_by_id(&self, key: impl Display) -> Result<Option<T>, MapperError> {
        let key = key.to_string();
        let result = async {
            let sql = select_by_id_sql(&EntityDescriptor::of::<T>())?;
            let (_conn, mut stmt) = self.prepare(&sql).await?;
            bind_key(stmt.as_mut(), key)?;
            let mut rows = stmt.execute_query().await?;
            materialize_first::<T>(rows.as_mut())
        }
        .await;
        self.report("find_by_id", result)
    }

    /// Every row of the table; empty when the table is empty
    pub async fn find_all(&self) -> Result<Vec<T>, MapperError> {
        let result = async {
            let sql = select_all_sql(&EntityDescriptor::of::<T>());
            let (_conn, mut stmt) = self.prepare(&sql).await?;
            let mut rows = stmt.execute_query().await?;
            materialize_all::<T>(rows.as_mut())
        }
        .await;
        self.report("find_all", result)
    }

    /// Not implemented: whether a save should insert or update is left to
    /// the caller, who must call [`Repository::insert`] or
    /// [`Repository::update`] explicitly.
    pub async fn save(&self, _entity: &T) -> Result<u64, MapperError> {
        self.report(
            "save",
            Err(MapperError::Unsupported(format!(
                "save is not implemented for {}; call insert or update",
                T::entity_name()
            ))),
        )
    }

    /// Insert a row; returns the affected row count
    pub async fn insert(&self, entity: &T) -> Result<u64, MapperError> {
        let result = async {
            let sql = insert_sql(&EntityDescriptor::of::<T>());
            let (_conn, mut stmt) = self.prepare(&sql).await?;
            bind_for_insert(stmt.as_mut(), entity)?;
            stmt.execute_update().await
        }
        .await;
        self.report("insert", result)
    }

    /// Update the row keyed by the entity's first field; returns the
    /// affected row count
    pub async fn update(&self, entity: &T) -> Result<u64, MapperError> {
        let result = async {
            let sql = update_sql(&EntityDescriptor::of::<T>())?;
            let (_conn, mut stmt) = self.prepare(&sql).await?;
            bind_for_update(stmt.as_mut(), entity)?;
            stmt.execute_update().await
        }
        .await;
        self.report("update", result)
    }

    // The connection is returned alongside the statement so both stay alive
    // for the operation and drop together when it ends.
    async fn prepare(
        &self,
        sql: &str,
    ) -> Result<(Box<dyn Connection>, Box<dyn Statement>), MapperError> {
        tracing::debug!("[{}] SQL: {}", T::entity_name(), sql);
        let conn = self.provider.acquire().await?;
        let stmt = conn.prepare(sql).await?;
        Ok((conn, stmt))
    }

    fn report<R>(&self, operation: &str, result: Result<R, MapperError>) -> Result<R, MapperError> {
        if let Err(e) = &result {
            tracing::warn!(
                entity = T::entity_name(),
                operation,
                error = %e,
                "repository operation failed"
            );
        }
        result
    }
}
