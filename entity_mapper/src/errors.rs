//! Error types for mapping operations
//!
//! Reads report "not found" as `Ok(None)`; every variant here is a real
//! failure and is never collapsed into an empty result.

use thiserror::Error;
use type_mapping::{CoercionError, FieldType};

#[derive(Error, Debug)]
pub enum MapperError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Binding error: {0}")]
    Binding(#[from] BindingError),

    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    #[error("Query execution error for '{sql}': {message}")]
    QueryExecution { sql: String, message: String },

    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

impl MapperError {
    pub fn connection(error: impl std::fmt::Display) -> Self {
        MapperError::Connection(error.to_string())
    }

    pub fn query_execution(sql: &str, error: impl std::fmt::Display) -> Self {
        MapperError::QueryExecution {
            sql: sql.to_string(),
            message: error.to_string(),
        }
    }

    pub fn is_binding(&self) -> bool {
        matches!(self, MapperError::Binding(_))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, MapperError::Mapping(_))
    }
}

/// Failures while turning values into statement parameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindingError {
    #[error("field '{field}' of {entity} is null")]
    NullValue { entity: String, field: String },

    #[error("{entity} exposed {found} field values but declares {expected} fields")]
    FieldCount {
        entity: String,
        expected: usize,
        found: usize,
    },

    #[error("parameter position {position} is out of range")]
    PositionOutOfRange { position: usize },

    #[error("parameter {position} was never bound")]
    Unbound { position: usize },

    #[error("query has {placeholders} placeholders but {values} criteria were supplied")]
    CriteriaMismatch { placeholders: usize, values: usize },

    #[error("{entity} has no field named '{field}'")]
    UnknownField { entity: String, field: String },

    #[error("{entity} declares no fields, so it has no primary key")]
    NoPrimaryKey { entity: String },

    #[error("{entity} has no fields besides its primary key to update")]
    NoUpdatableFields { entity: String },
}

/// Failures while rebuilding an entity from a result row
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MappingError {
    #[error("{entity} constructor takes {expected} arguments but {found} were supplied")]
    ArityMismatch {
        entity: String,
        expected: usize,
        found: usize,
    },

    #[error("{entity} has no constructor accepting {found:?} for '{field}' (expected {expected})")]
    NoConstructor {
        entity: String,
        field: String,
        expected: FieldType,
        found: Option<FieldType>,
    },

    #[error("row has no column {index} for {entity}")]
    MissingColumn { entity: String, index: usize },

    #[error("column for field '{field}' is null")]
    NullColumn { field: String },

    #[error("field '{field}': {source}")]
    Coercion {
        field: String,
        #[source]
        source: CoercionError,
    },
}
