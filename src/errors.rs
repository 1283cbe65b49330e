//! Error types for the RowHaus crate
//!
//! This module contains the errors returned by the coordinator. Mapper
//! operations themselves return `MapperError`, which converts into
//! `RowHausError` with `?`.

use config::ConfigError;
use entity_mapper::MapperError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RowHausError {
    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] sqlx::Error),

    #[error("Mapper error: {0}")]
    Mapper(#[from] MapperError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
