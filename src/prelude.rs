//! Convenience re-exports for common RowHaus usage
//!
//! This prelude module re-exports the most commonly used items from the RowHaus workspace,
//! making it easier to import everything you need with a single use statement.
//!
//! # Example
//!
//! ```rust
//! use rowhaus::prelude::*;
//!
//! let criteria = Criteria::new().with("name", "Ann");
//! assert_eq!(criteria.len(), 1);
//! ```

// Core RowHaus components
pub use crate::core::RowHaus;
pub use crate::errors::RowHausError;
pub use crate::sqlite::SqliteConnector;

// Re-export centralized config
pub use config::{AppConfig, ConfigError, DatabaseConfig};

// Re-export commonly used mapper types for convenience
pub use entity_mapper::prelude::*;

// Re-export entity_mapper module for `#[entity(crate = "rowhaus::entity_mapper")]`
pub use entity_mapper;

// Re-export entity derive for model creation
pub use entity_derive::{Entity, model};

// Common external dependencies
pub use async_trait;
pub use sqlx;
pub use tokio;

// Value types with column support
pub use chrono::{DateTime, Utc};
pub use uuid::Uuid;
