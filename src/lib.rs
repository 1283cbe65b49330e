//! # RowHaus
//!
//! Convention-based mapping between plain Rust structs and relational table
//! rows. Tables and columns are named after the entity and its fields,
//! statements are generated at call time, and rows are turned back into
//! entities through their constructor.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rowhaus::prelude::*;
//!
//! #[model]
//! #[entity(crate = "rowhaus::entity_mapper")]
//! pub struct Person {
//!     pub id: String, // primary key, table PERSONS
//!     pub name: String,
//!     pub age: i32,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let rowhaus = RowHaus::new(DatabaseConfig::in_memory()).await?;
//!     sqlx::query("CREATE TABLE PERSONS (id TEXT PRIMARY KEY, name TEXT, age INTEGER)")
//!         .execute(rowhaus.pool())
//!         .await?;
//!
//!     let people = rowhaus.repository::<Person>();
//!     people
//!         .insert(&Person { id: "p1".to_string(), name: "Ann".to_string(), age: 41 })
//!         .await?;
//!
//!     let found = people.find_by_id("p1").await?;
//!     println!("Found: {:?}", found);
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod prelude;
pub mod sqlite;

// Re-export the main public types for convenience
pub use crate::core::RowHaus;
pub use crate::errors::RowHausError;
pub use crate::sqlite::SqliteConnector;

// Re-export centralized config
pub use config::{AppConfig, ConfigError, DatabaseConfig};

// Re-export internal crates used by macros and public API
// These MUST be public for `#[entity(crate = "rowhaus::entity_mapper")]` to resolve
pub use entity_derive;
pub use entity_mapper;
pub use type_mapping;

// Re-export external dependencies used in public API
pub use async_trait;
pub use sqlx;
