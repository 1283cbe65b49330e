//! Convenience re-exports for common mapper usage

// Core traits
pub use crate::connection::{Connection, ConnectionProvider, RowSet, Statement};
pub use crate::entity::Entity;

// Error types
pub use crate::errors::{BindingError, MapperError, MappingError};

// Introspection and statements
pub use crate::descriptor::{EntityDescriptor, FieldDescriptor};
pub use crate::statement::{
    build_find, build_insert, build_select_all, build_select_by_id, build_update, BoundQuery,
};

// Querying
pub use crate::criteria::Criteria;
pub use crate::find_query::FindQuery;
pub use crate::repository::Repository;

// Field types
pub use type_mapping::{ColumnType, FieldType, FieldValue};
