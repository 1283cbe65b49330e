//! Entity Mapper - convention-based mapping between entities and table rows
//!
//! This crate turns plain structs into rows of a relational table and back
//! without per-entity SQL. It derives table and column names from an
//! entity's registration, synthesizes statements at call time, binds values
//! positionally and rebuilds instances through the entity's constructor.

// Lets `#[derive(Entity)]` output (which names `::entity_mapper`) compile
// inside this crate's own tests.
extern crate self as entity_mapper;

pub mod binder;
pub mod connection;
pub mod criteria;
pub mod descriptor;
pub mod entity;
pub mod errors;
pub mod find_query;
pub mod materializer;
pub mod naming;
pub mod prelude;
pub mod repository;
pub mod statement;

#[cfg(test)]
mod testing;

pub use connection::{Connection, ConnectionProvider, MemoryRowSet, ParameterSlots, RowSet, Statement};
pub use criteria::Criteria;
pub use descriptor::{EntityDescriptor, FieldDescriptor};
pub use entity::{argument, check_arity, Entity};
pub use errors::{BindingError, MapperError, MappingError};
pub use find_query::FindQuery;
pub use naming::table_name;
pub use repository::Repository;
pub use statement::{
    build_find, build_insert, build_select_all, build_select_by_id, build_update, BoundQuery,
};

pub use type_mapping;
