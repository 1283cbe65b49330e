//! Unified type mapping between Rust field types and text columns
//!
//! Every persistent field is bound and read as text. This crate owns the
//! type tags that describe a field, the runtime value carried between an
//! entity and a statement, and the conversions in both directions.

pub mod coerce;
pub mod column_type;
pub mod serialize;
pub mod types;

pub use coerce::CoercionError;
pub use column_type::ColumnType;
pub use serialize::to_column_string;
pub use types::{FieldType, FieldValue};
