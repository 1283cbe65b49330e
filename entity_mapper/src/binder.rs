//! Positional parameter binding
//!
//! Field values are walked in declaration order and bound as text. Null
//! values are rejected: every persistent field must have a bound
//! representation.

use crate::connection::Statement;
use crate::descriptor::EntityDescriptor;
use crate::entity::Entity;
use crate::errors::{BindingError, MapperError};
use type_mapping::{to_column_string, FieldValue};

/// Bind every field at positions `1..=n`. Returns the number bound.
pub fn bind_for_insert<T: Entity>(
    statement: &mut dyn Statement,
    entity: &T,
) -> Result<usize, MapperError> {
    let values = entity_strings(entity)?;
    bind_values(statement, &values)
}

/// Bind fields `2..=n` at positions `1..n`, then the key at position `n`
pub fn bind_for_update<T: Entity>(
    statement: &mut dyn Statement,
    entity: &T,
) -> Result<usize, MapperError> {
    let mut values = entity_strings(entity)?;
    if values.is_empty() {
        return Err(BindingError::NoPrimaryKey {
            entity: T::entity_name().to_string(),
        }
        .into());
    }
    let key = values.remove(0);
    values.push(key);
    bind_values(statement, &values)
}

/// Bind a single key at position 1
pub fn bind_key(statement: &mut dyn Statement, key: String) -> Result<usize, MapperError> {
    bind_values(statement, &[key])
}

/// Bind `values` at positions `1..=len`
pub fn bind_values(statement: &mut dyn Statement, values: &[String]) -> Result<usize, MapperError> {
    for (i, value) in values.iter().enumerate() {
        statement.bind_string(i + 1, value.clone())?;
    }
    tracing::trace!("bound {} parameters for: {}", values.len(), statement.sql());
    Ok(values.len())
}

/// The entity's field values as text, in declaration order
pub fn entity_strings<T: Entity>(entity: &T) -> Result<Vec<String>, BindingError> {
    let descriptor = EntityDescriptor::of::<T>();
    let values = entity.field_values();
    if values.len() != descriptor.len() {
        return Err(BindingError::FieldCount {
            entity: descriptor.entity_name().to_string(),
            expected: descriptor.len(),
            found: values.len(),
        });
    }
    descriptor
        .fields()
        .iter()
        .zip(values.iter())
        .map(|(field, value)| field_string(&descriptor, field.name, value))
        .collect()
}

fn field_string(
    descriptor: &EntityDescriptor,
    field: &str,
    value: &FieldValue,
) -> Result<String, BindingError> {
    to_column_string(value).ok_or_else(|| BindingError::NullValue {
        entity: descriptor.entity_name().to_string(),
        field: field.to_string(),
    })
}
