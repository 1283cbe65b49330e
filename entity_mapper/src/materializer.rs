//! Row materialization
//!
//! Reads one column per declared field, in field order, coerces the text to
//! the field's declared type and hands the values to the entity's
//! constructor.

use crate::connection::RowSet;
use crate::descriptor::EntityDescriptor;
use crate::entity::{check_arity, Entity};
use crate::errors::{MapperError, MappingError};
use type_mapping::FieldValue;

/// Build one `T` from the current row of `rows`
pub fn materialize<T: Entity>(rows: &dyn RowSet) -> Result<T, MapperError> {
    let descriptor = EntityDescriptor::of::<T>();
    let mut raw = Vec::with_capacity(descriptor.len());
    for index in 1..=descriptor.len() {
        if index > rows.column_count() {
            return Err(MappingError::MissingColumn {
                entity: descriptor.entity_name().to_string(),
                index,
            }
            .into());
        }
        raw.push(rows.column_as_string(index)?);
    }
    Ok(materialize_values::<T>(&raw)?)
}

/// Build one `T` from raw column text aligned with its declared fields
pub fn materialize_values<T: Entity>(raw: &[Option<String>]) -> Result<T, MappingError> {
    let descriptor = EntityDescriptor::of::<T>();
    let mut values: Vec<FieldValue> = Vec::with_capacity(descriptor.len());
    for (index, field) in descriptor.fields().iter().enumerate() {
        let text = raw
            .get(index)
            .ok_or_else(|| MappingError::MissingColumn {
                entity: descriptor.entity_name().to_string(),
                index: index + 1,
            })?
            .as_deref()
            .ok_or_else(|| MappingError::NullColumn {
                field: field.name.to_string(),
            })?;
        let value = field
            .field_type
            .coerce(text)
            .map_err(|source| MappingError::Coercion {
                field: field.name.to_string(),
                source,
            })?;
        values.push(value);
    }
    check_arity::<T>(&values)?;
    T::construct(values)
}

/// Materialize the first row, discarding any further rows
pub fn materialize_first<T: Entity>(rows: &mut dyn RowSet) -> Result<Option<T>, MapperError> {
    if rows.advance() {
        materialize::<T>(rows).map(Some)
    } else {
        Ok(None)
    }
}

/// Materialize every remaining row
pub fn materialize_all<T: Entity>(rows: &mut dyn RowSet) -> Result<Vec<T>, MapperError> {
    let mut entities = Vec::new();
    while rows.advance() {
        entities.push(materialize::<T>(rows)?);
    }
    Ok(entities)
}
