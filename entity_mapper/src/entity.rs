//! The mapping capability an entity type exposes
//!
//! Instead of discovering fields and constructors at runtime, each entity
//! registers them once. `#[derive(Entity)]` writes this impl from the struct
//! definition so no per-entity mapping code is hand written.

use crate::descriptor::FieldDescriptor;
use crate::errors::MappingError;
use crate::naming::simple_name;
use type_mapping::{ColumnType, FieldValue};

/// An entity type whose instances map one-to-one to table rows.
///
/// The order of `fields()` is the column order everywhere: insert values,
/// update assignments, select columns and `construct` arguments. The first
/// field is the primary key.
///
/// Manual implementation:
/// ```
/// use entity_mapper::{Entity, FieldDescriptor, MappingError};
/// use entity_mapper::type_mapping::{FieldType, FieldValue};
///
/// struct Tag {
///     id: String,
///     label: String,
/// }
///
/// impl Entity for Tag {
///     fn fields() -> Vec<FieldDescriptor> {
///         vec![
///             FieldDescriptor::new("id", "String", FieldType::Text),
///             FieldDescriptor::new("label", "String", FieldType::Text),
///         ]
///     }
///
///     fn field_values(&self) -> Vec<FieldValue> {
///         vec![self.id.clone().into(), self.label.clone().into()]
///     }
///
///     fn construct(values: Vec<FieldValue>) -> Result<Self, MappingError> {
///         entity_mapper::check_arity::<Self>(&values)?;
///         let mut values = values.into_iter();
///         Ok(Tag {
///             id: entity_mapper::argument::<Self, String>(&mut values, "id")?,
///             label: entity_mapper::argument::<Self, String>(&mut values, "label")?,
///         })
///     }
/// }
///
/// assert_eq!(entity_mapper::table_name::<Tag>(), "TAGS");
/// ```
pub trait Entity: Sized + Send + Sync {
    /// Simple (unqualified) type name the table name is derived from
    fn entity_name() -> &'static str {
        simple_name(std::any::type_name::<Self>())
    }

    /// Persistent fields in declaration order
    fn fields() -> Vec<FieldDescriptor>;

    /// Field values in the same order as `fields()`
    fn field_values(&self) -> Vec<FieldValue>;

    /// Build an instance from values ordered and typed like `fields()`
    fn construct(values: Vec<FieldValue>) -> Result<Self, MappingError>;
}

/// Fail with `ArityMismatch` unless `values` has one entry per declared field
pub fn check_arity<E: Entity>(values: &[FieldValue]) -> Result<(), MappingError> {
    let expected = E::fields().len();
    if values.len() != expected {
        return Err(MappingError::ArityMismatch {
            entity: E::entity_name().to_string(),
            expected,
            found: values.len(),
        });
    }
    Ok(())
}

/// Take the next constructor argument and convert it to the parameter type
pub fn argument<E, T>(
    values: &mut impl Iterator<Item = FieldValue>,
    field: &str,
) -> Result<T, MappingError>
where
    E: Entity,
    T: ColumnType,
{
    let value = values.next().ok_or_else(|| MappingError::ArityMismatch {
        entity: E::entity_name().to_string(),
        expected: E::fields().len(),
        found: 0,
    })?;
    let found = value.field_type();
    T::from_field_value(value).ok_or_else(|| MappingError::NoConstructor {
        entity: E::entity_name().to_string(),
        field: field.to_string(),
        expected: T::FIELD_TYPE,
        found,
    })
}
