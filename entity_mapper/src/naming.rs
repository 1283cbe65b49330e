//! Naming convention
//!
//! Table name: the entity's simple type name upper-cased with an `S`
//! appended. Column name: the field name verbatim. Irregular plurals are not
//! handled (`Box` maps to `BOXS`).

use crate::descriptor::FieldDescriptor;
use crate::entity::Entity;

/// Table name for an entity type
pub fn table_name<T: Entity>() -> String {
    table_name_for(T::entity_name())
}

/// Table name for a simple entity name
pub fn table_name_for(entity_name: &str) -> String {
    format!("{}S", entity_name.to_uppercase())
}

pub fn column_name(field: &FieldDescriptor) -> &'static str {
    field.name
}

/// Strip module path and generic arguments from a type name.
///
/// `app::model::Person` becomes `Person`, `Wrapper<app::Item>` becomes `Wrapper`.
pub fn simple_name(type_name: &str) -> &str {
    let base = type_name.split('<').next().unwrap_or(type_name);
    base.rsplit("::").next().unwrap_or(base)
}
