//! Entity descriptors
//!
//! A descriptor is the table name plus the ordered persistent fields of one
//! entity type. It is rebuilt from the entity's registration on every call
//! and never cached.

use crate::entity::Entity;
use crate::naming;
use type_mapping::FieldType;

/// One persistent field: column name, declared Rust type and type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub rust_type: &'static str,
    pub field_type: FieldType,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, rust_type: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            rust_type,
            field_type,
        }
    }

    /// Column this field maps to
    pub fn column_name(&self) -> &'static str {
        naming::column_name(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityDescriptor {
    entity_name: &'static str,
    table_name: String,
    fields: Vec<FieldDescriptor>,
}

impl EntityDescriptor {
    /// Introspect `T`: all declared fields, in declaration order, none excluded
    pub fn of<T: Entity>() -> Self {
        let entity_name = T::entity_name();
        Self {
            entity_name,
            table_name: naming::table_name_for(entity_name),
            fields: T::fields(),
        }
    }

    pub fn entity_name(&self) -> &'static str {
        self.entity_name
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The first declared field
    pub fn primary_key(&self) -> Option<&FieldDescriptor> {
        self.fields.first()
    }

    /// Every field after the primary key
    pub fn non_key_fields(&self) -> &[FieldDescriptor] {
        self.fields.get(1..).unwrap_or(&[])
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(FieldDescriptor::column_name).collect()
    }
}
