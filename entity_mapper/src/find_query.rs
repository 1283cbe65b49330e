//! Parameter-carrying find queries
//!
//! `FindQuery` builds a SELECT against an entity's table from equality
//! filters. Column names are checked against the entity's declared fields
//! and values are carried as bound parameters, so no caller-supplied text is
//! ever placed in the SQL.

use crate::descriptor::EntityDescriptor;
use crate::entity::Entity;
use crate::errors::BindingError;
use crate::statement::{select_all_sql, BoundQuery};
use std::marker::PhantomData;
use type_mapping::{to_column_string, FieldValue};

#[derive(Debug, Clone)]
pub struct FindQuery<T: Entity> {
    filters: Vec<(String, FieldValue)>,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: Entity> Default for FindQuery<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> FindQuery<T> {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            _phantom: PhantomData,
        }
    }

    /// Require `column = value`; filters are combined with AND
    pub fn filter(mut self, column: &str, value: impl Into<FieldValue>) -> Self {
        self.filters.push((column.to_string(), value.into()));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Render the SELECT and collect its parameters
    pub fn build(&self) -> Result<BoundQuery, BindingError> {
        let descriptor = EntityDescriptor::of::<T>();
        let mut sql = select_all_sql(&descriptor);
        let mut conditions = Vec::with_capacity(self.filters.len());
        let mut params = Vec::with_capacity(self.filters.len());

        for (column, value) in &self.filters {
            let field = descriptor
                .field(column)
                .ok_or_else(|| BindingError::UnknownField {
                    entity: descriptor.entity_name().to_string(),
                    field: column.clone(),
                })?;
            let text = to_column_string(value).ok_or_else(|| BindingError::NullValue {
                entity: descriptor.entity_name().to_string(),
                field: column.clone(),
            })?;
            conditions.push(format!("{} = ?", field.column_name()));
            params.push(text);
        }

        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        Ok(BoundQuery::new(sql, params))
    }
}
