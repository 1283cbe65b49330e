//! Rust types that can back a persistent field

use crate::types::{FieldType, FieldValue};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A Rust type usable as a persistent field.
///
/// The entity derive reads `FIELD_TYPE` to register each field's type tag and
/// uses the two conversions to expose field values and rebuild instances.
pub trait ColumnType: Sized {
    const FIELD_TYPE: FieldType;

    fn to_field_value(&self) -> FieldValue;

    /// Returns `None` when the value's tag is not `FIELD_TYPE`
    fn from_field_value(value: FieldValue) -> Option<Self>;
}

macro_rules! impl_column_type {
    ($ty:ty, $tag:ident) => {
        impl ColumnType for $ty {
            const FIELD_TYPE: FieldType = FieldType::$tag;

            fn to_field_value(&self) -> FieldValue {
                FieldValue::$tag(self.clone())
            }

            fn from_field_value(value: FieldValue) -> Option<Self> {
                match value {
                    FieldValue::$tag(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

impl_column_type!(String, Text);
impl_column_type!(i16, SmallInt);
impl_column_type!(i32, Integer);
impl_column_type!(i64, BigInt);
impl_column_type!(f64, Float);
impl_column_type!(bool, Boolean);
impl_column_type!(Uuid, Uuid);
impl_column_type!(DateTime<Utc>, Timestamp);
