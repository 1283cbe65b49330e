//! Serialization of field values into their bound text form

use crate::types::FieldValue;

/// Render a field value as the text bound into a statement.
///
/// Returns `None` for `FieldValue::Null`; callers decide whether a null is
/// acceptable at their position.
pub fn to_column_string(value: &FieldValue) -> Option<String> {
    let text = match value {
        FieldValue::Text(s) => s.clone(),
        FieldValue::SmallInt(n) => n.to_string(),
        FieldValue::Integer(n) => n.to_string(),
        FieldValue::BigInt(n) => n.to_string(),
        FieldValue::Float(n) => n.to_string(),
        FieldValue::Boolean(b) => b.to_string(),
        FieldValue::Uuid(id) => id.hyphenated().to_string(),
        FieldValue::Timestamp(ts) => ts.to_rfc3339(),
        FieldValue::Null => return None,
    };
    Some(text)
}
