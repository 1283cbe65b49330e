//! Coercion of raw column text into typed field values

use crate::types::{FieldType, FieldValue};
use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("cannot coerce '{raw}' to {target}: {reason}")]
pub struct CoercionError {
    pub raw: String,
    pub target: FieldType,
    pub reason: String,
}

impl CoercionError {
    fn new(raw: &str, target: FieldType, reason: impl ToString) -> Self {
        Self {
            raw: raw.to_string(),
            target,
            reason: reason.to_string(),
        }
    }
}

impl FieldType {
    /// Parse raw column text as a value of this type
    pub fn coerce(&self, raw: &str) -> Result<FieldValue, CoercionError> {
        let target = *self;
        match target {
            FieldType::Text => Ok(FieldValue::Text(raw.to_string())),
            FieldType::SmallInt => raw
                .trim()
                .parse::<i16>()
                .map(FieldValue::SmallInt)
                .map_err(|e| CoercionError::new(raw, target, e)),
            FieldType::Integer => raw
                .trim()
                .parse::<i32>()
                .map(FieldValue::Integer)
                .map_err(|e| CoercionError::new(raw, target, e)),
            FieldType::BigInt => raw
                .trim()
                .parse::<i64>()
                .map(FieldValue::BigInt)
                .map_err(|e| CoercionError::new(raw, target, e)),
            FieldType::Float => raw
                .trim()
                .parse::<f64>()
                .map(FieldValue::Float)
                .map_err(|e| CoercionError::new(raw, target, e)),
            FieldType::Boolean => parse_bool(raw)
                .map(FieldValue::Boolean)
                .ok_or_else(|| CoercionError::new(raw, target, "expected true/false or 1/0")),
            FieldType::Uuid => Uuid::parse_str(raw.trim())
                .map(FieldValue::Uuid)
                .map_err(|e| CoercionError::new(raw, target, e)),
            FieldType::Timestamp => parse_timestamp(raw.trim())
                .map(FieldValue::Timestamp)
                .map_err(|e| CoercionError::new(raw, target, e)),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Some(true),
        "false" | "f" | "0" => Some(false),
        _ => None,
    }
}

// SQLite's CURRENT_TIMESTAMP has no offset, so naive text is read as UTC.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(rfc_err) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|_| rfc_err),
    }
}
