//! SQL statement synthesis
//!
//! Statements are built at call time from a freshly introspected
//! [`EntityDescriptor`]. Placeholders are positional `?` markers and appear
//! in field declaration order, except for UPDATE where the key comes last.

use crate::criteria::Criteria;
use crate::descriptor::EntityDescriptor;
use crate::entity::Entity;
use crate::errors::BindingError;
use std::iter::Peekable;
use std::str::Chars;

/// SQL text plus the string parameters to bind, in position order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundQuery {
    pub sql: String,
    pub params: Vec<String>,
}

impl BoundQuery {
    pub fn new(sql: impl Into<String>, params: Vec<String>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }
}

/// `INSERT INTO <TABLE> VALUES (?, ?, ...)` with one placeholder per field
pub fn insert_sql(descriptor: &EntityDescriptor) -> String {
    let placeholders = vec!["?"; descriptor.len()].join(", ");
    format!(
        "INSERT INTO {} VALUES ({})",
        descriptor.table_name(),
        placeholders
    )
}

/// `UPDATE <TABLE> SET f2 = ?,f3 = ? WHERE f1 = ?`
pub fn update_sql(descriptor: &EntityDescriptor) -> Result<String, BindingError> {
    let key = primary_key_column(descriptor)?;
    let assignments: Vec<String> = descriptor
        .non_key_fields()
        .iter()
        .map(|field| format!("{} = ?", field.column_name()))
        .collect();
    if assignments.is_empty() {
        return Err(BindingError::NoUpdatableFields {
            entity: descriptor.entity_name().to_string(),
        });
    }
    Ok(format!(
        "UPDATE {} SET {} WHERE {} = ?",
        descriptor.table_name(),
        assignments.join(","),
        key
    ))
}

/// `SELECT * FROM <TABLE> WHERE <f1> = ?`
pub fn select_by_id_sql(descriptor: &EntityDescriptor) -> Result<String, BindingError> {
    let key = primary_key_column(descriptor)?;
    Ok(format!(
        "SELECT * FROM {} WHERE {} = ?",
        descriptor.table_name(),
        key
    ))
}

/// `SELECT * FROM <TABLE>`
pub fn select_all_sql(descriptor: &EntityDescriptor) -> String {
    format!("SELECT * FROM {}", descriptor.table_name())
}

pub fn build_insert<T: Entity>() -> String {
    insert_sql(&EntityDescriptor::of::<T>())
}

pub fn build_update<T: Entity>() -> Result<String, BindingError> {
    update_sql(&EntityDescriptor::of::<T>())
}

pub fn build_select_by_id<T: Entity>() -> Result<String, BindingError> {
    select_by_id_sql(&EntityDescriptor::of::<T>())
}

pub fn build_select_all<T: Entity>() -> String {
    select_all_sql(&EntityDescriptor::of::<T>())
}

/// Pair caller-supplied SQL with criteria values in the criteria's order.
///
/// The query text is used as given and values are only ever bound, never
/// spliced into it. The number of parameters the query expects must equal
/// the number of criteria. Only `?` and `?NNN` markers are recognized;
/// named parameters (`:name`, `@name`, `$name`) are not.
pub fn build_find(query: &str, criteria: &Criteria) -> Result<BoundQuery, BindingError> {
    let placeholders = count_placeholders(query);
    if placeholders != criteria.len() {
        return Err(BindingError::CriteriaMismatch {
            placeholders,
            values: criteria.len(),
        });
    }
    let params = criteria.values().map(str::to_string).collect();
    Ok(BoundQuery::new(query, params))
}

fn primary_key_column(descriptor: &EntityDescriptor) -> Result<&'static str, BindingError> {
    descriptor
        .primary_key()
        .map(|field| field.column_name())
        .ok_or_else(|| BindingError::NoPrimaryKey {
            entity: descriptor.entity_name().to_string(),
        })
}

/// Number of parameters `sql` expects, numbered the way SQLite numbers them:
/// `?NNN` takes NNN and a bare `?` takes one past the highest so far.
/// Markers inside quotes, bracketed identifiers and comments are skipped.
pub(crate) fn count_placeholders(sql: &str) -> usize {
    let mut highest = 0;
    let mut chars = sql.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' | '`' => skip_past(&mut chars, c),
            '[' => skip_past(&mut chars, ']'),
            '-' if chars.peek() == Some(&'-') => skip_past(&mut chars, '\n'),
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                skip_block_comment(&mut chars);
            }
            '?' => {
                let mut digits = String::new();
                while let Some(&d) = chars.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    digits.push(d);
                    chars.next();
                }
                highest = match digits.parse::<usize>() {
                    Ok(n) => highest.max(n),
                    Err(_) => highest + 1,
                };
            }
            _ => {}
        }
    }
    highest
}

fn skip_past(chars: &mut Peekable<Chars<'_>>, end: char) {
    for c in chars.by_ref() {
        if c == end {
            break;
        }
    }
}

fn skip_block_comment(chars: &mut Peekable<Chars<'_>>) {
    let mut star = false;
    for c in chars.by_ref() {
        if star && c == '/' {
            break;
        }
        star = c == '*';
    }
}
