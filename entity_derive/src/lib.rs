//! Procedural macros for registering entity types
//!
//! This crate provides the `Entity` derive and the `#[model]` attribute
//! macro. Both register a struct's persistent fields, in declaration order,
//! with the mapper at compile time.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod entity_generation;
mod model_macro;
mod parsing;

use entity_generation::generate_entity_impl;
use model_macro::model_attribute;
use parsing::parse_entity;

/// Derive macro for the `Entity` trait
///
/// Every named field is persistent. The first field is the primary key, the
/// table is the struct name upper-cased with an `S` appended, and columns
/// are named after fields.
///
/// Column names go into the generated SQL unquoted, so a field may not be
/// named after a keyword SQLite refuses as a bare identifier (`order`,
/// `default`, `index`, `select`, ...). Keywords SQLite accepts as
/// identifiers, such as `key`, `end` or `type`, are fine.
///
/// ```rust,ignore
/// use entity_derive::Entity;
///
/// #[derive(Entity)]
/// pub struct Person {
///     id: String,   // primary key, table PERSONS
///     name: String,
///     age: i32,
/// }
/// ```
///
/// The generated code refers to `::entity_mapper`. When the mapper is only
/// reachable through another crate, point at it explicitly:
///
/// ```rust,ignore
/// #[derive(Entity)]
/// #[entity(crate = "rowhaus::entity_mapper")]
/// pub struct Person { id: String }
/// ```
#[proc_macro_derive(Entity, attributes(entity))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let entity_info = match parse_entity(&input) {
        Ok(info) => info,
        Err(e) => return e.to_compile_error().into(),
    };

    TokenStream::from(generate_entity_impl(&input, &entity_info))
}

/// Convenience attribute macro that adds the derives an entity usually needs
///
/// ```rust,ignore
/// use rowhaus::prelude::*;
///
/// #[model]
/// pub struct Person {
///     id: String,
///     name: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn model(attr: TokenStream, item: TokenStream) -> TokenStream {
    model_attribute(attr, item)
}
