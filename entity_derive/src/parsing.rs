//! Parsing utilities for entity structs
//!
//! Collects the persistent fields of a struct in declaration order,
//! reads the optional `#[entity(crate = "...")]` attribute and validates
//! the derived table name and every column name.

use proc_macro2::Span;
use syn::{
    ext::IdentExt, Attribute, Data, DeriveInput, Error, Fields, GenericArgument, Ident, LitStr,
    Path, PathArguments, Result, Type,
};

/// Validate table name and return syn::Error for better proc macro error handling
pub fn validate_table_name_syn(name: &str, span: Span) -> Result<()> {
    validate_identifier(name)
        .map_err(|e| Error::new(span, format!("Invalid table name '{}': {}", name, e)))
}

/// Validate field name and return syn::Error for better proc macro error handling
pub fn validate_field_name_syn(name: &str, span: Span) -> Result<()> {
    validate_identifier(name)
        .map_err(|e| Error::new(span, format!("Invalid field name '{}': {}", name, e)))
}

fn validate_identifier(name: &str) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("Name cannot be empty".to_string());
    }

    if name.len() > 63 {
        return Err(format!(
            "Name '{}' is too long: {} characters (max 63)",
            name,
            name.len()
        ));
    }

    let first_char = name
        .chars()
        .next()
        .ok_or_else(|| "Name cannot be empty".to_string())?;
    if !first_char.is_ascii_alphabetic() && first_char != '_' {
        return Err(format!(
            "Name '{}' must start with a letter or underscore",
            name
        ));
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!("Name '{}' contains invalid characters: only alphanumeric characters and underscores are allowed", name));
    }

    if is_reserved_keyword(name) {
        return Err(format!("Name '{}' is a reserved SQL keyword", name));
    }

    Ok(())
}

/// Column names are spliced into generated SQL unquoted. SQLite accepts
/// most keywords as bare identifiers (`key`, `end`, `offset`, ...); these
/// are the ones it does not, so a column named after one breaks the
/// generated statements.
fn is_reserved_keyword(name: &str) -> bool {
    const RESERVED_KEYWORDS: &[&str] = &[
        "ADD", "ALL", "ALTER", "AND", "AS", "AUTOINCREMENT", "BETWEEN", "CASE", "CHECK",
        "COLLATE", "COMMIT", "CONSTRAINT", "CREATE", "DEFAULT", "DEFERRABLE", "DELETE",
        "DISTINCT", "DROP", "ELSE", "ESCAPE", "EXCEPT", "EXISTS", "FOREIGN", "FROM", "GROUP",
        "HAVING", "IN", "INDEX", "INSERT", "INTERSECT", "INTO", "IS", "ISNULL", "JOIN", "LIMIT",
        "NOT", "NOTHING", "NOTNULL", "NULL", "ON", "OR", "ORDER", "PRIMARY", "REFERENCES",
        "RETURNING", "SELECT", "SET", "TABLE", "THEN", "TO", "TRANSACTION", "UNION", "UNIQUE",
        "UPDATE", "USING", "VALUES", "WHEN", "WHERE",
    ];

    RESERVED_KEYWORDS.contains(&name.to_ascii_uppercase().as_str())
}

#[derive(Debug)]
pub struct EntityInfo {
    pub name: Ident,
    pub table_name: String,
    pub crate_path: Path,
    pub fields: Vec<FieldInfo>,
}

#[derive(Debug)]
pub struct FieldInfo {
    pub ident: Ident,
    /// Column name: the field name without any `r#` prefix
    pub name: String,
    /// Declared type as written, whitespace removed
    pub rust_type: String,
    /// `T` for an `Option<T>` field, the declared type otherwise
    pub column_type: Type,
    pub optional: bool,
}

pub fn parse_entity(input: &DeriveInput) -> Result<EntityInfo> {
    let crate_path = parse_entity_attributes(&input.attrs)?;

    let entity_name = input.ident.unraw().to_string();
    let table_name = format!("{}S", entity_name.to_uppercase());
    validate_table_name_syn(&table_name, input.ident.span())?;

    let fields = parse_fields(&input.data, input.ident.span())?;

    Ok(EntityInfo {
        name: input.ident.clone(),
        table_name,
        crate_path,
        fields,
    })
}

fn parse_entity_attributes(attrs: &[Attribute]) -> Result<Path> {
    let mut crate_path: Path = syn::parse_quote!(::entity_mapper);

    for attr in attrs {
        if !attr.path().is_ident("entity") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                let lit: LitStr = meta.value()?.parse()?;
                crate_path = lit.parse()?;
                Ok(())
            } else {
                Err(meta.error("unsupported entity attribute, expected `crate = \"...\"`"))
            }
        })?;
    }

    Ok(crate_path)
}

fn parse_fields(data: &Data, span: Span) -> Result<Vec<FieldInfo>> {
    let named = match data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            Fields::Unit => return Ok(Vec::new()),
            Fields::Unnamed(_) => {
                return Err(Error::new(
                    span,
                    "Entity requires named fields: column names come from field names",
                ))
            }
        },
        _ => return Err(Error::new(span, "Entity can only be derived for structs")),
    };

    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| Error::new(span, "Entity requires named fields"))?;
        let name = ident.unraw().to_string();
        validate_field_name_syn(&name, ident.span())?;

        let ty = &field.ty;
        let rust_type = quote::quote!(#ty).to_string().replace(' ', "");
        let (column_type, optional) = match option_inner(ty) {
            Some(inner) => (inner.clone(), true),
            None => (ty.clone(), false),
        };

        fields.push(FieldInfo {
            ident,
            name,
            rust_type,
            column_type,
            optional,
        });
    }

    Ok(fields)
}

/// `Some(T)` when `ty` is `Option<T>` (or a path ending in `Option<T>`)
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}

#[cfg(test)]
mod validation_tests {
    use super::*;

    fn parse(tokens: proc_macro2::TokenStream) -> Result<EntityInfo> {
        let input: DeriveInput = syn::parse2(tokens)?;
        parse_entity(&input)
    }

    #[test]
    fn test_fields_keep_declaration_order() {
        let info = parse(quote::quote! {
            struct Person { id: String, name: String, age: i32 }
        })
        .unwrap();
        let names: Vec<_> = info.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["id", "name", "age"]);
        assert_eq!(info.table_name, "PERSONS");
    }

    #[test]
    fn test_optional_field_unwraps_column_type() {
        let info = parse(quote::quote! {
            struct Member { id: String, nickname: Option<String> }
        })
        .unwrap();
        assert!(info.fields[1].optional);
        assert_eq!(info.fields[1].rust_type, "Option<String>");
        assert!(!info.fields[0].optional);
    }

    #[test]
    fn test_raw_identifier_is_unprefixed() {
        let info = parse(quote::quote! {
            struct Item { id: String, r#type: String }
        })
        .unwrap();
        assert_eq!(info.fields[1].name, "type");
    }

    #[test]
    fn test_reserved_field_name_is_rejected() {
        let err = parse(quote::quote! {
            struct Sale { id: String, order: i32 }
        })
        .unwrap_err();
        assert!(err.to_string().contains("Invalid field name 'order'"));
    }

    #[test]
    fn test_keywords_sqlite_accepts_as_identifiers_are_allowed() {
        let info = parse(quote::quote! {
            struct Setting { key: String, end: i64, offset: i32, r#type: String, desc: String }
        })
        .unwrap();
        let names: Vec<_> = info.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["key", "end", "offset", "type", "desc"]);
    }

    #[test]
    fn test_tuple_struct_is_rejected() {
        assert!(parse(quote::quote! { struct Pair(String, String); }).is_err());
    }

    #[test]
    fn test_crate_override() {
        let info = parse(quote::quote! {
            #[entity(crate = "rowhaus::entity_mapper")]
            struct Person { id: String }
        })
        .unwrap();
        let path = &info.crate_path;
        assert_eq!(
            quote::quote!(#path).to_string().replace(' ', ""),
            "rowhaus::entity_mapper"
        );
    }

    #[test]
    fn test_unknown_entity_attribute_is_rejected() {
        assert!(parse(quote::quote! {
            #[entity(table = "people")]
            struct Person { id: String }
        })
        .is_err());
    }

    #[test]
    fn test_identifier_rules() {
        assert!(validate_identifier("user_id").is_ok());
        assert!(validate_identifier("_private").is_ok());
        assert!(validate_identifier("123abc").is_err());
        assert!(validate_identifier("users; DROP TABLE users; --").is_err());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier(&"a".repeat(64)).is_err());
    }
}
