use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Error};

/// Adds `Debug, Clone, PartialEq` and `Entity` derives to a struct.
///
/// `Entity` must be in scope at the call site, as it is with
/// `rowhaus::prelude::*`.
pub fn model_attribute(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return Error::new(
            proc_macro2::Span::call_site(),
            "model takes no arguments; use #[entity(...)] for options",
        )
        .to_compile_error()
        .into();
    }

    let input = parse_macro_input!(item as DeriveInput);

    if !matches!(input.data, Data::Struct(_)) {
        return Error::new_spanned(&input.ident, "model can only be used on structs")
            .to_compile_error()
            .into();
    }

    let expanded = quote! {
        #[derive(Debug, Clone, PartialEq, Entity)]
        #input
    };

    TokenStream::from(expanded)
}
