//! Code generation for the `Entity` impl
//!
//! The generated impl registers the struct's fields in declaration order,
//! exposes their values in that order and rebuilds the struct from values
//! in that order. SQL is not generated here; statements are synthesized at
//! call time from the registration.

use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::parsing::{EntityInfo, FieldInfo};

pub fn generate_entity_impl(input: &DeriveInput, info: &EntityInfo) -> TokenStream {
    let name = &info.name;
    let krate = &info.crate_path;
    let entity_name = name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let descriptors = info.fields.iter().map(|field| field_descriptor(krate, field));
    let values = info.fields.iter().map(|field| field_value(krate, field));
    let arguments = info.fields.iter().map(|field| constructor_argument(krate, field));

    quote! {
        impl #impl_generics #krate::Entity for #name #ty_generics #where_clause {
            fn entity_name() -> &'static str {
                #entity_name
            }

            fn fields() -> ::std::vec::Vec<#krate::FieldDescriptor> {
                ::std::vec![#(#descriptors),*]
            }

            fn field_values(&self) -> ::std::vec::Vec<#krate::type_mapping::FieldValue> {
                ::std::vec![#(#values),*]
            }

            #[allow(unused_mut, unused_variables)]
            fn construct(
                values: ::std::vec::Vec<#krate::type_mapping::FieldValue>,
            ) -> ::std::result::Result<Self, #krate::MappingError> {
                #krate::check_arity::<Self>(&values)?;
                let mut values = values.into_iter();
                ::std::result::Result::Ok(Self {
                    #(#arguments),*
                })
            }
        }
    }
}

fn field_descriptor(krate: &syn::Path, field: &FieldInfo) -> TokenStream {
    let name = &field.name;
    let rust_type = &field.rust_type;
    let column_type = &field.column_type;
    quote! {
        #krate::FieldDescriptor::new(
            #name,
            #rust_type,
            <#column_type as #krate::type_mapping::ColumnType>::FIELD_TYPE,
        )
    }
}

fn field_value(krate: &syn::Path, field: &FieldInfo) -> TokenStream {
    let ident = &field.ident;
    let column_type = &field.column_type;
    if field.optional {
        quote! {
            match &self.#ident {
                ::std::option::Option::Some(value) => {
                    <#column_type as #krate::type_mapping::ColumnType>::to_field_value(value)
                }
                ::std::option::Option::None => #krate::type_mapping::FieldValue::Null,
            }
        }
    } else {
        quote! {
            <#column_type as #krate::type_mapping::ColumnType>::to_field_value(&self.#ident)
        }
    }
}

fn constructor_argument(krate: &syn::Path, field: &FieldInfo) -> TokenStream {
    let ident = &field.ident;
    let name = &field.name;
    let column_type = &field.column_type;
    let argument = quote! {
        #krate::argument::<Self, #column_type>(&mut values, #name)?
    };
    if field.optional {
        quote! { #ident: ::std::option::Option::Some(#argument) }
    } else {
        quote! { #ident: #argument }
    }
}
