//! Derive macro for the `Model` trait
//!
//! Generates the property table and a `match` per accessor. Conversions go through
//! `buoy::ValueType`, so every field type must implement it.

use proc_macro::TokenStream;
use quote::quote;
use std::collections::HashSet;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

use crate::attributes::parse_field_options;
use crate::utils;

struct MappedField<'a> {
    ident: &'a syn::Ident,
    ty: &'a syn::Type,
    property: String,
}

/// Generate the `Model` implementation for a struct with named fields
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &input.ident;

    let fields = match &input.data {
        Data::Struct(syn::DataStruct {
            fields: Fields::Named(fields),
            ..
        }) => &fields.named,
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Model can only be derived for structs with named fields",
            ));
        }
    };

    let mut mapped = Vec::new();
    let mut seen = HashSet::new();
    for field in fields {
        let options = parse_field_options(field)?;
        if options.skip {
            continue;
        }
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let property = options
            .property
            .unwrap_or_else(|| utils::camel_case(&ident.unraw().to_string()));
        if !seen.insert(property.clone()) {
            return Err(syn::Error::new_spanned(
                ident,
                format!("duplicate model property `{property}`"),
            ));
        }
        mapped.push(MappedField {
            ident,
            ty: &field.ty,
            property,
        });
    }

    let properties: Vec<&str> = mapped.iter().map(|f| f.property.as_str()).collect();

    let setters = mapped.iter().map(|f| {
        let MappedField { ident, ty, property } = f;
        quote! {
            #property => {
                self.#ident = <#ty as ::buoy::ValueType>::from_value(value)?;
                ::core::result::Result::Ok(())
            }
        }
    });

    let getters = mapped.iter().map(|f| {
        let MappedField { ident, ty, property } = f;
        quote! {
            #property => ::core::option::Option::Some(
                <#ty as ::buoy::ValueType>::into_value(::core::clone::Clone::clone(&self.#ident))
            ),
        }
    });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::buoy::Model for #struct_name #ty_generics #where_clause {
            const PROPERTIES: &'static [&'static str] = &[#(#properties),*];

            #[allow(unused_variables)]
            fn set_property(
                &mut self,
                property: &str,
                value: ::buoy::Value,
            ) -> ::core::result::Result<(), ::buoy::ConvertError> {
                match property {
                    #(#setters)*
                    _ => ::core::result::Result::Err(
                        ::buoy::ConvertError::unknown_property(property),
                    ),
                }
            }

            fn property(&self, property: &str) -> ::core::option::Option<::buoy::Value> {
                match property {
                    #(#getters)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}
