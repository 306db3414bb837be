//! Derive macro for error enums.
//!
//! Generates `std::fmt::Display` and `std::error::Error` implementations.
//! Replacement for the `thiserror` crate, restricted to enums since every
//! error type in this workspace is one.
//!
//! # Usage
//!
//! ```ignore
//! use micro8_derive::Error;
//!
//! #[derive(Debug, Error)]
//! pub enum MyError {
//!     #[error("invalid opcode {0}")]
//!     InvalidOpcode(u8),
//!
//!     #[error("address {address} out of range")]
//!     OutOfRange { address: usize },
//!
//!     #[error("halted")]
//!     Halted,
//! }
//! ```

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Lit, Meta};

/// Derives `Display` and `Error` for an enum.
///
/// Each variant must carry an `#[error("...")]` attribute with the display
/// message. Tuple fields interpolate as `{0}`, `{1}`; named fields as
/// `{field_name}`.
pub fn derive_error(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_error_derive(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_error_derive(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    let data_enum = match &input.data {
        Data::Enum(data_enum) => data_enum,
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Error derive only supports enums",
            ));
        }
    };

    let display_arms = data_enum
        .variants
        .iter()
        .map(|variant| {
            let variant_name = &variant.ident;
            let error_msg = extract_error_message(variant)?;

            let arm = match &variant.fields {
                Fields::Unit => {
                    quote! {
                        Self::#variant_name => write!(f, #error_msg),
                    }
                }
                Fields::Unnamed(fields) => {
                    let field_names: Vec<_> = (0..fields.unnamed.len())
                        .map(|i| quote::format_ident!("f{}", i))
                        .collect();
                    let format_str = convert_positional_to_named(&error_msg, fields.unnamed.len());
                    quote! {
                        Self::#variant_name(#(#field_names),*) => write!(f, #format_str, #(#field_names = #field_names),*),
                    }
                }
                Fields::Named(fields) => {
                    let field_names: Vec<_> = fields.named.iter().map(|f| &f.ident).collect();
                    quote! {
                        Self::#variant_name { #(#field_names),* } => write!(f, #error_msg, #(#field_names = #field_names),*),
                    }
                }
            };

            Ok(arm)
        })
        .collect::<syn::Result<Vec<_>>>()?;

    Ok(quote! {
        impl ::std::fmt::Display for #name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    #(#display_arms)*
                }
            }
        }

        impl ::std::error::Error for #name {}
    })
}

/// Extracts the message from a variant's `#[error("...")]` attribute.
fn extract_error_message(variant: &syn::Variant) -> syn::Result<String> {
    for attr in &variant.attrs {
        if attr.path().is_ident("error") {
            if let Meta::List(meta_list) = &attr.meta {
                let lit = syn::parse2::<Lit>(meta_list.tokens.clone()).map_err(|_| {
                    syn::Error::new_spanned(
                        &attr.meta,
                        "failed to parse #[error] attribute; expected a string literal like #[error(\"invalid opcode {0}\")]",
                    )
                })?;

                if let Lit::Str(lit_str) = lit {
                    return Ok(lit_str.value());
                }

                return Err(syn::Error::new_spanned(
                    &attr.meta,
                    "invalid #[error] attribute: message must be a string literal",
                ));
            }

            return Err(syn::Error::new_spanned(
                &attr.meta,
                "invalid #[error] attribute; use #[error(\"message\")] to describe the error",
            ));
        }
    }

    Err(syn::Error::new_spanned(
        variant,
        format!(
            "missing #[error(\"...\")] attribute on variant `{}`; every error variant must declare a display message",
            variant.ident
        ),
    ))
}

/// Converts positional format args `{0}`, `{1}` to named args `{f0}`, `{f1}`.
fn convert_positional_to_named(format_str: &str, field_count: usize) -> String {
    let mut result = format_str.to_string();
    for i in (0..field_count).rev() {
        let positional = format!("{{{}}}", i);
        let named = format!("{{f{}}}", i);
        result = result.replace(&positional, &named);
    }
    result
}
