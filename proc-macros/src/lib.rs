//! `#[derive(BinaryTable)]` generates typed field accessors for fixed-layout binary records.
//!
//! The struct is never instantiated: its declaration only describes a layout.
//! Each field’s type gives its width in bytes and the order of fields gives its offset.
//! Supported field types are `u8`, `i8`, the byte-order marker types of `oldtype::types`
//! (`u16_le`, `u32_be`, …), and byte arrays `[u8; N]` for skipped regions.
//!
//! For a field `foo: u16_le` at offset 4, the derive adds:
//!
//! ```ignore
//! impl Position<Record> {
//!     pub(crate) fn foo(self) -> Position<u16_le> { self.offset_bytes(4) }
//! }
//! ```
//!
//! Fields whose name starts with an underscore are only padding and get no accessor.

extern crate proc_macro;

use proc_macro2::TokenStream;
use quote::{quote, ToTokens};

/// Inherent methods of `Position<T>` that accessors must not shadow
const POSITION_METHODS: &[&str] = &[
    "initial",
    "at",
    "byte_position",
    "cast",
    "offset_bytes",
    "offset",
    "followed_by",
    "read_from",
];

#[proc_macro_derive(BinaryTable)]
pub fn derive_binary_table(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input: syn::DeriveInput = syn::parse(input).unwrap();
    let struct_ = if let syn::Data::Struct(ref struct_) = input.data {
        struct_
    } else {
        panic!("#[derive(BinaryTable)] only supports structs")
    };

    let mut methods = TokenStream::new();
    let mut offset: u32 = 0;
    for field in struct_.fields.iter() {
        let name = field.ident.as_ref().expect("Unsupported unnamed field");
        let ty = &field.ty;
        if POSITION_METHODS.contains(&name.to_string().as_str()) {
            panic!("Field name {} is already a method of Position", name)
        }
        if !name.to_string().starts_with('_') {
            methods.extend(quote! {
                pub(crate) fn #name(self) -> crate::parsing::Position<#ty> {
                    self.offset_bytes(#offset)
                }
            });
        }
        offset += size_of(ty);
    }
    let size_of = offset;

    let name = &input.ident;
    let tokens = quote! {
        impl crate::parsing::Layout for #name {
            const SIZE: u32 = #size_of;
        }

        impl crate::parsing::Position<#name> {
            #methods
        }
    };

    tokens.into()
}

fn size_of(ty: &syn::Type) -> u32 {
    match *ty {
        syn::Type::Path(ref path) => {
            assert!(path.qself.is_none());
            let last = path.path.segments.last().expect("Empty type path");
            match last.ident.to_string().as_str() {
                "u8" | "i8" => 1,
                "u16_le" | "i16_le" => 2,
                "u32_le" | "i32_le" | "f32_le" | "u32_be" | "i32_be" => 4,
                _ => panic!("The size of {} is unknown", ty.into_token_stream()),
            }
        }
        syn::Type::Array(ref array) => {
            assert_eq!(size_of(&array.elem), 1, "Only byte arrays are supported");
            match array.len {
                syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Int(ref length),
                    ..
                }) => length
                    .base10_parse()
                    .expect("Array length does not fit in u32"),
                _ => panic!("Array length must be an integer literal"),
            }
        }
        _ => panic!("Unsupported field type: {}", ty.into_token_stream()),
    }
}
