//! Paths of the `classify_reflect` items named by generated code.
//!
//! Everything goes through the crate path found by [`classify_reflect`], so
//! a reorganisation of `classify_reflect` only touches this module.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Returns the path under which the invoking crate sees `classify_reflect`.
///
/// 1. Crates that depend on `classify_reflect` get `::classify_reflect`.
/// 2. Crates that depend on the `classify` facade get `::classify::reflect`.
/// 3. Anything else gets `::classify_reflect`, which may not resolve.
///
/// This reads the caller's `Cargo.toml`, so the result is computed once per
/// derive and passed around.
pub(crate) fn classify_reflect() -> syn::Path {
    classify_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("classify_reflect"))
}

// -----------------------------------------------------------------------------
// Modules

mod info;
mod ops;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use info::*;
pub(crate) use ops::*;

#[inline(always)]
pub(crate) fn classify_(path: &syn::Path) -> TokenStream {
    quote! {
        #path::Classify
    }
}

#[inline(always)]
pub(crate) fn box_(path: &syn::Path) -> TokenStream {
    quote! {
        #path::__macro_exports::Box
    }
}

#[inline(always)]
pub(crate) fn vec_(path: &syn::Path) -> TokenStream {
    quote! {
        #path::__macro_exports::Vec
    }
}

#[inline(always)]
pub(crate) fn concat_(path: &syn::Path) -> TokenStream {
    quote! {
        #path::impls::concat
    }
}

#[inline(always)]
pub(crate) fn non_generic_type_info_cell_(path: &syn::Path) -> TokenStream {
    quote! {
        #path::impls::NonGenericTypeInfoCell
    }
}

#[inline(always)]
pub(crate) fn generic_type_info_cell_(path: &syn::Path) -> TokenStream {
    quote! {
        #path::impls::GenericTypeInfoCell
    }
}

#[inline(always)]
pub(crate) fn generic_type_path_cell_(path: &syn::Path) -> TokenStream {
    quote! {
        #path::impls::GenericTypePathCell
    }
}

#[inline(always)]
pub(crate) fn type_registry_(path: &syn::Path) -> TokenStream {
    quote! {
        #path::registry::TypeRegistry
    }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(path: &syn::Path) -> TokenStream {
    quote! {
        #path::__macro_exports::auto_register
    }
}
