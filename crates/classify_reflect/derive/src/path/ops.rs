use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn classify_ref_(path: &syn::Path) -> TokenStream {
    quote! {
        #path::ops::ClassifyRef
    }
}

#[inline(always)]
pub(crate) fn classify_mut_(path: &syn::Path) -> TokenStream {
    quote! {
        #path::ops::ClassifyMut
    }
}

#[inline(always)]
pub(crate) fn struct_(path: &syn::Path) -> TokenStream {
    quote! {
        #path::ops::Struct
    }
}

#[inline(always)]
pub(crate) fn enum_leaf_(path: &syn::Path) -> TokenStream {
    quote! {
        #path::ops::EnumLeaf
    }
}
