use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn type_path_(path: &syn::Path) -> TokenStream {
    quote! {
        #path::info::TypePath
    }
}

#[inline(always)]
pub(crate) fn typed_(path: &syn::Path) -> TokenStream {
    quote! {
        #path::info::Typed
    }
}

#[inline(always)]
pub(crate) fn type_info_(path: &syn::Path) -> TokenStream {
    quote! {
        #path::info::TypeInfo
    }
}

#[inline(always)]
pub(crate) fn struct_info_(path: &syn::Path) -> TokenStream {
    quote! {
        #path::info::StructInfo
    }
}

#[inline(always)]
pub(crate) fn member_info_(path: &syn::Path) -> TokenStream {
    quote! {
        #path::info::MemberInfo
    }
}

#[inline(always)]
pub(crate) fn member_policy_(path: &syn::Path) -> TokenStream {
    quote! {
        #path::info::MemberPolicy
    }
}

#[inline(always)]
pub(crate) fn policy_flags_(path: &syn::Path) -> TokenStream {
    quote! {
        #path::info::PolicyFlags
    }
}

#[inline(always)]
pub(crate) fn class_policy_(path: &syn::Path) -> TokenStream {
    quote! {
        #path::info::ClassPolicy
    }
}

#[inline(always)]
pub(crate) fn enum_info_(path: &syn::Path) -> TokenStream {
    quote! {
        #path::info::EnumInfo
    }
}
