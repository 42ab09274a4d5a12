use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};
use syn::LitStr;

use super::{get_auto_register_impl, impl_trait_classify};
use super::{impl_trait_type_path, impl_trait_typed};

use crate::derive_data::{ClassifyField, ClassifyStruct};

/// Implement `Classify` for a struct with named fields.
pub(crate) fn impl_struct(info: &ClassifyStruct) -> TokenStream {
    let meta = info.meta();

    let type_path_trait_tokens = impl_trait_type_path(meta);

    let instantiate_tokens = if meta.has_default() {
        quote!(::core::option::Option::Some(<Self as ::core::default::Default>::default()))
    } else {
        quote!(::core::option::Option::None)
    };
    let typed_trait_tokens = impl_trait_typed(meta, get_struct_info_tokens(info), instantiate_tokens);

    let classify_trait_tokens = impl_trait_classify(
        meta,
        format_ident!("Struct"),
        crate::utils::empty(),
        get_struct_reset_tokens(info),
    );

    let struct_trait_tokens = impl_trait_struct(info);

    let auto_register_tokens = get_auto_register_impl(meta);

    quote! {
        #type_path_trait_tokens

        #typed_trait_tokens

        #classify_trait_tokens

        #struct_trait_tokens

        #auto_register_tokens
    }
}

/// Builds the `TypeInfo::Struct(...)` expression.
fn get_struct_info_tokens(info: &ClassifyStruct) -> TokenStream {
    let classify_path = info.meta().classify_path();
    let type_info_ = crate::path::type_info_(classify_path);
    let struct_info_ = crate::path::struct_info_(classify_path);
    let class_policy_ = crate::path::class_policy_(classify_path);
    let vec_ = crate::path::vec_(classify_path);

    let members = info.members().map(|field| get_member_info_tokens(classify_path, field));

    let attrs = info.meta().attrs();
    let mut class_flags = Vec::new();
    if attrs.ignore_if_default {
        class_flags.push(quote!(#class_policy_::IGNORE_IF_DEFAULT));
    }
    if attrs.ignore_if_empty {
        class_flags.push(quote!(#class_policy_::IGNORE_IF_EMPTY));
    }
    let with_class_policy = if class_flags.is_empty() {
        crate::utils::empty()
    } else {
        quote!(.with_class_policy(#(#class_flags)|*))
    };

    quote! {
        #type_info_::Struct(
            #struct_info_::new::<Self>(#vec_::from([
                #(#members),*
            ]))
            #with_class_policy
        )
    }
}

/// Builds one `MemberInfo::new::<T>(...)` expression.
fn get_member_info_tokens(classify_path: &syn::Path, field: &ClassifyField) -> TokenStream {
    let member_info_ = crate::path::member_info_(classify_path);
    let member_policy_ = crate::path::member_policy_(classify_path);
    let policy_flags_ = crate::path::policy_flags_(classify_path);

    let ty = field.ty;
    let field_name = LitStr::new(&field.field_name(), field.ident.span());

    let with_storage_name = match &field.attrs.rename {
        Some(rename) => quote!(.with_storage_name(#rename)),
        None => crate::utils::empty(),
    };

    let flags = &field.attrs.flags;
    let with_policy = if flags.is_empty() && field.attrs.ignore_if_equal.is_none() {
        crate::utils::empty()
    } else {
        let flags_tokens = if flags.is_empty() {
            quote!(#policy_flags_::empty())
        } else {
            let flags = flags.iter().map(|flag| format_ident!("{}", flag));
            quote!(#(#policy_flags_::#flags)|*)
        };
        let ignore_if_equal = match &field.attrs.ignore_if_equal {
            Some(value) => quote!(.ignore_if_equal::<#ty>(#value)),
            None => crate::utils::empty(),
        };
        quote!(.with_policy(#member_policy_::new(#flags_tokens)#ignore_if_equal))
    };

    quote! {
        #member_info_::new::<#ty>(#field_name)
            #with_storage_name
            #with_policy
    }
}

/// Body of `Classify::reset`.
fn get_struct_reset_tokens(info: &ClassifyStruct) -> TokenStream {
    if info.meta().has_default() {
        return quote! {
            *self = <Self as ::core::default::Default>::default();
        };
    }

    let classify_ = crate::path::classify_(info.meta().classify_path());
    let idents = info.members().map(|field| field.ident);
    quote! {
        #( #classify_::reset(&mut self.#idents); )*
    }
}

/// Implement the `Struct` access trait.
fn impl_trait_struct(info: &ClassifyStruct) -> TokenStream {
    let meta = info.meta();
    let classify_path = meta.classify_path();
    let classify_ = crate::path::classify_(classify_path);
    let struct_ = crate::path::struct_(classify_path);
    let struct_info_ = crate::path::struct_info_(classify_path);
    let type_info_ = crate::path::type_info_(classify_path);
    let typed_ = crate::path::typed_(classify_path);

    let indices: Vec<Literal> = (0..info.members().count())
        .map(Literal::usize_unsuffixed)
        .collect();
    let idents: Vec<_> = info.members().map(|field| field.ident).collect();

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) =
        meta.split_generics(&typed_, meta.has_default());

    quote! {
        impl #impl_generics #struct_ for #ident #ty_generics #where_clause {
            #[inline]
            fn struct_info(&self) -> &'static #struct_info_ {
                match <Self as #typed_>::type_info() {
                    #type_info_::Struct(info) => info,
                    _ => ::core::unreachable!("`{}` is a struct", ::core::stringify!(#ident)),
                }
            }

            fn field_at(&self, index: usize) -> ::core::option::Option<&dyn #classify_> {
                match index {
                    #( #indices => ::core::option::Option::Some(#classify_::as_classify(&self.#idents)), )*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at_mut(&mut self, index: usize) -> ::core::option::Option<&mut dyn #classify_> {
                match index {
                    #( #indices => ::core::option::Option::Some(#classify_::as_classify_mut(&mut self.#idents)), )*
                    _ => ::core::option::Option::None,
                }
            }
        }
    }
}
