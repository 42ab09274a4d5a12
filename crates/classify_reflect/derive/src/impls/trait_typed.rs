use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ClassifyMeta;

/// Generate implementation code for `Typed`
///
/// `type_info_tokens` builds the `TypeInfo`, `instantiate_tokens` is the
/// body of `instantiate`.
pub(crate) fn impl_trait_typed(
    meta: &ClassifyMeta,
    type_info_tokens: TokenStream,
    instantiate_tokens: TokenStream,
) -> TokenStream {
    let classify_path = meta.classify_path();
    let trait_typed_ = crate::path::typed_(classify_path);
    let type_info_ = crate::path::type_info_(classify_path);

    let inner_cell_tokens = if meta.impl_with_generic() {
        let info_cell = crate::path::generic_type_info_cell_(classify_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_insert::<Self>(|| {
                #type_info_tokens
            })
        }
    } else {
        let info_cell = crate::path::non_generic_type_info_cell_(classify_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_init(|| {
                #type_info_tokens
            })
        }
    };

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) =
        meta.split_generics(&trait_typed_, meta.has_default());

    quote! {
        impl #impl_generics #trait_typed_ for #ident #ty_generics #where_clause {
            fn type_info() -> &'static #type_info_ {
                #inner_cell_tokens
            }

            #[inline]
            fn instantiate() -> ::core::option::Option<Self> {
                #instantiate_tokens
            }
        }
    }
}
