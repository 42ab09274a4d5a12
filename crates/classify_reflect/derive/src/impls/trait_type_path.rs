use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ClassifyMeta;

fn static_path_cell(classify_path: &syn::Path, generator: TokenStream) -> TokenStream {
    let path_cell_ = crate::path::generic_type_path_cell_(classify_path);

    quote! {
        static CELL: #path_cell_ = #path_cell_::new();
        CELL.get_or_insert::<Self>(|| {
            #generator
        })
    }
}

/// Generate implementation codes for `TypePath`
pub(crate) fn impl_trait_type_path(meta: &ClassifyMeta) -> TokenStream {
    let classify_path = meta.classify_path();
    let trait_type_path_ = crate::path::type_path_(classify_path);

    let (type_path, type_name, inline_flag) = if meta.impl_with_generic() {
        (
            static_path_cell(classify_path, meta.type_path_tokens()),
            static_path_cell(classify_path, meta.type_name_tokens()),
            crate::utils::empty(),
        )
    } else {
        (
            meta.type_path_tokens(),
            meta.type_name_tokens(),
            quote! { #[inline] },
        )
    };

    let module_path = meta.module_path_tokens();
    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(&trait_type_path_, false);

    quote! {
        impl #impl_generics #trait_type_path_ for #ident #ty_generics #where_clause {
            #inline_flag
            fn type_path() -> &'static str {
                #type_path
            }

            #inline_flag
            fn type_name() -> &'static str {
                #type_name
            }

            #[inline]
            fn module_path() -> ::core::option::Option<&'static str> {
                #module_path
            }
        }
    }
}
