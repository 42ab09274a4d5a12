use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::{get_auto_register_impl, impl_trait_classify};
use super::{impl_trait_type_path, impl_trait_typed};

use crate::derive_data::ClassifyEnum;

/// Implement `Classify` for a fieldless enum.
///
/// The first variant is the default and zero value.
pub(crate) fn impl_enum(info: &ClassifyEnum) -> TokenStream {
    let meta = info.meta();
    let classify_path = meta.classify_path();
    let type_info_ = crate::path::type_info_(classify_path);
    let enum_info_ = crate::path::enum_info_(classify_path);
    let enum_leaf_ = crate::path::enum_leaf_(classify_path);

    let idents: Vec<_> = info.variants().iter().map(|(ident, _)| *ident).collect();
    let names: Vec<_> = info.variants().iter().map(|(_, name)| name).collect();
    let first = idents[0];

    let type_path_trait_tokens = impl_trait_type_path(meta);

    let typed_trait_tokens = impl_trait_typed(
        meta,
        quote!(#type_info_::Enum(#enum_info_::new::<Self>(&[#(#names),*]))),
        quote!(::core::option::Option::Some(Self::#first)),
    );

    let classify_trait_tokens = impl_trait_classify(
        meta,
        format_ident!("Enum"),
        quote! {
            #[inline]
            fn is_zero(&self) -> bool {
                ::core::matches!(self, Self::#first)
            }
        },
        quote! {
            *self = Self::#first;
        },
    );

    let auto_register_tokens = get_auto_register_impl(meta);
    let ident = meta.ident();

    quote! {
        #type_path_trait_tokens

        #typed_trait_tokens

        #classify_trait_tokens

        impl #enum_leaf_ for #ident {
            fn variant_name(&self) -> &'static str {
                match self {
                    #( Self::#idents => #names, )*
                }
            }

            fn set_variant_name(&mut self, name: &str) -> bool {
                *self = match name {
                    #( #names => Self::#idents, )*
                    _ => return false,
                };
                true
            }
        }

        #auto_register_tokens
    }
}
