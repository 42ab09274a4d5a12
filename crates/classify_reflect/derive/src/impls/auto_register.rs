use proc_macro2::TokenStream;

use crate::derive_data::ClassifyMeta;

/// Generate the `subtype_of` registrations.
///
/// Each base gets a constructor boxing the `Default` value as `Box<dyn Base>`,
/// submitted to the registry through `inventory`.
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(meta: &ClassifyMeta) -> TokenStream {
    use quote::{format_ident, quote};

    let bases = &meta.attrs().subtype_of;
    if bases.is_empty() {
        return crate::utils::empty();
    }

    let classify_path = meta.classify_path();
    let auto_register_ = crate::path::auto_register_(classify_path);
    let type_registry_ = crate::path::type_registry_(classify_path);
    let box_ = crate::path::box_(classify_path);
    let ident = meta.ident();

    let constructors = bases.iter().enumerate().map(|(index, base)| {
        let new = format_ident!("__new_{}", index);
        quote! {
            fn #new() -> #box_<#base> {
                #box_::new(<#ident as ::core::default::Default>::default())
            }
        }
    });
    let registrations = bases.iter().enumerate().map(|(index, base)| {
        let new = format_ident!("__new_{}", index);
        quote! {
            registry.register_subtype::<#base, #ident>(#new);
        }
    });

    quote! {
        const _: () = {
            #(#constructors)*

            fn __register(registry: &mut #type_registry_) {
                #(#registrations)*
            }

            #auto_register_::inventory::submit! {
                #auto_register_::__AutoRegisterFunc(__register)
            }
        };
    }
}

/// Without `auto_register`, subtypes are registered by hand.
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &ClassifyMeta) -> TokenStream {
    crate::utils::empty()
}
