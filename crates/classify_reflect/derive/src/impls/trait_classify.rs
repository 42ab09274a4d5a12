use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

use crate::derive_data::ClassifyMeta;

/// Generate implementation code for `Classify`
///
/// `kind` names the `ClassifyRef` / `ClassifyMut` variant. `extra_methods`
/// holds overrides such as `is_zero`.
pub(crate) fn impl_trait_classify(
    meta: &ClassifyMeta,
    kind: Ident,
    extra_methods: TokenStream,
    reset_tokens: TokenStream,
) -> TokenStream {
    let classify_path = meta.classify_path();
    let classify_ = crate::path::classify_(classify_path);
    let classify_ref_ = crate::path::classify_ref_(classify_path);
    let classify_mut_ = crate::path::classify_mut_(classify_path);
    let typed_ = crate::path::typed_(classify_path);
    let box_ = crate::path::box_(classify_path);

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) =
        meta.split_generics(&typed_, meta.has_default());

    quote! {
        impl #impl_generics #classify_ for #ident #ty_generics #where_clause {
            #[inline]
            fn as_classify(&self) -> &dyn #classify_ {
                self
            }

            #[inline]
            fn as_classify_mut(&mut self) -> &mut dyn #classify_ {
                self
            }

            fn set(
                &mut self,
                value: #box_<dyn #classify_>,
            ) -> ::core::result::Result<(), #box_<dyn #classify_>> {
                *self = value.take::<Self>()?;
                ::core::result::Result::Ok(())
            }

            #[inline]
            fn classify_ref(&self) -> #classify_ref_<'_> {
                #classify_ref_::#kind(self)
            }

            #[inline]
            fn classify_mut(&mut self) -> #classify_mut_<'_> {
                #classify_mut_::#kind(self)
            }

            #extra_methods

            fn reset(&mut self) {
                #reset_tokens
            }
        }
    }
}
