use proc_macro2::{Span, TokenStream};
use quote::{ToTokens, quote};
use syn::{Generics, Ident, ImplGenerics, LitStr, Path, TypeGenerics};

use super::TypeAttributes;

/// What every generated impl needs to know about the deriving type.
pub(crate) struct ClassifyMeta<'a> {
    classify_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
    generics: &'a Generics,
}

impl core::fmt::Debug for ClassifyMeta<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ClassifyMeta")
            .field("classify_path", &self.classify_path.to_token_stream())
            .field("ident", &self.ident)
            .field("attrs", &self.attrs)
            .finish()
    }
}

impl<'a> ClassifyMeta<'a> {
    pub fn new(attrs: TypeAttributes, ident: &'a Ident, generics: &'a Generics) -> Self {
        Self {
            classify_path: crate::path::classify_reflect(),
            attrs,
            ident,
            generics,
        }
    }

    /// Path of `classify_reflect` as seen from the invoking crate.
    #[inline]
    pub fn classify_path(&self) -> &Path {
        &self.classify_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn ident(&self) -> &'a Ident {
        self.ident
    }

    /// Whether `TypePath` and `Typed` need per-instantiation cells.
    #[inline]
    pub fn impl_with_generic(&self) -> bool {
        !self.generics.params.is_empty()
    }

    fn type_params(&self) -> impl Iterator<Item = &'a Ident> + use<'a> {
        let generics: &'a Generics = self.generics;
        generics.type_params().map(|param| &param.ident)
    }

    /// Splits the generics for an impl block, bounding every type parameter
    /// by `bound`.
    ///
    /// With `require_default`, generic types also get `Self: Default`.
    pub fn split_generics(
        &self,
        bound: &TokenStream,
        require_default: bool,
    ) -> (ImplGenerics<'a>, TypeGenerics<'a>, TokenStream) {
        let generics: &'a Generics = self.generics;
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

        let mut predicates: Vec<TokenStream> = where_clause
            .map(|clause| clause.predicates.iter().map(ToTokens::to_token_stream).collect())
            .unwrap_or_default();
        predicates.extend(self.type_params().map(|param| quote!(#param: #bound)));
        if require_default && self.impl_with_generic() {
            predicates.push(quote!(Self: ::core::default::Default));
        }

        let where_clause = if predicates.is_empty() {
            crate::utils::empty()
        } else {
            quote!(where #(#predicates,)*)
        };

        (impl_generics, ty_generics, where_clause)
    }

    /// Whether the type has a `Default` the decoder can start from.
    #[inline]
    pub fn has_default(&self) -> bool {
        self.attrs.no_default.is_none()
    }

    // -------------------------------------------------------------------------
    // Names

    /// `Some(module)` expression for `TypePath::module_path`.
    pub fn module_path_tokens(&self) -> TokenStream {
        match self.attrs.split_type_path() {
            Some((Some(module), _)) => {
                let module = LitStr::new(&module, Span::call_site());
                quote!(::core::option::Option::Some(#module))
            }
            Some((None, _)) => quote!(::core::option::Option::None),
            None => quote!(::core::option::Option::Some(::core::module_path!())),
        }
    }

    /// Path of the type without generic arguments, a constant `&str`
    /// expression.
    fn base_path_tokens(&self) -> TokenStream {
        match &self.attrs.type_path {
            Some(lit) => lit.to_token_stream(),
            None => {
                let name = self.ident.to_string();
                quote!(::core::concat!(::core::module_path!(), "::", #name))
            }
        }
    }

    /// Name of the type without generic arguments.
    fn base_name(&self) -> LitStr {
        let name = match self.attrs.split_type_path() {
            Some((_, name)) => name,
            None => self.ident.to_string(),
        };
        LitStr::new(&name, self.ident.span())
    }

    /// `&'static str` expression of `TypePath::type_path` for non-generic
    /// types, or `String` expression for generic ones.
    pub fn type_path_tokens(&self) -> TokenStream {
        let base = self.base_path_tokens();
        self.with_generic_args(base, quote!(type_path))
    }

    /// Same as [`type_path_tokens`](Self::type_path_tokens), for
    /// `TypePath::type_name`.
    pub fn type_name_tokens(&self) -> TokenStream {
        let base = self.base_name().to_token_stream();
        self.with_generic_args(base, quote!(type_name))
    }

    fn with_generic_args(&self, base: TokenStream, method: TokenStream) -> TokenStream {
        if !self.impl_with_generic() {
            return base;
        }

        let type_path_ = crate::path::type_path_(&self.classify_path);
        let concat_ = crate::path::concat_(&self.classify_path);

        let mut parts = vec![base, quote!("<")];
        for (index, param) in self.type_params().enumerate() {
            if index > 0 {
                parts.push(quote!(", "));
            }
            parts.push(quote!(<#param as #type_path_>::#method()));
        }
        parts.push(quote!(">"));

        quote!(#concat_(&[#(#parts),*]))
    }
}
