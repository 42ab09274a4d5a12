use proc_macro2::Span;
use syn::{Attribute, LitStr, Type};

use crate::CLASSIFY_ATTRIBUTE_NAME;

/// Type level `#[classify(...)]` attributes.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    /// `type_path = "my_app::shapes::Square"`, replaces
    /// `module_path!()::Ident`. Generic arguments are appended.
    pub type_path: Option<LitStr>,
    /// `ignore_if_default`, applied to every member.
    pub ignore_if_default: bool,
    /// `ignore_if_empty`, applied to every member.
    pub ignore_if_empty: bool,
    /// `no_default`: the type has no `Default` and cannot be built by the
    /// decoder.
    pub no_default: Option<Span>,
    /// `subtype_of = dyn Base`, may be repeated.
    pub subtype_of: Vec<Type>,
}

impl TypeAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(CLASSIFY_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("type_path") {
                    let lit: LitStr = meta.value()?.parse()?;
                    let value = lit.value();
                    if value.is_empty() || value.starts_with("::") || value.ends_with("::") {
                        return Err(syn::Error::new(
                            lit.span(),
                            "`type_path` must be a path like `my_crate::module::Type`",
                        ));
                    }
                    out.type_path = Some(lit);
                } else if meta.path.is_ident("ignore_if_default") {
                    out.ignore_if_default = true;
                } else if meta.path.is_ident("ignore_if_empty") {
                    out.ignore_if_empty = true;
                } else if meta.path.is_ident("no_default") {
                    out.no_default = Some(meta.path.require_ident()?.span());
                } else if meta.path.is_ident("subtype_of") {
                    out.subtype_of.push(meta.value()?.parse()?);
                } else {
                    return Err(meta.error("unknown type level `classify` attribute"));
                }
                Ok(())
            })?;
        }

        Ok(out)
    }

    /// Splits a custom `type_path` into module and name.
    pub fn split_type_path(&self) -> Option<(Option<String>, String)> {
        let path = self.type_path.as_ref()?.value();
        Some(match path.rsplit_once("::") {
            Some((module, name)) => (Some(module.to_owned()), name.to_owned()),
            None => (None, path),
        })
    }
}
