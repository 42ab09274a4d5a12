use syn::{Attribute, Expr, LitStr};

use crate::CLASSIFY_ATTRIBUTE_NAME;

/// Flag attributes and the `PolicyFlags` constant each one sets.
const POLICY_FLAGS: &[(&str, &str)] = &[
    ("ignore", "IGNORE"),
    ("parent", "PARENT"),
    ("follow_id", "FOLLOW_ID"),
    ("id", "ID"),
    ("ignore_if_default", "IGNORE_IF_DEFAULT"),
    ("ignore_if_empty", "IGNORE_IF_EMPTY"),
    ("keep_default", "KEEP_DEFAULT"),
    ("keep_empty", "KEEP_EMPTY"),
];

// -----------------------------------------------------------------------------
// FieldAttributes

/// Field level `#[classify(...)]` attributes.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    /// `skip`: the field is left out of the member table entirely.
    pub skip: bool,
    /// `rename = "Name"`: storage name of the member.
    pub rename: Option<LitStr>,
    /// Names of the `PolicyFlags` constants to set.
    pub flags: Vec<&'static str>,
    /// `ignore_if_equal = expr`.
    pub ignore_if_equal: Option<Expr>,
}

impl FieldAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        let mut first = None;

        for attr in attrs {
            if !attr.path().is_ident(CLASSIFY_ATTRIBUTE_NAME) {
                continue;
            }
            first.get_or_insert(attr);
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    out.skip = true;
                } else if meta.path.is_ident("rename") {
                    out.rename = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("ignore_if_equal") {
                    out.ignore_if_equal = Some(meta.value()?.parse()?);
                } else if let Some(&(_, flag)) =
                    POLICY_FLAGS.iter().find(|(name, _)| meta.path.is_ident(name))
                {
                    if !out.flags.contains(&flag) {
                        out.flags.push(flag);
                    }
                } else {
                    return Err(meta.error("unknown field level `classify` attribute"));
                }
                Ok(())
            })?;
        }

        if out.skip
            && (out.rename.is_some() || !out.flags.is_empty() || out.ignore_if_equal.is_some())
            && let Some(attr) = first
        {
            return Err(syn::Error::new_spanned(
                attr,
                "`skip` removes the member, it cannot be combined with other attributes",
            ));
        }

        Ok(out)
    }
}

// -----------------------------------------------------------------------------
// VariantAttributes

/// Variant level `#[classify(...)]` attributes.
#[derive(Default, Debug)]
pub(crate) struct VariantAttributes {
    /// `rename = "Name"`: text written for the variant.
    pub rename: Option<LitStr>,
}

impl VariantAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(CLASSIFY_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    out.rename = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("only `rename` is supported on enum variants"))
                }
            })?;
        }
        Ok(out)
    }
}
