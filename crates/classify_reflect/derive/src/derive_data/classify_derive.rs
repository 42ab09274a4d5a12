use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, GenericParam, Ident, LitStr, Type};

use super::{ClassifyMeta, FieldAttributes, TypeAttributes, VariantAttributes};

// -----------------------------------------------------------------------------
// ClassifyDerive

/// A parsed `#[derive(Classify)]` input.
pub(crate) enum ClassifyDerive<'a> {
    Struct(ClassifyStruct<'a>),
    Enum(ClassifyEnum<'a>),
}

impl<'a> ClassifyDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        for param in &input.generics.params {
            match param {
                GenericParam::Type(_) => {}
                GenericParam::Lifetime(lifetime) => {
                    return Err(syn::Error::new(
                        lifetime.span(),
                        "`Classify` types must be `'static`, lifetime parameters are not supported",
                    ));
                }
                GenericParam::Const(param) => {
                    return Err(syn::Error::new(
                        param.span(),
                        "const parameters are not supported by `Classify`",
                    ));
                }
            }
        }

        let attrs = TypeAttributes::parse(&input.attrs)?;
        if !attrs.subtype_of.is_empty() && !input.generics.params.is_empty() {
            return Err(syn::Error::new(
                input.generics.span(),
                "`subtype_of` cannot be used on generic types, register each instance with `TypeRegistry::register_subtype`",
            ));
        }
        if let (Some(span), Some(_)) = (attrs.no_default, attrs.subtype_of.first()) {
            return Err(syn::Error::new(
                span,
                "a `subtype_of` type is registered through its `Default`, it cannot be `no_default`",
            ));
        }

        let meta = ClassifyMeta::new(attrs, &input.ident, &input.generics);

        match &input.data {
            Data::Struct(data) => {
                let fields = match &data.fields {
                    Fields::Named(fields) => fields
                        .named
                        .iter()
                        .map(ClassifyField::new)
                        .collect::<syn::Result<Vec<_>>>()?,
                    Fields::Unit => Vec::new(),
                    Fields::Unnamed(fields) => {
                        return Err(syn::Error::new(
                            fields.span(),
                            "`Classify` needs named fields, members are stored by name",
                        ));
                    }
                };
                let info = ClassifyStruct { meta, fields };
                let mut seen = Vec::new();
                for field in info.members() {
                    let name = field.storage_name();
                    if seen.contains(&name) {
                        return Err(syn::Error::new(
                            field.ident.span(),
                            format!("two members are stored as `{name}`"),
                        ));
                    }
                    seen.push(name);
                }
                Ok(Self::Struct(info))
            }
            Data::Enum(data) => {
                if meta.impl_with_generic() {
                    return Err(syn::Error::new(
                        input.generics.span(),
                        "`Classify` enums cannot be generic",
                    ));
                }
                if !meta.attrs().subtype_of.is_empty() {
                    return Err(syn::Error::new(
                        input.ident.span(),
                        "`subtype_of` is only supported on structs",
                    ));
                }
                if data.variants.is_empty() {
                    return Err(syn::Error::new(
                        input.ident.span(),
                        "`Classify` enums need at least one variant",
                    ));
                }

                let mut variants: Vec<(&Ident, LitStr)> = Vec::with_capacity(data.variants.len());
                for variant in &data.variants {
                    if !matches!(variant.fields, Fields::Unit) {
                        return Err(syn::Error::new(
                            variant.span(),
                            "`Classify` enums must be fieldless, they are written as the variant name",
                        ));
                    }
                    let attrs = VariantAttributes::parse(&variant.attrs)?;
                    let name = attrs
                        .rename
                        .unwrap_or_else(|| LitStr::new(&variant.ident.to_string(), variant.ident.span()));
                    if variants.iter().any(|(_, seen)| seen.value() == name.value()) {
                        return Err(syn::Error::new(
                            name.span(),
                            format!("two variants are written as `{}`", name.value()),
                        ));
                    }
                    variants.push((&variant.ident, name));
                }

                if let Some(span) = meta.attrs().no_default {
                    return Err(syn::Error::new(span, "`no_default` is only supported on structs"));
                }
                Ok(Self::Enum(ClassifyEnum { meta, variants }))
            }
            Data::Union(data) => Err(syn::Error::new(
                data.union_token.span(),
                "`Classify` cannot be derived for unions",
            )),
        }
    }
}

// -----------------------------------------------------------------------------
// ClassifyStruct

pub(crate) struct ClassifyStruct<'a> {
    meta: ClassifyMeta<'a>,
    fields: Vec<ClassifyField<'a>>,
}

impl<'a> ClassifyStruct<'a> {
    #[inline]
    pub fn meta(&self) -> &ClassifyMeta<'a> {
        &self.meta
    }

    /// Fields in the member table, in declaration order.
    pub fn members(&self) -> impl Iterator<Item = &ClassifyField<'a>> {
        self.fields.iter().filter(|field| !field.attrs.skip)
    }
}

/// A named field with its attributes.
pub(crate) struct ClassifyField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
}

impl<'a> ClassifyField<'a> {
    fn new(field: &'a syn::Field) -> syn::Result<Self> {
        let Some(ident) = field.ident.as_ref() else {
            return Err(syn::Error::new(field.span(), "expected a named field"));
        };
        Ok(Self {
            ident,
            ty: &field.ty,
            attrs: FieldAttributes::parse(&field.attrs)?,
        })
    }

    /// Rust name of the field, without a raw identifier prefix.
    pub fn field_name(&self) -> String {
        let name = self.ident.to_string();
        name.strip_prefix("r#").map(str::to_owned).unwrap_or(name)
    }

    /// Tag of the child node, `rename` or the field name.
    pub fn storage_name(&self) -> String {
        match &self.attrs.rename {
            Some(lit) => lit.value(),
            None => self.field_name(),
        }
    }
}

// -----------------------------------------------------------------------------
// ClassifyEnum

pub(crate) struct ClassifyEnum<'a> {
    meta: ClassifyMeta<'a>,
    variants: Vec<(&'a Ident, LitStr)>,
}

impl<'a> ClassifyEnum<'a> {
    #[inline]
    pub fn meta(&self) -> &ClassifyMeta<'a> {
        &self.meta
    }

    /// Variant identifiers with the names written for them.
    #[inline]
    pub fn variants(&self) -> &[(&'a Ident, LitStr)] {
        &self.variants
    }
}
