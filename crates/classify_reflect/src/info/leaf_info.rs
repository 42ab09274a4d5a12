use crate::info::{Type, Typed};

// -----------------------------------------------------------------------------
// LeafInfo

/// Text shape of a leaf value.
///
/// `Char` and `Str` get special escaping for control characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafKind {
    Bool,
    Int,
    Float,
    Char,
    Str,
}

/// Type info of a leaf type.
#[derive(Debug)]
pub struct LeafInfo {
    ty: Type,
    kind: LeafKind,
}

impl LeafInfo {
    pub fn new<T: Typed>(kind: LeafKind) -> Self {
        Self {
            ty: Type::of::<T>(),
            kind,
        }
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn kind(&self) -> LeafKind {
        self.kind
    }
}

// -----------------------------------------------------------------------------
// EnumInfo

/// Type info of a fieldless enum.
///
/// Variants are stored by the name written to the tree, in declaration order.
#[derive(Debug)]
pub struct EnumInfo {
    ty: Type,
    variants: &'static [&'static str],
}

impl EnumInfo {
    pub fn new<T: Typed>(variants: &'static [&'static str]) -> Self {
        Self {
            ty: Type::of::<T>(),
            variants,
        }
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn variants(&self) -> &'static [&'static str] {
        self.variants
    }

    /// Returns the declaration index of the variant written as `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|variant| *variant == name)
    }
}
