use crate::info::{Type, TypeInfo, Typed};

// -----------------------------------------------------------------------------
// NullableInfo

/// Type info of `Option<T>`.
#[derive(Debug)]
pub struct NullableInfo {
    ty: Type,
    inner: fn() -> &'static TypeInfo,
}

impl NullableInfo {
    pub fn new<TOption: Typed, TInner: Typed>() -> Self {
        Self {
            ty: Type::of::<TOption>(),
            inner: TInner::type_info,
        }
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn inner(&self) -> &'static TypeInfo {
        (self.inner)()
    }
}

// -----------------------------------------------------------------------------
// ListInfo

/// Type info of a growable sequence or a set.
///
/// Unordered lists (hash sets) sort their items when encoded, so the output
/// does not depend on the hasher.
#[derive(Debug)]
pub struct ListInfo {
    ty: Type,
    item: fn() -> &'static TypeInfo,
    unordered: bool,
}

impl ListInfo {
    pub fn new<TList: Typed, TItem: Typed>() -> Self {
        Self {
            ty: Type::of::<TList>(),
            item: TItem::type_info,
            unordered: false,
        }
    }

    pub fn unordered(mut self) -> Self {
        self.unordered = true;
        self
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn item(&self) -> &'static TypeInfo {
        (self.item)()
    }

    #[inline]
    pub fn is_unordered(&self) -> bool {
        self.unordered
    }
}

// -----------------------------------------------------------------------------
// ArrayInfo

/// Type info of `[T; N]`.
#[derive(Debug)]
pub struct ArrayInfo {
    ty: Type,
    item: fn() -> &'static TypeInfo,
    capacity: usize,
}

impl ArrayInfo {
    pub fn new<TArray: Typed, TItem: Typed>(capacity: usize) -> Self {
        Self {
            ty: Type::of::<TArray>(),
            item: TItem::type_info,
            capacity,
        }
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn item(&self) -> &'static TypeInfo {
        (self.item)()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

// -----------------------------------------------------------------------------
// MapInfo

/// Type info of a key-value map.
#[derive(Debug)]
pub struct MapInfo {
    ty: Type,
    key: fn() -> &'static TypeInfo,
    value: fn() -> &'static TypeInfo,
    unordered: bool,
}

impl MapInfo {
    pub fn new<TMap: Typed, TKey: Typed, TValue: Typed>() -> Self {
        Self {
            ty: Type::of::<TMap>(),
            key: TKey::type_info,
            value: TValue::type_info,
            unordered: false,
        }
    }

    pub fn unordered(mut self) -> Self {
        self.unordered = true;
        self
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn key(&self) -> &'static TypeInfo {
        (self.key)()
    }

    #[inline]
    pub fn value(&self) -> &'static TypeInfo {
        (self.value)()
    }

    #[inline]
    pub fn is_unordered(&self) -> bool {
        self.unordered
    }

    /// Returns `true` if keys can be written as a `key` attribute:
    /// strings, integers and enums.
    pub fn has_supported_key(&self) -> bool {
        use crate::info::LeafKind;

        match self.key() {
            TypeInfo::Leaf(info) => matches!(info.kind(), LeafKind::Str | LeafKind::Int),
            TypeInfo::Enum(_) => true,
            _ => false,
        }
    }
}
