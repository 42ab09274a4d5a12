use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::Classify;
use crate::info::{ArrayInfo, DeferredInfo, EnumInfo, LeafInfo, ListInfo, MapInfo};
use crate::info::{NullableInfo, ParentInfo, PolymorphicInfo, SharedInfo, StructInfo, Typed};

// -----------------------------------------------------------------------------
// Type

/// Identity and names of a type, plus its default factory.
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    path: &'static str,
    name: &'static str,
    module_path: Option<&'static str>,
    instantiate: fn() -> Option<Box<dyn Classify>>,
}

impl Type {
    /// Captures the identity of `T`.
    pub fn of<T: Typed>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: T::type_path(),
            name: T::type_name(),
            module_path: T::module_path(),
            instantiate: || T::instantiate().map(|value| Box::new(value) as Box<dyn Classify>),
        }
    }

    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// See [`TypePath::type_path`](crate::info::TypePath::type_path).
    #[inline]
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// See [`TypePath::type_name`](crate::info::TypePath::type_name).
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn module_path(&self) -> Option<&'static str> {
        self.module_path
    }

    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// Returns `true` if the name carries generic arguments.
    #[inline]
    pub fn is_generic(&self) -> bool {
        self.name.contains('<')
    }

    /// Builds a boxed default instance, see [`Typed::instantiate`].
    #[inline]
    pub fn instantiate(&self) -> Option<Box<dyn Classify>> {
        (self.instantiate)()
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time information of a classifiable type.
///
/// The variant decides which codec handles values of the type.
#[derive(Debug)]
pub enum TypeInfo {
    /// Single text value: numbers, `bool`, `char`, `String`.
    Leaf(LeafInfo),
    /// Fieldless enum, written as the variant name.
    Enum(EnumInfo),
    /// `Option<T>`.
    Nullable(NullableInfo),
    /// Growable sequences and sets.
    List(ListInfo),
    /// Fixed size arrays.
    Array(ArrayInfo),
    /// Key-value maps.
    Map(MapInfo),
    /// Types with a member table.
    Struct(StructInfo),
    /// [`DeferredRef<T>`](crate::DeferredRef).
    Deferred(DeferredInfo),
    /// `Box<dyn Base>` for a polymorphic base trait.
    Polymorphic(PolymorphicInfo),
    /// `Arc<T>`, decoded so that children may refer back to it.
    Shared(SharedInfo),
    /// [`Parent<P>`](crate::Parent) back references.
    Parent(ParentInfo),
}

impl TypeInfo {
    pub fn ty(&self) -> &Type {
        match self {
            Self::Leaf(info) => info.ty(),
            Self::Enum(info) => info.ty(),
            Self::Nullable(info) => info.ty(),
            Self::List(info) => info.ty(),
            Self::Array(info) => info.ty(),
            Self::Map(info) => info.ty(),
            Self::Struct(info) => info.ty(),
            Self::Deferred(info) => info.ty(),
            Self::Polymorphic(info) => info.ty(),
            Self::Shared(info) => info.ty(),
            Self::Parent(info) => info.ty(),
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.ty().id()
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.ty().name()
    }

    #[inline]
    pub fn module_path(&self) -> Option<&'static str> {
        self.ty().module_path()
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    #[inline]
    pub fn is_enum(&self) -> bool {
        matches!(self, Self::Enum(_))
    }

    /// Returns `true` for lists, arrays and maps.
    #[inline]
    pub fn is_collection(&self) -> bool {
        matches!(self, Self::List(_) | Self::Array(_) | Self::Map(_))
    }

    #[inline]
    pub fn as_struct(&self) -> Option<&StructInfo> {
        match self {
            Self::Struct(info) => Some(info),
            _ => None,
        }
    }

    #[inline]
    pub fn as_leaf(&self) -> Option<&LeafInfo> {
        match self {
            Self::Leaf(info) => Some(info),
            _ => None,
        }
    }

    /// Returns the wrapped type of an `Option`.
    #[inline]
    pub fn nullable_inner(&self) -> Option<&'static TypeInfo> {
        match self {
            Self::Nullable(info) => Some(info.inner()),
            _ => None,
        }
    }

    /// Returns the element type of a list or an array, or the value type of a map.
    pub fn item_info(&self) -> Option<&'static TypeInfo> {
        match self {
            Self::List(info) => Some(info.item()),
            Self::Array(info) => Some(info.item()),
            Self::Map(info) => Some(info.value()),
            _ => None,
        }
    }

    /// Builds a boxed default instance of this type.
    #[inline]
    pub fn instantiate(&self) -> Option<Box<dyn Classify>> {
        self.ty().instantiate()
    }
}
