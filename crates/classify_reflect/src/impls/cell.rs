//! Static storage for type information.
//!
//! `Typed::type_info` returns a `&'static TypeInfo`, built on first use.
//!
//! - Non-generic types keep it in a [`NonGenericTypeInfoCell`], a thin
//!   wrapper over [`OnceLock`].
//! - A `static` inside a generic function is shared by every
//!   instantiation, so generic types use [`GenericTypeInfoCell`] and
//!   [`GenericTypePathCell`], which key the stored value by [`TypeId`].

use alloc::boxed::Box;
use alloc::string::String;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use classify_utils::TypeIdMap;

use crate::info::TypeInfo;

mod sealed {
    use super::TypeInfo;
    use alloc::string::String;

    pub trait CellValue: Send + Sync + 'static {}

    impl CellValue for String {}
    impl CellValue for TypeInfo {}
}

use sealed::CellValue;

// -----------------------------------------------------------------------------
// NonGenericTypeCell

/// Cell for the type info of a non-generic type.
pub struct NonGenericTypeCell<T: CellValue>(OnceLock<T>);

/// Cell for the [`TypeInfo`] of a non-generic type.
///
/// # Example
///
/// ```ignore
/// impl Typed for Meters {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Leaf(LeafInfo::new::<Self>(LeafKind::Float)))
///     }
///     // ...
/// }
/// ```
pub type NonGenericTypeInfoCell = NonGenericTypeCell<TypeInfo>;

impl<T: CellValue> NonGenericTypeCell<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored value, building it with `f` on first access.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> T) -> &T {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericTypeCell

/// Cell for the type info of a generic type, one entry per instantiation.
///
/// Entries are leaked on insertion so they can be handed out as `'static`.
pub struct GenericTypeCell<T: CellValue>(RwLock<TypeIdMap<&'static T>>);

/// Cell for the [`TypeInfo`] of a generic type.
///
/// # Example
///
/// ```ignore
/// impl<T: Typed> Typed for Wrapper<T> {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
///         CELL.get_or_insert::<Self>(|| TypeInfo::Nullable(NullableInfo::new::<Self, T>()))
///     }
///     // ...
/// }
/// ```
pub type GenericTypeInfoCell = GenericTypeCell<TypeInfo>;

/// Cell for the computed type path or name of a generic type.
///
/// # Example
///
/// ```
/// use classify_reflect::impls::{GenericTypePathCell, concat};
/// use classify_reflect::info::TypePath;
///
/// struct Wrapper<T>(T);
///
/// impl<T: TypePath> TypePath for Wrapper<T> {
///     fn type_path() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| concat(&["demo::Wrapper<", T::type_path(), ">"]))
///     }
///     fn type_name() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| concat(&["Wrapper<", T::type_name(), ">"]))
///     }
/// }
///
/// assert_eq!(<Wrapper<u8>>::type_path(), "demo::Wrapper<u8>");
/// assert_eq!(<Wrapper<bool>>::type_name(), "Wrapper<bool>");
/// ```
pub type GenericTypePathCell = GenericTypeCell<String>;

impl<T: CellValue> GenericTypeCell<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the value stored for `G`, building it with `f` on first access.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> T) -> &T {
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(&self, type_id: TypeId, f: impl FnOnce() -> T) -> &T {
        let found = self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied();

        match found {
            Some(value) => value,
            // `f` may itself read other cells, so it runs without the lock held.
            None => {
                let value = f();
                *self
                    .0
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .get_or_insert(type_id, || Box::leak(Box::new(value)))
            }
        }
    }
}
