use crate::Classify;
use crate::info::{TypeInfo, TypePath};

// -----------------------------------------------------------------------------
// Typed

/// Static access to the [`TypeInfo`] of a type.
///
/// The info is built once and cached in a static cell, see
/// [`impls`](crate::impls) for the cells and the implementations on standard
/// types. `#[derive(Classify)]` implements it for user types.
pub trait Typed: TypePath + Classify + Sized {
    /// Returns the cached type information.
    fn type_info() -> &'static TypeInfo;

    /// Returns a fresh default instance.
    ///
    /// `None` if the type cannot be built without more information, e.g. a
    /// polymorphic box whose base has no default subtype.
    fn instantiate() -> Option<Self>;
}

// -----------------------------------------------------------------------------
// DynamicTyped

/// Object-safe access to [`Typed::type_info`].
pub trait DynamicTyped {
    /// Returns the type information of the runtime type.
    fn classify_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn classify_type_info(&self) -> &'static TypeInfo {
        T::type_info()
    }
}
