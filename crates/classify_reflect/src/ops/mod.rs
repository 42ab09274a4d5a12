//! Access traits, one per kind of value.
//!
//! [`Classify::classify_ref`](crate::Classify::classify_ref) and
//! [`Classify::classify_mut`](crate::Classify::classify_mut) return a
//! [`ClassifyRef`] / [`ClassifyMut`] that exposes the value through exactly
//! one of these traits.

// -----------------------------------------------------------------------------
// Modules

mod array;
mod leaf;
mod list;
mod map;
mod nullable;
mod slots;
mod structs;

// -----------------------------------------------------------------------------
// Exports

pub use array::Array;
pub use leaf::{EnumLeaf, Leaf};
pub use list::List;
pub use map::Map;
pub use nullable::Nullable;
pub use slots::{DeferredSlot, Loader, ParentSlot, PolySlot, SharedSlot};
pub use structs::Struct;

// -----------------------------------------------------------------------------
// ClassifyRef

/// Immutable view of a value by kind.
pub enum ClassifyRef<'a> {
    Leaf(&'a dyn Leaf),
    Enum(&'a dyn EnumLeaf),
    Nullable(&'a dyn Nullable),
    List(&'a dyn List),
    Array(&'a dyn Array),
    Map(&'a dyn Map),
    Struct(&'a dyn Struct),
    Deferred(&'a dyn DeferredSlot),
    Polymorphic(&'a dyn PolySlot),
    Shared(&'a dyn SharedSlot),
    Parent(&'a dyn ParentSlot),
}

// -----------------------------------------------------------------------------
// ClassifyMut

/// Mutable view of a value by kind.
pub enum ClassifyMut<'a> {
    Leaf(&'a mut dyn Leaf),
    Enum(&'a mut dyn EnumLeaf),
    Nullable(&'a mut dyn Nullable),
    List(&'a mut dyn List),
    Array(&'a mut dyn Array),
    Map(&'a mut dyn Map),
    Struct(&'a mut dyn Struct),
    Deferred(&'a mut dyn DeferredSlot),
    Polymorphic(&'a mut dyn PolySlot),
    Shared(&'a mut dyn SharedSlot),
    Parent(&'a mut dyn ParentSlot),
}
