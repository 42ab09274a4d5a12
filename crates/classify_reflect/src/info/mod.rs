//! Static type information.
//!
//! Every classifiable type exposes a [`TypeInfo`] through [`Typed`]. The
//! codec reads it to learn declared types: element types of containers,
//! the inner type of `Option` and deferred references, the member table of
//! a struct and the base of a polymorphic slot.

// -----------------------------------------------------------------------------
// Modules

mod container_info;
mod leaf_info;
mod policy;
mod slot_info;
mod struct_info;
mod type_info;
mod type_path;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use container_info::{ArrayInfo, ListInfo, MapInfo, NullableInfo};
pub use leaf_info::{EnumInfo, LeafInfo, LeafKind};
pub use policy::{ClassPolicy, MemberPolicy, PolicyFlags};
pub use slot_info::{BaseType, DeferredInfo, ParentInfo, PolymorphicInfo, SharedInfo};
pub use struct_info::{MemberInfo, StructInfo};
pub use type_info::{Type, TypeInfo};
pub use type_path::TypePath;
pub use typed::{DynamicTyped, Typed};
