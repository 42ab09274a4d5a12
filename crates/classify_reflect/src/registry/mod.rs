//! Runtime lookup of polymorphic subtypes.
//!
//! A field of type `Box<dyn Base>` may hold any type implementing `Base`.
//! The codec writes a discriminator naming the runtime type, and the
//! [`TypeRegistry`] maps that name back to a constructor.
//!
//! - [`PolyBase`]: implemented for `dyn Base` by [`impl_polymorphic!`].
//! - [`TypeRegistry`]: subtype constructors grouped by base.
//!
//! ## auto_register
//!
//! With the `auto_register` feature, `#[classify(subtype_of = dyn Base)]`
//! submits a registration through the [`inventory`] crate, and
//! [`TypeRegistry::new`] collects them. Without it, register subtypes by
//! hand with [`TypeRegistry::register_subtype`].
//!
//! [`impl_polymorphic!`]: crate::impl_polymorphic
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod poly_base;
mod type_registry;

// -----------------------------------------------------------------------------
// Exports

pub use poly_base::PolyBase;
pub use type_registry::{SubtypeEntry, TypeRegistry};
