//! Small containers shared by the classify crates.
//!
//! - [`TypeIdMap`]: a map keyed by [`TypeId`](core::any::TypeId), used by the
//!   static type-info cells and the subtype registry.
//! - [`hash`]: hash states and container aliases built on *hashbrown* and *foldhash*.
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod typeid_map;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use typeid_map::TypeIdMap;
