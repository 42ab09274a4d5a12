//! The format-agnostic tree exchanged by the classify engine.
//!
//! A [`Node`] has a name, optional text, string attributes and ordered
//! children. Turning nodes into bytes (XML, RON, ...) belongs to the host
//! application; [`Node`] implements serde's traits so any serde format works.
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod node;

// -----------------------------------------------------------------------------
// Exports

pub use node::Node;
