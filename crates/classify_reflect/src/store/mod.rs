//! Object stores backing [`DeferredRef`](crate::DeferredRef) members.
//!
//! A member marked `follow_id` is written as an id only. Its value is saved
//! to, and later loaded from, an [`ObjectStore`] under the short type name of
//! the referenced type and that id.

// -----------------------------------------------------------------------------
// Modules

#[cfg(feature = "fs")]
mod directory;
mod memory;

// -----------------------------------------------------------------------------
// Exports

#[cfg(feature = "fs")]
pub use directory::DirectoryStore;
pub use memory::MemoryStore;

use classify_tree::Node;

use crate::error::StoreError;

// -----------------------------------------------------------------------------
// ObjectStore

/// A key-value store of node trees, keyed by `(type_name, id)`.
pub trait ObjectStore: Send + Sync {
    fn load(&self, type_name: &str, id: &str) -> Result<Node, StoreError>;

    fn save(&self, type_name: &str, id: &str, node: &Node) -> Result<(), StoreError>;
}
