use alloc::collections::BTreeMap;
use alloc::string::String;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use classify_tree::Node;
use log::debug;

use crate::error::StoreError;
use crate::store::ObjectStore;

/// An [`ObjectStore`] kept in memory.
///
/// # Examples
///
/// ```
/// use classify_reflect::Node;
/// use classify_reflect::store::{MemoryStore, ObjectStore};
///
/// let store = MemoryStore::new();
/// store.save("Item", "a", &Node::leaf("item", "1")).unwrap();
///
/// assert_eq!(store.load("Item", "a").unwrap().text(), Some("1"));
/// assert!(store.load("Item", "b").is_err());
/// assert_eq!(store.load_count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    nodes: RwLock<BTreeMap<(String, String), Node>>,
    loads: AtomicUsize,
}

impl MemoryStore {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `node` without going through [`ObjectStore::save`].
    pub fn insert(&self, type_name: impl Into<String>, id: impl Into<String>, node: Node) {
        self.nodes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((type_name.into(), id.into()), node);
    }

    /// Returns a copy of a stored node.
    pub fn get(&self, type_name: &str, id: &str) -> Option<Node> {
        self.nodes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(String::from(type_name), String::from(id)))
            .cloned()
    }

    pub fn contains(&self, type_name: &str, id: &str) -> bool {
        self.get(type_name, id).is_some()
    }

    pub fn len(&self) -> usize {
        self.nodes.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of [`ObjectStore::load`] calls so far, failed ones included.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }
}

impl ObjectStore for MemoryStore {
    fn load(&self, type_name: &str, id: &str) -> Result<Node, StoreError> {
        self.loads.fetch_add(1, Ordering::Relaxed);
        debug!("loading `{type_name}` `{id}` from memory");
        self.get(type_name, id).ok_or_else(|| StoreError::NotFound {
            type_name: type_name.into(),
            id: id.into(),
        })
    }

    fn save(&self, type_name: &str, id: &str, node: &Node) -> Result<(), StoreError> {
        debug!("saving `{type_name}` `{id}` to memory");
        self.insert(type_name, id, node.clone());
        Ok(())
    }
}
