use core::any::TypeId;
use core::fmt::Debug;

use crate::hash::NoOpHashState;
use crate::hash::hashbrown::HashMap;
use crate::hash::hashbrown::hash_map::Entry;

// -----------------------------------------------------------------------------
// TypeIdMap

/// A map keyed by [`TypeId`].
///
/// `TypeId` is already a well distributed hash, so the map skips hashing
/// through [`NoOpHashState`].
///
/// # Examples
///
/// ```
/// use classify_utils::TypeIdMap;
///
/// let mut map = TypeIdMap::new();
/// map.insert_type::<u8>("u8");
/// assert_eq!(map.get_type::<u8>(), Some(&"u8"));
/// assert!(!map.contains_type::<u16>());
/// ```
pub struct TypeIdMap<V>(HashMap<TypeId, V, NoOpHashState>);

impl<V> TypeIdMap<V> {
    /// Creates an empty map, usable in `static` items.
    #[inline]
    pub const fn new() -> Self {
        Self(HashMap::with_hasher(NoOpHashState))
    }

    /// Returns the value for `type_id`, inserting the result of `f` first
    /// if the key is absent.
    #[inline]
    pub fn get_or_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> &mut V {
        match self.0.entry(type_id) {
            Entry::Vacant(entry) => entry.insert(f()),
            Entry::Occupied(entry) => entry.into_mut(),
        }
    }

    pub fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.0.get(type_id)
    }

    #[inline(always)]
    pub fn get_type<T: ?Sized + 'static>(&self) -> Option<&V> {
        self.get(&TypeId::of::<T>())
    }

    pub fn get_mut(&mut self, type_id: &TypeId) -> Option<&mut V> {
        self.0.get_mut(type_id)
    }

    pub fn insert(&mut self, type_id: TypeId, v: V) -> Option<V> {
        self.0.insert(type_id, v)
    }

    #[inline(always)]
    pub fn insert_type<T: ?Sized + 'static>(&mut self, v: V) -> Option<V> {
        self.insert(TypeId::of::<T>(), v)
    }

    pub fn contains(&self, type_id: &TypeId) -> bool {
        self.0.contains_key(type_id)
    }

    #[inline(always)]
    pub fn contains_type<T: ?Sized + 'static>(&self) -> bool {
        self.contains(&TypeId::of::<T>())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Visits all values in arbitrary order.
    #[inline]
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.0.values()
    }
}

// -----------------------------------------------------------------------------
// Traits

impl<T> Default for TypeIdMap<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug> Debug for TypeIdMap<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::TypeIdMap;
    use core::any::TypeId;

    #[test]
    fn get_or_insert_runs_once() {
        let mut map = TypeIdMap::new();
        let mut calls = 0;
        for _ in 0..3 {
            map.get_or_insert(TypeId::of::<i32>(), || {
                calls += 1;
                calls
            });
        }
        assert_eq!(calls, 1);
        assert_eq!(map.get_type::<i32>(), Some(&1));
        assert_eq!(map.len(), 1);
    }
}
