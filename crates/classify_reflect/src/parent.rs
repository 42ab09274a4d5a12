use alloc::sync::{Arc, Weak};
use core::any::Any;
use core::fmt;

use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{ParentInfo, TypeInfo, TypePath, Typed};
use crate::ops::ParentSlot;
use crate::reflection::impl_classify_cast_fn;

// -----------------------------------------------------------------------------
// ParentHandle

/// A type-erased weak reference to an object being decoded.
///
/// The decoder creates one for every value it builds inside an `Arc`, and
/// hands it to the members of that value that are marked as parent.
#[derive(Clone)]
pub struct ParentHandle(Arc<dyn Any + Send + Sync>);

impl ParentHandle {
    pub fn new<P: Any + Send + Sync>(parent: Weak<P>) -> Self {
        Self(Arc::new(parent))
    }

    /// Shortcut for `ParentHandle::new(Arc::downgrade(parent))`.
    pub fn from_arc<P: Any + Send + Sync>(parent: &Arc<P>) -> Self {
        Self::new(Arc::downgrade(parent))
    }

    /// Returns the weak reference if the handle points to a `P`.
    pub fn downcast<P: Any + Send + Sync>(&self) -> Option<Weak<P>> {
        self.0.downcast_ref::<Weak<P>>().cloned()
    }
}

impl fmt::Debug for ParentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ParentHandle")
    }
}

// -----------------------------------------------------------------------------
// Parent

/// A back reference to the object that owns this one.
///
/// Parents are never written. On read the member is pointed at the
/// enclosing object if that object is decoded inside an `Arc<P>`, and left
/// empty otherwise.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use classify_reflect::{Classifier, Classify, Parent};
///
/// #[derive(Classify, Default)]
/// struct Folder {
///     name: String,
///     files: Vec<File>,
/// }
///
/// #[derive(Classify, Default)]
/// struct File {
///     name: String,
///     #[classify(parent)]
///     folder: Parent<Folder>,
/// }
///
/// let classifier = Classifier::default();
/// let folder = Folder {
///     name: "docs".into(),
///     files: vec![File { name: "a.txt".into(), ..Default::default() }],
/// };
///
/// let node = classifier.serialize(&Arc::new(folder)).unwrap();
/// let folder: Arc<Folder> = classifier.deserialize(&node).unwrap();
/// let parent = folder.files[0].folder.get().unwrap();
/// assert_eq!(parent.name, "docs");
/// ```
pub struct Parent<P>(Option<Weak<P>>);

impl<P> Parent<P> {
    pub const fn none() -> Self {
        Self(None)
    }

    pub fn new(parent: Weak<P>) -> Self {
        Self(Some(parent))
    }

    /// Upgrades the back reference.
    pub fn get(&self) -> Option<Arc<P>> {
        self.0.as_ref().and_then(Weak::upgrade)
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.0 = None;
    }
}

impl<P> Default for Parent<P> {
    #[inline]
    fn default() -> Self {
        Self::none()
    }
}

impl<P> Clone for Parent<P> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<P> fmt::Debug for Parent<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Parent").field(&self.is_set()).finish()
    }
}

impl<P: TypePath> TypePath for Parent<P> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["classify_reflect::Parent<", P::type_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Parent<", P::type_name(), ">"]))
    }

    fn module_path() -> Option<&'static str> {
        Some("classify_reflect")
    }
}

impl<P: TypePath + Send + Sync> Typed for Parent<P> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Parent(ParentInfo::new::<Self, P>()))
    }

    #[inline]
    fn instantiate() -> Option<Self> {
        Some(Self::none())
    }
}

impl<P: TypePath + Send + Sync> crate::Classify for Parent<P> {
    impl_classify_cast_fn!(Parent);

    #[inline]
    fn reset(&mut self) {
        self.clear();
    }
}

impl<P: TypePath + Send + Sync> ParentSlot for Parent<P> {
    fn assign(&mut self, handle: Option<&ParentHandle>) {
        self.0 = handle.and_then(ParentHandle::downcast::<P>);
    }

    #[inline]
    fn is_assigned(&self) -> bool {
        self.is_set()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::ParentSlot;

    #[test]
    fn handle_of_other_type_clears() {
        let owner = Arc::new(5_u32);
        let handle = ParentHandle::from_arc(&owner);

        let mut parent = Parent::<u32>::default();
        parent.assign(Some(&handle));
        assert_eq!(parent.get().as_deref(), Some(&5));

        let mut other = Parent::<u64>::new(Weak::new());
        other.assign(Some(&handle));
        assert!(!other.is_set());

        parent.assign(None);
        assert!(parent.get().is_none());
    }
}
