use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;
use std::sync::{Mutex, OnceLock, PoisonError};

use log::{debug, warn};

use crate::Classify;
use crate::error::{ClassifyError, ConstructionCause};
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{DeferredInfo, PolicyFlags, TypeInfo, TypePath, Typed};
use crate::ops::{ClassifyMut, DeferredSlot, Loader};
use crate::reflection::impl_classify_cast_fn;

type Generator<T> = Box<dyn Fn(&str) -> Result<T, ClassifyError> + Send + Sync>;

// -----------------------------------------------------------------------------
// DeferredRef

/// A value identified by an id and loaded on first read.
///
/// A reference built in code is resolved from the start. The decoder builds
/// unresolved ones for members marked `follow_id`, backed by the object
/// store. Once resolved, a reference never goes back.
///
/// The generator runs at most once, even with concurrent first reads. A
/// failed read returns the error and leaves the reference unresolved, so a
/// later read tries again.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use classify_reflect::DeferredRef;
///
/// static CALLS: AtomicUsize = AtomicUsize::new(0);
///
/// let reference = DeferredRef::<String>::with_generator("greeting", |id| {
///     CALLS.fetch_add(1, Ordering::Relaxed);
///     Ok(format!("hello from {id}"))
/// });
/// assert!(!reference.is_resolved());
///
/// assert_eq!(reference.get().unwrap(), "hello from greeting");
/// assert_eq!(reference.get().unwrap(), "hello from greeting");
/// assert_eq!(CALLS.load(Ordering::Relaxed), 1);
/// ```
pub struct DeferredRef<T> {
    id: String,
    value: OnceLock<T>,
    generator: Mutex<Option<Generator<T>>>,
}

impl<T> DeferredRef<T> {
    /// Creates a resolved reference.
    pub fn new(id: impl Into<String>, value: T) -> Self {
        Self {
            id: id.into(),
            value: OnceLock::from(value),
            generator: Mutex::new(None),
        }
    }

    /// Creates an unresolved reference, `generator` receives the id.
    pub fn with_generator(
        id: impl Into<String>,
        generator: impl Fn(&str) -> Result<T, ClassifyError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            value: OnceLock::new(),
            generator: Mutex::new(Some(Box::new(generator))),
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.value.get().is_some()
    }

    /// Returns the value if it is resolved, without loading it.
    #[inline]
    pub fn try_get(&self) -> Option<&T> {
        self.value.get()
    }

    /// Replaces the value. The reference is resolved afterwards and keeps
    /// its id.
    pub fn set(&mut self, value: T) {
        self.value = OnceLock::from(value);
        *self.generator.get_mut().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl<T: Typed> DeferredRef<T> {
    /// Returns the value, running the generator on first access.
    ///
    /// On that first access, members of the produced value marked `id` are
    /// set to the id of this reference.
    pub fn get(&self) -> Result<&T, ClassifyError> {
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        let mut generator = self.generator.lock().unwrap_or_else(PoisonError::into_inner);
        // Resolved by another reader while this one waited.
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        let Some(generate) = generator.as_ref() else {
            return Err(ClassifyError::construction(
                T::type_path(),
                ConstructionCause::NoDefault,
            ));
        };

        debug!("evaluating deferred `{}` with id `{}`", T::type_path(), self.id);
        let mut value = generate(&self.id)?;
        backfill_id(value.as_classify_mut(), &self.id);
        *generator = None;

        Ok(self.value.get_or_init(|| value))
    }

    /// Like [`get`](Self::get), with mutable access.
    pub fn get_mut(&mut self) -> Result<&mut T, ClassifyError> {
        self.get()?;
        match self.value.get_mut() {
            Some(value) => Ok(value),
            None => unreachable!("resolved by `get`"),
        }
    }

    /// Resolves the reference and returns the value.
    pub fn into_inner(self) -> Result<T, ClassifyError> {
        self.get()?;
        match self.value.into_inner() {
            Some(value) => Ok(value),
            None => unreachable!("resolved by `get`"),
        }
    }
}

impl<T: Typed> Default for DeferredRef<T> {
    /// A resolved reference with an empty id and a default value.
    ///
    /// If `T` has no default instance the reference is left unresolved and
    /// reading it fails.
    fn default() -> Self {
        match T::instantiate() {
            Some(value) => Self::new(String::new(), value),
            None => Self {
                id: String::new(),
                value: OnceLock::new(),
                generator: Mutex::new(None),
            },
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for DeferredRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredRef")
            .field("id", &self.id)
            .field("value", &self.value.get())
            .finish()
    }
}

/// Writes `id` into the members of `target` marked `id`.
fn backfill_id(target: &mut dyn Classify, id: &str) {
    match target.classify_mut() {
        ClassifyMut::Struct(object) => {
            let info = object.struct_info();
            for (index, member) in info.members().iter().enumerate() {
                if !member.has(PolicyFlags::ID) {
                    continue;
                }
                if let Some(field) = object.field_at_mut(index) {
                    assign_id(field, id, member.field_name());
                }
            }
        }
        ClassifyMut::Polymorphic(slot) => backfill_id(slot.inner_mut(), id),
        _ => {}
    }
}

fn assign_id(field: &mut dyn Classify, id: &str, name: &str) {
    let assigned = match field.classify_mut() {
        ClassifyMut::Leaf(leaf) => leaf.set_leaf_text(id).is_ok(),
        ClassifyMut::Nullable(nullable) => nullable.set_some(Box::new(String::from(id))).is_ok(),
        _ => false,
    };
    if !assigned {
        warn!("cannot write id `{id}` into member `{name}`");
    }
}

// -----------------------------------------------------------------------------
// Classify

impl<T: TypePath> TypePath for DeferredRef<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["classify_reflect::DeferredRef<", T::type_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["DeferredRef<", T::type_name(), ">"]))
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("classify_reflect")
    }
}

impl<T: Typed> Typed for DeferredRef<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Deferred(DeferredInfo::new::<Self, T>()))
    }

    #[inline]
    fn instantiate() -> Option<Self> {
        Some(Self::default())
    }
}

impl<T: Typed> Classify for DeferredRef<T> {
    impl_classify_cast_fn!(Deferred);

    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl<T: Typed> DeferredSlot for DeferredRef<T> {
    #[inline]
    fn inner_info(&self) -> &'static TypeInfo {
        T::type_info()
    }

    #[inline]
    fn id(&self) -> &str {
        &self.id
    }

    fn resolved(&self) -> Option<&dyn Classify> {
        self.value.get().map(T::as_classify)
    }

    fn evaluate(&self) -> Result<&dyn Classify, ClassifyError> {
        self.get().map(T::as_classify)
    }

    fn set_resolved(
        &mut self,
        id: String,
        value: Box<dyn Classify>,
    ) -> Result<(), Box<dyn Classify>> {
        *self = Self::new(id, value.take::<T>()?);
        Ok(())
    }

    fn defer(&mut self, id: String, loader: Loader) {
        *self = Self::with_generator(id, move |id| {
            loader(id)?.take::<T>().map_err(|other| {
                ClassifyError::construction(
                    other.classify_type_info().type_path(),
                    ConstructionCause::Mismatch(T::type_path()),
                )
            })
        });
    }
}

#[cfg(test)]
mod tests {
    use super::DeferredRef;
    use crate::Classify;
    use crate::error::{ClassifyError, StoreError};
    use alloc::string::String;
    use core::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Classify, Default, Debug, PartialEq)]
    #[classify(type_path = "tests::Record")]
    struct Record {
        #[classify(id)]
        key: String,
        #[classify(id)]
        alias: Option<String>,
        size: u32,
    }

    fn counted(calls: &Arc<AtomicUsize>) -> DeferredRef<Record> {
        let calls = calls.clone();
        DeferredRef::with_generator("r-1", move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Record {
                size: 9,
                ..Default::default()
            })
        })
    }

    #[test]
    fn generator_never_runs_unread() {
        let calls = Arc::new(AtomicUsize::new(0));
        let reference = counted(&calls);
        assert!(reference.try_get().is_none());
        drop(reference);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn first_read_backfills_ids_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let reference = counted(&calls);

        let record = reference.get().unwrap();
        assert_eq!(record.key, "r-1");
        assert_eq!(record.alias.as_deref(), Some("r-1"));
        assert_eq!(record.size, 9);

        reference.get().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(reference.id(), "r-1");
    }

    #[test]
    fn concurrent_first_reads_share_one_evaluation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let reference = counted(&calls);

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| assert_eq!(reference.get().unwrap().size, 9));
            }
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failure_is_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let reference = DeferredRef::<u32>::with_generator("n", move |id| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(ClassifyError::Store(StoreError::NotFound {
                    type_name: "u32".into(),
                    id: id.into(),
                }))
            } else {
                Ok(5)
            }
        });

        assert!(reference.get().is_err());
        assert!(!reference.is_resolved());
        assert_eq!(*reference.get().unwrap(), 5);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn set_resolves_and_keeps_id() {
        let mut reference = DeferredRef::<u8>::with_generator("x", |_| Ok(1));
        reference.set(4);
        assert!(reference.is_resolved());
        assert_eq!(reference.id(), "x");
        assert_eq!(reference.into_inner().unwrap(), 4);

        let reference = DeferredRef::new(String::from("y"), 2_u8);
        assert_eq!(reference.try_get(), Some(&2));
    }
}
