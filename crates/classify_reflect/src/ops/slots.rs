use alloc::boxed::Box;
use alloc::string::String;

use crate::info::{PolymorphicInfo, TypeInfo};
use crate::{Classify, ClassifyError, ParentHandle};

/// Produces the value of a deferred reference from its id.
pub type Loader = Box<dyn Fn(&str) -> Result<Box<dyn Classify>, ClassifyError> + Send + Sync>;

// -----------------------------------------------------------------------------
// DeferredSlot

/// Type-erased access to a [`DeferredRef`](crate::DeferredRef).
pub trait DeferredSlot: Classify {
    /// Declared type of the referenced value.
    fn inner_info(&self) -> &'static TypeInfo;

    fn id(&self) -> &str;

    /// Returns the value if it is already resolved, without loading it.
    fn resolved(&self) -> Option<&dyn Classify>;

    /// Returns the value, loading it first if needed.
    fn evaluate(&self) -> Result<&dyn Classify, ClassifyError>;

    /// Replaces the reference with a resolved one.
    ///
    /// Gives `value` back if its type does not match.
    fn set_resolved(&mut self, id: String, value: Box<dyn Classify>)
    -> Result<(), Box<dyn Classify>>;

    /// Replaces the reference with an unresolved one backed by `loader`.
    fn defer(&mut self, id: String, loader: Loader);
}

// -----------------------------------------------------------------------------
// PolySlot

/// A `Box<dyn Base>` whose runtime type may differ from the declared one.
pub trait PolySlot: Classify {
    fn polymorphic_info(&self) -> &'static PolymorphicInfo;

    /// The boxed value, viewed as its runtime type.
    fn inner(&self) -> &dyn Classify;

    fn inner_mut(&mut self) -> &mut dyn Classify;
}

// -----------------------------------------------------------------------------
// SharedSlot

/// An `Arc<T>` that can be rebuilt in place.
pub trait SharedSlot: Classify {
    fn inner(&self) -> &dyn Classify;

    /// Replaces the shared value with a fresh default one.
    ///
    /// `fill` runs before the new allocation is published and receives a
    /// handle to it, so children can hold a back reference.
    fn rebuild(
        &mut self,
        fill: &mut dyn FnMut(&mut dyn Classify, ParentHandle) -> Result<(), ClassifyError>,
    ) -> Result<(), ClassifyError>;
}

// -----------------------------------------------------------------------------
// ParentSlot

/// A [`Parent`](crate::Parent) back reference.
pub trait ParentSlot: Classify {
    /// Points the back reference at `handle`.
    ///
    /// A missing handle, or one to an object of another type, clears it.
    fn assign(&mut self, handle: Option<&ParentHandle>);

    fn is_assigned(&self) -> bool;
}
