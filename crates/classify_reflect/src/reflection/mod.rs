use alloc::boxed::Box;
use core::any::Any;

use crate::info::DynamicTyped;
use crate::ops::{ClassifyMut, ClassifyRef};

// -----------------------------------------------------------------------------
// Classify

/// A value the codec can turn into a [`Node`](crate::Node) tree and back.
///
/// The trait is object safe. The codec only ever sees `&dyn Classify` and
/// dispatches on [`classify_ref`](Classify::classify_ref) /
/// [`classify_mut`](Classify::classify_mut), which expose the value through
/// one of the access traits in [`ops`](crate::ops).
///
/// Implementations exist for primitives, `String`, `Option`, the standard
/// collections, `[T; N]`, `Arc<T>`, `Box<dyn Base>` for polymorphic bases,
/// [`DeferredRef`](crate::DeferredRef) and [`Parent`](crate::Parent).
/// User types use `#[derive(Classify)]`.
///
/// # Examples
///
/// ```
/// use classify_reflect::{Classify, ops::ClassifyRef};
///
/// let value: &dyn Classify = &42_u16;
/// let ClassifyRef::Leaf(leaf) = value.classify_ref() else { unreachable!() };
/// assert_eq!(leaf.leaf_text(), "42");
/// ```
pub trait Classify: DynamicTyped + Send + Sync + Any {
    fn as_classify(&self) -> &dyn Classify;

    fn as_classify_mut(&mut self) -> &mut dyn Classify;

    /// Replaces `self` with `value` if it has the same type.
    ///
    /// Returns `value` back on a type mismatch.
    fn set(&mut self, value: Box<dyn Classify>) -> Result<(), Box<dyn Classify>>;

    fn classify_ref(&self) -> ClassifyRef<'_>;

    fn classify_mut(&mut self) -> ClassifyMut<'_>;

    /// Returns `true` if the value equals the zero value of its type.
    ///
    /// Only leaves, enums and empty `Option`s have a zero value. Objects and
    /// collections never do; use the empty-collection policy for those.
    fn is_zero(&self) -> bool {
        false
    }

    /// Sets the value back to its default, used when a null marker is
    /// decoded into a non-nullable slot.
    fn reset(&mut self);
}

impl dyn Classify {
    /// Returns `true` if the runtime type is `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut::<T>()
    }

    /// Unboxes the value if it has type `T`, otherwise gives the box back.
    pub fn take<T: Any>(self: Box<Self>) -> Result<T, Box<dyn Classify>> {
        if !self.is::<T>() {
            return Err(self);
        }
        let any: Box<dyn Any> = self;
        match any.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => unreachable!("type checked above"),
        }
    }
}

// -----------------------------------------------------------------------------
// Internal macros

/// Implements the casting methods of [`Classify`] for a `Sized` type.
macro_rules! impl_classify_cast_fn {
    ($kind:ident) => {
        #[inline]
        fn as_classify(&self) -> &dyn $crate::Classify {
            self
        }

        #[inline]
        fn as_classify_mut(&mut self) -> &mut dyn $crate::Classify {
            self
        }

        fn set(
            &mut self,
            value: ::alloc::boxed::Box<dyn $crate::Classify>,
        ) -> Result<(), ::alloc::boxed::Box<dyn $crate::Classify>> {
            *self = value.take::<Self>()?;
            Ok(())
        }

        #[inline]
        fn classify_ref(&self) -> $crate::ops::ClassifyRef<'_> {
            $crate::ops::ClassifyRef::$kind(self)
        }

        #[inline]
        fn classify_mut(&mut self) -> $crate::ops::ClassifyMut<'_> {
            $crate::ops::ClassifyMut::$kind(self)
        }
    };
}

pub(crate) use impl_classify_cast_fn;

#[cfg(test)]
mod tests {
    use crate::Classify;
    use alloc::boxed::Box;
    use alloc::string::String;

    #[test]
    fn take_checks_type() {
        let boxed: Box<dyn Classify> = Box::new(String::from("abc"));
        let boxed = boxed.take::<u32>().unwrap_err();
        assert_eq!(boxed.take::<String>().ok().as_deref(), Some("abc"));
    }

    #[test]
    fn set_replaces_same_type_only() {
        let mut value = 1_i64;
        assert!(value.set(Box::new(9_i64)).is_ok());
        assert_eq!(value, 9);
        assert!(value.set(Box::new(9_i32)).is_err());
        assert_eq!(value, 9);
    }
}
