use alloc::sync::Arc;

use crate::error::{ClassifyError, ConstructionCause};
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{SharedInfo, TypeInfo, TypePath, Typed};
use crate::ops::SharedSlot;
use crate::reflection::impl_classify_cast_fn;
use crate::{Classify, ParentHandle};

impl<T: TypePath> TypePath for Arc<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["alloc::sync::Arc<", T::type_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Arc<", T::type_name(), ">"]))
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("alloc::sync")
    }
}

impl<T: Typed> Typed for Arc<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Shared(SharedInfo::new::<Self, T>()))
    }

    #[inline]
    fn instantiate() -> Option<Self> {
        T::instantiate().map(Arc::new)
    }
}

impl<T: Typed> Classify for Arc<T> {
    impl_classify_cast_fn!(Shared);

    fn reset(&mut self) {
        if let Some(value) = T::instantiate() {
            *self = Arc::new(value);
        }
    }
}

impl<T: Typed> SharedSlot for Arc<T> {
    #[inline]
    fn inner(&self) -> &dyn Classify {
        T::as_classify(&**self)
    }

    fn rebuild(
        &mut self,
        fill: &mut dyn FnMut(&mut dyn Classify, ParentHandle) -> Result<(), ClassifyError>,
    ) -> Result<(), ClassifyError> {
        let mut value = T::instantiate().ok_or_else(|| {
            ClassifyError::construction(T::type_path(), ConstructionCause::NoDefault)
        })?;

        let mut outcome = Ok(());
        let shared = Arc::new_cyclic(|weak| {
            outcome = fill(&mut value, ParentHandle::new(weak.clone()));
            value
        });
        outcome?;

        *self = shared;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ConstructionCause;
    use crate::ops::SharedSlot;
    use crate::{ClassifyError, ParentHandle};
    use alloc::sync::Arc;

    #[test]
    fn rebuild_hands_out_the_new_allocation() {
        let mut shared = Arc::new(1_u32);
        let mut seen: Option<ParentHandle> = None;

        shared
            .rebuild(&mut |value, handle| {
                *value.downcast_mut::<u32>().unwrap() = 7;
                seen = Some(handle);
                Ok(())
            })
            .unwrap();

        assert_eq!(*shared, 7);
        let weak = seen.unwrap().downcast::<u32>().unwrap();
        assert!(Arc::ptr_eq(&weak.upgrade().unwrap(), &shared));
    }

    #[test]
    fn failed_fill_keeps_old_value() {
        let mut shared = Arc::new(1_u32);
        let result = shared.rebuild(&mut |_, _| {
            Err(ClassifyError::construction("u32", ConstructionCause::NoDefault))
        });
        assert!(result.is_err());
        assert_eq!(*shared, 1);
    }
}
