use alloc::boxed::Box;

use crate::Classify;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{NullableInfo, TypeInfo, TypePath, Typed};
use crate::ops::Nullable;
use crate::reflection::impl_classify_cast_fn;

impl<T: TypePath> TypePath for Option<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["core::option::Option<", T::type_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Option<", T::type_name(), ">"]))
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("core::option")
    }
}

impl<T: Typed> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Nullable(NullableInfo::new::<Self, T>()))
    }

    #[inline]
    fn instantiate() -> Option<Self> {
        Some(None)
    }
}

impl<T: Typed> Classify for Option<T> {
    impl_classify_cast_fn!(Nullable);

    #[inline]
    fn is_zero(&self) -> bool {
        self.is_none()
    }

    #[inline]
    fn reset(&mut self) {
        *self = None;
    }
}

impl<T: Typed> Nullable for Option<T> {
    #[inline]
    fn inner_info(&self) -> &'static TypeInfo {
        T::type_info()
    }

    fn value(&self) -> Option<&dyn Classify> {
        self.as_ref().map(T::as_classify)
    }

    fn value_mut(&mut self) -> Option<&mut dyn Classify> {
        self.as_mut().map(T::as_classify_mut)
    }

    #[inline]
    fn set_none(&mut self) {
        *self = None;
    }

    fn set_some(&mut self, value: Box<dyn Classify>) -> Result<(), Box<dyn Classify>> {
        *self = Some(value.take::<T>()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Classify;
    use crate::info::{TypePath, Typed};
    use crate::ops::Nullable;
    use alloc::boxed::Box;

    #[test]
    fn names_nest() {
        assert_eq!(<Option<Option<u8>>>::type_name(), "Option<Option<u8>>");
        assert_eq!(
            <Option<u8>>::type_info().nullable_inner().map(|info| info.type_path()),
            Some("u8")
        );
    }

    #[test]
    fn set_some_checks_type() {
        let mut value: Option<u16> = None;
        assert!(value.is_zero());
        assert!(value.set_some(Box::new(1_u32)).is_err());
        assert!(value.set_some(Box::new(7_u16)).is_ok());
        assert_eq!(value, Some(7));
        assert!(!value.is_zero());
    }
}
