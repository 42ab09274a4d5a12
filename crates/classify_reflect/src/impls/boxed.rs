use alloc::boxed::Box;

use crate::Classify;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{PolymorphicInfo, TypeInfo, TypePath, Typed};
use crate::ops::PolySlot;
use crate::reflection::impl_classify_cast_fn;
use crate::registry::PolyBase;

impl<B: ?Sized + PolyBase> TypePath for Box<B> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["alloc::boxed::Box<", B::base_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Box<", B::base_name(), ">"]))
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("alloc::boxed")
    }
}

impl<B: ?Sized + PolyBase> Typed for Box<B> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Polymorphic(PolymorphicInfo::new::<Self, B>()))
    }

    #[inline]
    fn instantiate() -> Option<Self> {
        B::fallback()
    }
}

impl<B: ?Sized + PolyBase> Classify for Box<B> {
    impl_classify_cast_fn!(Polymorphic);

    fn reset(&mut self) {
        if let Some(fallback) = B::fallback() {
            *self = fallback;
        }
    }
}

impl<B: ?Sized + PolyBase> PolySlot for Box<B> {
    fn polymorphic_info(&self) -> &'static PolymorphicInfo {
        match Self::type_info() {
            TypeInfo::Polymorphic(info) => info,
            _ => unreachable!("`Box<dyn Base>` always has polymorphic type info"),
        }
    }

    #[inline]
    fn inner(&self) -> &dyn Classify {
        B::as_classify(&**self)
    }

    #[inline]
    fn inner_mut(&mut self) -> &mut dyn Classify {
        B::as_classify_mut(&mut **self)
    }
}

#[cfg(test)]
mod tests {
    use crate::Classify;
    use crate::impl_polymorphic;
    use crate::ops::PolySlot;
    use alloc::boxed::Box;

    pub trait Tool: Classify {}

    impl_polymorphic!(dyn Tool => Hammer);

    #[derive(Classify, Default)]
    struct Hammer {
        weight: u8,
    }

    impl Tool for Hammer {}

    #[test]
    fn slot_and_subtype_are_distinct() {
        let tool: Box<dyn Tool> = Box::new(Hammer { weight: 3 });

        assert!(tool.as_classify().is::<Box<dyn Tool>>());
        assert!(!tool.as_classify().is::<Hammer>());

        assert!((*tool).as_classify().is::<Hammer>());
        let hammer = tool.inner().downcast_ref::<Hammer>().unwrap();
        assert_eq!(hammer.weight, 3);
    }
}
