use alloc::boxed::Box;
use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;
use core::hash::Hash;
use std::collections::HashSet;

use crate::Classify;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{ListInfo, TypeInfo, TypePath, Typed};
use crate::ops::List;
use crate::reflection::impl_classify_cast_fn;

macro_rules! impl_list {
    ($ty:ident, $module:literal, $insert:ident, unordered = $unordered:literal, [$($bounds:tt)*]) => {
        impl<T: TypePath> TypePath for $ty<T> {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    concat(&[$module, "::", stringify!($ty), "<", T::type_path(), ">"])
                })
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| concat(&[stringify!($ty), "<", T::type_name(), ">"]))
            }

            #[inline]
            fn module_path() -> Option<&'static str> {
                Some($module)
            }
        }

        impl<T: Typed $($bounds)*> Typed for $ty<T> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    let info = ListInfo::new::<Self, T>();
                    TypeInfo::List(if $unordered { info.unordered() } else { info })
                })
            }

            #[inline]
            fn instantiate() -> Option<Self> {
                Some(Self::new())
            }
        }

        impl<T: Typed $($bounds)*> Classify for $ty<T> {
            impl_classify_cast_fn!(List);

            #[inline]
            fn reset(&mut self) {
                <$ty<T>>::clear(self);
            }
        }

        impl<T: Typed $($bounds)*> List for $ty<T> {
            #[inline]
            fn item_info(&self) -> &'static TypeInfo {
                T::type_info()
            }

            #[inline]
            fn is_unordered(&self) -> bool {
                $unordered
            }

            #[inline]
            fn len(&self) -> usize {
                <$ty<T>>::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = &dyn Classify> + '_> {
                Box::new(<&$ty<T> as IntoIterator>::into_iter(self).map(T::as_classify))
            }

            #[inline]
            fn clear(&mut self) {
                <$ty<T>>::clear(self);
            }

            fn push(&mut self, value: Box<dyn Classify>) -> Result<(), Box<dyn Classify>> {
                let value = value.take::<T>()?;
                self.$insert(value);
                Ok(())
            }
        }
    };
}

impl_list!(Vec, "alloc::vec", push, unordered = false, []);
impl_list!(VecDeque, "alloc::collections", push_back, unordered = false, []);
impl_list!(BTreeSet, "alloc::collections", insert, unordered = false, [+ Ord]);
impl_list!(HashSet, "std::collections", insert, unordered = true, [+ Eq + Hash]);

#[cfg(test)]
mod tests {
    use crate::info::{TypePath, Typed};
    use crate::ops::List;
    use alloc::boxed::Box;
    use alloc::collections::BTreeSet;
    use alloc::vec::Vec;
    use std::collections::HashSet;

    #[test]
    fn push_checks_item_type() {
        let mut list: Vec<u8> = Vec::new();
        assert!(List::push(&mut list, Box::new(3_u8)).is_ok());
        assert!(List::push(&mut list, Box::new(3_u16)).is_err());
        assert_eq!(list, [3]);
        assert_eq!(List::len(&list), 1);
    }

    #[test]
    fn set_kinds() {
        assert!(!List::is_unordered(&BTreeSet::<u8>::new()));
        assert!(List::is_unordered(&HashSet::<u8>::new()));
        assert_eq!(<HashSet<u8>>::type_name(), "HashSet<u8>");
        assert_eq!(
            <Vec<u8>>::type_info().item_info().map(|info| info.type_name()),
            Some("u8")
        );
    }
}
