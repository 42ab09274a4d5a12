use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::hash::Hash;
use std::collections::HashMap;

use crate::Classify;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{MapInfo, TypeInfo, TypePath, Typed};
use crate::ops::Map;
use crate::reflection::impl_classify_cast_fn;

macro_rules! impl_map {
    ($ty:ident, $module:literal, unordered = $unordered:literal, [$($bounds:tt)*]) => {
        impl<K: TypePath, V: TypePath> TypePath for $ty<K, V> {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    concat(&[
                        $module,
                        "::",
                        stringify!($ty),
                        "<",
                        K::type_path(),
                        ", ",
                        V::type_path(),
                        ">",
                    ])
                })
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    concat(&[stringify!($ty), "<", K::type_name(), ", ", V::type_name(), ">"])
                })
            }

            #[inline]
            fn module_path() -> Option<&'static str> {
                Some($module)
            }
        }

        impl<K: Typed $($bounds)*, V: Typed> Typed for $ty<K, V> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    let info = MapInfo::new::<Self, K, V>();
                    TypeInfo::Map(if $unordered { info.unordered() } else { info })
                })
            }

            #[inline]
            fn instantiate() -> Option<Self> {
                Some(Self::new())
            }
        }

        impl<K: Typed $($bounds)*, V: Typed> Classify for $ty<K, V> {
            impl_classify_cast_fn!(Map);

            #[inline]
            fn reset(&mut self) {
                <$ty<K, V>>::clear(self);
            }
        }

        impl<K: Typed $($bounds)*, V: Typed> Map for $ty<K, V> {
            #[inline]
            fn key_info(&self) -> &'static TypeInfo {
                K::type_info()
            }

            #[inline]
            fn value_info(&self) -> &'static TypeInfo {
                V::type_info()
            }

            #[inline]
            fn is_unordered(&self) -> bool {
                $unordered
            }

            #[inline]
            fn len(&self) -> usize {
                <$ty<K, V>>::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Classify, &dyn Classify)> + '_> {
                Box::new(
                    <&$ty<K, V> as IntoIterator>::into_iter(self)
                        .map(|(key, value)| (key.as_classify(), value.as_classify())),
                )
            }

            #[inline]
            fn clear(&mut self) {
                <$ty<K, V>>::clear(self);
            }

            fn insert(
                &mut self,
                key: Box<dyn Classify>,
                value: Box<dyn Classify>,
            ) -> Result<(), Box<dyn Classify>> {
                let key = key.take::<K>()?;
                let value = value.take::<V>()?;
                <$ty<K, V>>::insert(self, key, value);
                Ok(())
            }
        }
    };
}

impl_map!(BTreeMap, "alloc::collections", unordered = false, [+ Ord]);
impl_map!(HashMap, "std::collections", unordered = true, [+ Eq + Hash]);

#[cfg(test)]
mod tests {
    use crate::info::{TypePath, Typed};
    use crate::ops::Map;
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use std::collections::HashMap;

    #[test]
    fn insert_checks_both_types() {
        let mut map: BTreeMap<String, u8> = BTreeMap::new();
        let rejected = Map::insert(&mut map, Box::new(1_u8), Box::new(1_u8)).unwrap_err();
        assert!(rejected.is::<u8>());
        assert!(Map::insert(&mut map, Box::new(String::from("a")), Box::new(1_u8)).is_ok());
        assert!(Map::insert(&mut map, Box::new(String::from("a")), Box::new(2_u8)).is_ok());
        assert_eq!(Map::len(&map), 1);
        assert_eq!(map["a"], 2);
    }

    #[test]
    fn names_and_order() {
        assert_eq!(<BTreeMap<String, u8>>::type_name(), "BTreeMap<String, u8>");
        assert!(Map::is_unordered(&HashMap::<u8, u8>::new()));
        assert!(<HashMap<String, u8>>::type_info().is_collection());
    }
}
