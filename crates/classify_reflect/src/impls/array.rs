use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;

use crate::Classify;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{ArrayInfo, TypeInfo, TypePath, Typed};
use crate::ops::Array;
use crate::reflection::impl_classify_cast_fn;

impl<T: TypePath, const N: usize> TypePath for [T; N] {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["[", T::type_path(), "; ", &N.to_string(), "]"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["[", T::type_name(), "; ", &N.to_string(), "]"]))
    }
}

impl<T: Typed, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Array(ArrayInfo::new::<Self, T>(N)))
    }

    fn instantiate() -> Option<Self> {
        let mut items = Vec::with_capacity(N);
        for _ in 0..N {
            items.push(T::instantiate()?);
        }
        items.try_into().ok()
    }
}

impl<T: Typed, const N: usize> Classify for [T; N] {
    impl_classify_cast_fn!(Array);

    fn reset(&mut self) {
        self.iter_mut().for_each(T::reset);
    }
}

impl<T: Typed, const N: usize> Array for [T; N] {
    #[inline]
    fn item_info(&self) -> &'static TypeInfo {
        T::type_info()
    }

    #[inline]
    fn len(&self) -> usize {
        N
    }

    fn get(&self, index: usize) -> Option<&dyn Classify> {
        self.as_slice().get(index).map(T::as_classify)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Classify> {
        self.as_mut_slice().get_mut(index).map(T::as_classify_mut)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Classify> + '_> {
        Box::new(self.as_slice().iter().map(T::as_classify))
    }
}

#[cfg(test)]
mod tests {
    use crate::Classify;
    use crate::info::{TypePath, Typed};
    use crate::ops::Array;

    #[test]
    fn names_carry_length() {
        assert_eq!(<[u8; 3]>::type_path(), "[u8; 3]");
        assert_eq!(<[[bool; 2]; 4]>::type_name(), "[[bool; 2]; 4]");
    }

    #[test]
    fn instantiate_and_reset() {
        let mut array = <[i32; 3]>::instantiate().unwrap();
        assert_eq!(array, [0, 0, 0]);
        array = [4, 5, 6];
        assert_eq!(Array::len(&array), 3);
        assert!(Array::get(&array, 3).is_none());
        array.reset();
        assert_eq!(array, [0, 0, 0]);
    }
}
