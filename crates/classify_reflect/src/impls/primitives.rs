use alloc::string::{String, ToString};

use crate::Classify;
use crate::error::LeafParseError;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{LeafInfo, LeafKind, TypeInfo, TypePath, Typed};
use crate::ops::Leaf;
use crate::reflection::impl_classify_cast_fn;

/// Leaf implementation through `Display` / `FromStr`.
macro_rules! impl_leaf {
    ($kind:ident: $($ty:ident),+ $(,)?) => {
        $( impl_leaf!(@impl $kind, $ty, stringify!($ty), stringify!($ty), None); )+
    };
    (@impl $kind:ident, $ty:ty, $path:expr, $name:expr, $module:expr) => {
        impl TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                $path
            }

            #[inline]
            fn type_name() -> &'static str {
                $name
            }

            #[inline]
            fn module_path() -> Option<&'static str> {
                $module
            }
        }

        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Leaf(LeafInfo::new::<Self>(LeafKind::$kind)))
            }

            #[inline]
            fn instantiate() -> Option<Self> {
                Some(<$ty as Default>::default())
            }
        }

        impl Classify for $ty {
            impl_classify_cast_fn!(Leaf);

            #[inline]
            fn is_zero(&self) -> bool {
                *self == <$ty as Default>::default()
            }

            #[inline]
            fn reset(&mut self) {
                *self = <$ty as Default>::default();
            }
        }

        impl Leaf for $ty {
            #[inline]
            fn leaf_kind(&self) -> LeafKind {
                LeafKind::$kind
            }

            #[inline]
            fn leaf_text(&self) -> String {
                self.to_string()
            }

            fn set_leaf_text(&mut self, text: &str) -> Result<(), LeafParseError> {
                *self = text.parse().map_err(|_| LeafParseError {
                    type_path: <$ty as TypePath>::type_path(),
                    text: text.into(),
                })?;
                Ok(())
            }
        }
    };
}

impl_leaf!(Bool: bool);
impl_leaf!(Char: char);
impl_leaf!(Int: i8, i16, i32, i64, i128, isize);
impl_leaf!(Int: u8, u16, u32, u64, u128, usize);
impl_leaf!(Float: f32, f64);
impl_leaf!(@impl Str, String, "alloc::string::String", "String", Some("alloc::string"));

#[cfg(test)]
mod tests {
    use crate::info::{LeafKind, TypeInfo, TypePath, Typed};
    use crate::ops::Leaf;
    use crate::{Classify, error::LeafParseError};
    use alloc::string::String;

    fn reparse<T: Leaf + Typed + PartialEq + core::fmt::Debug>(value: T) {
        let text = value.leaf_text();
        let mut back = T::instantiate().unwrap();
        back.set_leaf_text(&text).unwrap();
        assert_eq!(back, value, "via `{text}`");
    }

    #[test]
    fn integer_bounds_survive_text() {
        reparse(0_i32);
        reparse(i64::MIN);
        reparse(i64::MAX);
        reparse(u128::MAX);
        reparse(i8::MIN);
    }

    #[test]
    fn floats_use_shortest_round_trip_text() {
        reparse(0.1_f64);
        reparse(f32::MAX);
        reparse(-1.5e-300_f64);
        assert_eq!(0.1_f64.leaf_text(), "0.1");
    }

    #[test]
    fn bad_text_names_type() {
        let mut value = 3_u8;
        let error = value.set_leaf_text("300").unwrap_err();
        assert_eq!(
            error,
            LeafParseError {
                type_path: "u8",
                text: "300".into()
            }
        );
        assert_eq!(value, 3);
    }

    #[test]
    fn zero_and_reset() {
        let mut text = String::from("x");
        assert!(!text.is_zero());
        text.reset();
        assert!(text.is_zero());
        assert!('\0'.is_zero());
        assert!(!true.is_zero());
    }

    #[test]
    fn string_info() {
        assert_eq!(String::type_path(), "alloc::string::String");
        assert_eq!(String::module_path(), Some("alloc::string"));
        let TypeInfo::Leaf(info) = String::type_info() else {
            panic!("expected a leaf");
        };
        assert_eq!(info.kind(), LeafKind::Str);
    }
}
