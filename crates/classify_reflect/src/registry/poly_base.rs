use alloc::boxed::Box;

use crate::Classify;
use crate::info::TypeInfo;

/// A base trait object usable as `Box<dyn Base>`.
///
/// Implement it with [`impl_polymorphic!`](crate::impl_polymorphic) in the
/// module that declares the trait. The base trait must have [`Classify`] as
/// a supertrait.
///
/// `Box<dyn Base>` is itself [`Classify`] (the polymorphic slot), so
/// `boxed.as_classify()` erases the box, not the subtype it holds. Deref
/// first, `(*boxed).as_classify()`, or use [`PolySlot::inner`] to reach the
/// subtype.
///
/// [`PolySlot::inner`]: crate::ops::PolySlot::inner
pub trait PolyBase: Classify {
    /// Full path of the trait object, e.g. `dyn my_app::shapes::Shape`.
    fn base_path() -> &'static str;

    /// Short name of the trait object, e.g. `dyn Shape`.
    fn base_name() -> &'static str;

    fn base_module() -> Option<&'static str>;

    /// A fresh value of the declared default subtype.
    ///
    /// `None` for abstract bases.
    fn fallback() -> Option<Box<Self>>;

    /// Type info of the declared default subtype.
    fn fallback_info() -> Option<fn() -> &'static TypeInfo>;
}

/// Declares a polymorphic base trait.
///
/// `impl_polymorphic!(dyn Base => Default)` names `Default` as the declared
/// subtype: values of that type are written without a discriminator, and
/// missing or unknown discriminators decode to it. `impl_polymorphic!(dyn
/// Base)` declares an abstract base.
///
/// Invoke it in the module that declares the trait, so short discriminators
/// resolve in that module.
///
/// # Examples
///
/// ```
/// use classify_reflect::{Classifier, Classify, impl_polymorphic};
///
/// pub trait Shape: Classify {
///     fn area(&self) -> f64;
/// }
///
/// impl_polymorphic!(dyn Shape => Square);
///
/// #[derive(Classify, Default)]
/// #[classify(subtype_of = dyn Shape)]
/// struct Square {
///     side: f64,
/// }
///
/// #[derive(Classify, Default)]
/// #[classify(subtype_of = dyn Shape)]
/// struct Circle {
///     radius: f64,
/// }
///
/// impl Shape for Square {
///     fn area(&self) -> f64 {
///         self.side * self.side
///     }
/// }
///
/// impl Shape for Circle {
///     fn area(&self) -> f64 {
///         3.0 * self.radius * self.radius
///     }
/// }
///
/// let classifier = Classifier::default();
/// let shape: Box<dyn Shape> = Box::new(Circle { radius: 2.0 });
///
/// let node = classifier.serialize(&shape).unwrap();
/// assert_eq!(node.attribute("type"), Some("Circle"));
///
/// let back: Box<dyn Shape> = classifier.deserialize(&node).unwrap();
/// assert_eq!(back.area(), 12.0);
/// ```
#[macro_export]
macro_rules! impl_polymorphic {
    (dyn $base:ident $(=> $fallback:ty)?) => {
        impl $crate::registry::PolyBase for dyn $base {
            #[inline]
            fn base_path() -> &'static str {
                ::core::concat!("dyn ", ::core::module_path!(), "::", ::core::stringify!($base))
            }

            #[inline]
            fn base_name() -> &'static str {
                ::core::concat!("dyn ", ::core::stringify!($base))
            }

            #[inline]
            fn base_module() -> ::core::option::Option<&'static str> {
                ::core::option::Option::Some(::core::module_path!())
            }

            fn fallback() -> ::core::option::Option<$crate::__macro_exports::Box<Self>> {
                $crate::impl_polymorphic!(@fallback $($fallback)?)
            }

            fn fallback_info() -> ::core::option::Option<fn() -> &'static $crate::info::TypeInfo> {
                $crate::impl_polymorphic!(@fallback_info $($fallback)?)
            }
        }
    };
    (@fallback) => {
        ::core::option::Option::None
    };
    (@fallback $fallback:ty) => {
        <$fallback as $crate::info::Typed>::instantiate()
            .map(|value| $crate::__macro_exports::Box::new(value) as $crate::__macro_exports::Box<Self>)
    };
    (@fallback_info) => {
        ::core::option::Option::None
    };
    (@fallback_info $fallback:ty) => {
        ::core::option::Option::Some(
            <$fallback as $crate::info::Typed>::type_info as fn() -> &'static $crate::info::TypeInfo,
        )
    };
}
