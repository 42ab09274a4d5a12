use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;

use classify_utils::TypeIdMap;

use crate::Classify;
use crate::info::{TypeInfo, Typed};
use crate::registry::PolyBase;

// -----------------------------------------------------------------------------
// SubtypeEntry

type Constructor = Box<dyn Fn() -> Box<dyn Classify> + Send + Sync>;

/// A registered subtype of a polymorphic base.
pub struct SubtypeEntry {
    info: &'static TypeInfo,
    construct: Constructor,
}

impl SubtypeEntry {
    /// Type info of the concrete subtype.
    #[inline]
    pub fn info(&self) -> &'static TypeInfo {
        self.info
    }

    /// Builds a `Box<dyn Base>` holding a default value of the subtype,
    /// erased as `Box<dyn Classify>`.
    #[inline]
    pub fn construct(&self) -> Box<dyn Classify> {
        (self.construct)()
    }
}

impl fmt::Debug for SubtypeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SubtypeEntry")
            .field(&self.info.type_path())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// TypeRegistry

/// Subtype constructors keyed by polymorphic base.
///
/// # Example
///
/// ```
/// use classify_reflect::registry::TypeRegistry;
/// use classify_reflect::{Classify, impl_polymorphic};
///
/// pub trait Animal: Classify {}
/// impl_polymorphic!(dyn Animal);
///
/// #[derive(Classify, Default)]
/// struct Cat {
///     lives: u8,
/// }
/// impl Animal for Cat {}
///
/// let mut registry = TypeRegistry::empty();
/// registry.register_subtype::<dyn Animal, Cat>(|| Box::new(Cat::default()));
///
/// let base = core::any::TypeId::of::<dyn Animal>();
/// let entry = registry.find_short(base, Some(module_path!()), "Cat").unwrap();
/// assert_eq!(entry.info().type_name(), "Cat");
/// ```
pub struct TypeRegistry {
    subtypes: TypeIdMap<Vec<SubtypeEntry>>,
    auto_registered: bool,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates a registry without any subtype.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            subtypes: TypeIdMap::new(),
            auto_registered: false,
        }
    }

    /// Creates a registry holding every subtype declared with
    /// `#[classify(subtype_of = ...)]`.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.auto_register();
        registry
    }

    /// Registers `T` as a subtype of the base `B`.
    ///
    /// `new` builds the default value already boxed as the base. Registering
    /// the same subtype twice keeps the first constructor.
    pub fn register_subtype<B: ?Sized + PolyBase, T: Typed>(&mut self, new: fn() -> Box<B>) {
        let entries = self.subtypes.get_or_insert(TypeId::of::<B>(), Vec::new);
        if entries.iter().any(|entry| entry.info.type_id() == TypeId::of::<T>()) {
            return;
        }

        entries.push(SubtypeEntry {
            info: T::type_info(),
            construct: Box::new(move || Box::new(new()) as Box<dyn Classify>),
        });
    }

    /// Collects the registrations submitted by the derive macro.
    ///
    /// Returns `true` if automatic registration is available. Repeated calls
    /// do nothing. Without the `auto_register` feature this always returns
    /// `false`.
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            if !self.auto_registered {
                crate::__macro_exports::auto_register::__register_types(self);
                self.auto_registered = true;
            }
        }
        cfg!(feature = "auto_register")
    }

    /// Returns `true` if `ty` is registered under `base`.
    pub fn contains_subtype(&self, base: TypeId, ty: TypeId) -> bool {
        self.subtypes(base).any(|entry| entry.info.type_id() == ty)
    }

    /// All subtypes registered under `base`, in registration order.
    pub fn subtypes(&self, base: TypeId) -> impl Iterator<Item = &SubtypeEntry> {
        self.subtypes.get(&base).into_iter().flatten()
    }

    /// Resolves a short `type` discriminator.
    ///
    /// The name must match exactly one subtype of `base` declared in
    /// `module`.
    pub fn find_short(
        &self,
        base: TypeId,
        module: Option<&str>,
        name: &str,
    ) -> Option<&SubtypeEntry> {
        Self::unique(self.subtypes(base).filter(|entry| {
            entry.info.type_name() == name && entry.info.module_path() == module
        }))
    }

    /// Resolves a `fulltype` discriminator.
    pub fn find_full(&self, base: TypeId, path: &str) -> Option<&SubtypeEntry> {
        Self::unique(self.subtypes(base).filter(|entry| entry.info.type_path() == path))
    }

    fn unique<'a>(
        mut candidates: impl Iterator<Item = &'a SubtypeEntry>,
    ) -> Option<&'a SubtypeEntry> {
        let first = candidates.next()?;
        match candidates.next() {
            Some(_) => None,
            None => Some(first),
        }
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("bases", &self.subtypes.len())
            .field("auto_registered", &self.auto_registered)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::TypeRegistry;
    use crate::{Classify, impl_polymorphic};
    use alloc::boxed::Box;
    use core::any::TypeId;

    pub trait Token: Classify {}

    impl_polymorphic!(dyn Token);

    impl Token for u8 {}
    impl Token for i64 {}

    #[test]
    fn lookup_by_short_and_full_name() {
        let mut registry = TypeRegistry::empty();
        registry.register_subtype::<dyn Token, u8>(|| Box::new(0_u8));
        registry.register_subtype::<dyn Token, i64>(|| Box::new(0_i64));
        registry.register_subtype::<dyn Token, u8>(|| Box::new(1_u8));

        let base = TypeId::of::<dyn Token>();
        assert_eq!(registry.subtypes(base).count(), 2);
        assert!(registry.contains_subtype(base, TypeId::of::<i64>()));

        let entry = registry.find_full(base, "i64").unwrap();
        assert!(entry.construct().is::<Box<dyn Token>>());

        // Primitives have no module, so the short lookup uses `None`.
        assert!(registry.find_short(base, None, "u8").is_some());
        assert!(registry.find_short(base, Some("other"), "u8").is_none());
        assert!(registry.find_full(TypeId::of::<u8>(), "u8").is_none());
    }

    #[test]
    fn first_constructor_wins() {
        let mut registry = TypeRegistry::empty();
        registry.register_subtype::<dyn Token, u8>(|| Box::new(3_u8));
        registry.register_subtype::<dyn Token, u8>(|| Box::new(4_u8));

        let base = TypeId::of::<dyn Token>();
        let value = registry.find_full(base, "u8").unwrap().construct();
        let value = value.take::<Box<dyn Token>>().ok().unwrap();
        assert_eq!((*value).as_classify().downcast_ref::<u8>(), Some(&3));
    }
}
