//! Items used by the code that `#[derive(Classify)]` and
//! [`impl_polymorphic!`](crate::impl_polymorphic) generate. Not public API.

pub use alloc::boxed::Box;
pub use alloc::vec::Vec;

#[cfg(feature = "auto_register")]
pub mod auto_register {
    use crate::registry::TypeRegistry;

    pub use inventory;

    /// One `subtype_of` registration submitted by the derive macro.
    pub struct __AutoRegisterFunc(pub fn(&mut TypeRegistry));

    inventory::collect!(__AutoRegisterFunc);

    pub(crate) fn __register_types(registry: &mut TypeRegistry) {
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
        }
    }
}
