use alloc::boxed::Box;

use crate::Classify;
use crate::info::TypeInfo;

/// `Option<T>`-like values.
pub trait Nullable: Classify {
    /// Declared type of the wrapped value.
    fn inner_info(&self) -> &'static TypeInfo;

    fn value(&self) -> Option<&dyn Classify>;

    fn value_mut(&mut self) -> Option<&mut dyn Classify>;

    fn set_none(&mut self);

    /// Stores `value`, giving it back if its type does not match.
    fn set_some(&mut self, value: Box<dyn Classify>) -> Result<(), Box<dyn Classify>>;
}
