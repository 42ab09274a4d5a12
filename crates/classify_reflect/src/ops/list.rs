use alloc::boxed::Box;

use crate::Classify;
use crate::info::TypeInfo;

/// Growable sequences and sets.
pub trait List: Classify {
    /// Declared type of the items.
    fn item_info(&self) -> &'static TypeInfo;

    /// Returns `true` if iteration order carries no meaning (hash sets).
    fn is_unordered(&self) -> bool {
        false
    }

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Classify> + '_>;

    fn clear(&mut self);

    /// Appends an item, giving it back if its type does not match.
    fn push(&mut self, value: Box<dyn Classify>) -> Result<(), Box<dyn Classify>>;
}
