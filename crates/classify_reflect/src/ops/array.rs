use alloc::boxed::Box;

use crate::Classify;
use crate::info::TypeInfo;

/// Fixed size arrays.
pub trait Array: Classify {
    /// Declared type of the items.
    fn item_info(&self) -> &'static TypeInfo;

    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Option<&dyn Classify>;

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Classify>;

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Classify> + '_> {
        Box::new((0..self.len()).filter_map(|index| self.get(index)))
    }
}
