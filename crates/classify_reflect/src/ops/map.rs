use alloc::boxed::Box;

use crate::Classify;
use crate::info::TypeInfo;

/// Key-value maps.
pub trait Map: Classify {
    fn key_info(&self) -> &'static TypeInfo;

    fn value_info(&self) -> &'static TypeInfo;

    /// Returns `true` if iteration order carries no meaning (hash maps).
    fn is_unordered(&self) -> bool {
        false
    }

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Classify, &dyn Classify)> + '_>;

    fn clear(&mut self);

    /// Inserts an entry, replacing any previous value of the key.
    ///
    /// On a type mismatch the offending box is given back.
    fn insert(
        &mut self,
        key: Box<dyn Classify>,
        value: Box<dyn Classify>,
    ) -> Result<(), Box<dyn Classify>>;
}
