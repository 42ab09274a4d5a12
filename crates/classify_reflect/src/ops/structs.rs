use crate::Classify;
use crate::info::StructInfo;

/// Values with a member table.
///
/// Indices follow [`StructInfo::members`].
pub trait Struct: Classify {
    fn struct_info(&self) -> &'static StructInfo;

    fn field_at(&self, index: usize) -> Option<&dyn Classify>;

    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Classify>;

    fn field_len(&self) -> usize {
        self.struct_info().len()
    }

    fn field(&self, name: &str) -> Option<&dyn Classify> {
        let index = self.struct_info().index_of(name)?;
        self.field_at(index)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Classify> {
        let index = self.struct_info().index_of(name)?;
        self.field_at_mut(index)
    }
}
