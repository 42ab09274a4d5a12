//! Parsing of the derive input and of `#[classify(...)]` attributes.

// -----------------------------------------------------------------------------
// Modules

mod classify_derive;
mod classify_meta;
mod field_attributes;
mod type_attributes;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use classify_derive::{ClassifyDerive, ClassifyEnum, ClassifyField, ClassifyStruct};
pub(crate) use classify_meta::ClassifyMeta;
pub(crate) use field_attributes::{FieldAttributes, VariantAttributes};
pub(crate) use type_attributes::TypeAttributes;
