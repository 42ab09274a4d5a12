use alloc::string::String;

use crate::Classify;
use crate::error::LeafParseError;
use crate::info::LeafKind;

/// A value written as a single text.
///
/// The text form is the canonical round-trip representation of the type,
/// `Display` for the standard implementations and `FromStr` to read it back.
/// Escaping of control characters is done by the codec, not here.
pub trait Leaf: Classify {
    fn leaf_kind(&self) -> LeafKind;

    fn leaf_text(&self) -> String;

    fn set_leaf_text(&mut self, text: &str) -> Result<(), LeafParseError>;
}

/// A fieldless enum written as its variant name.
pub trait EnumLeaf: Classify {
    fn variant_name(&self) -> &'static str;

    /// Switches to the variant written as `name`.
    ///
    /// Returns `false` and leaves the value unchanged if no variant matches.
    fn set_variant_name(&mut self, name: &str) -> bool;
}
