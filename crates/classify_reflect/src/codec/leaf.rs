//! Leaf rules.
//!
//! Most leaves are written as their `Display` text. Two cases need an
//! `encoding` attribute:
//!
//! - a string holding a character below U+0020 is written as URL safe
//!   base64 of its UTF-8 bytes, without padding,
//! - a character at or below U+0020 is written as its decimal code point.

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::{String, ToString};

use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, NO_PAD};
use base64::engine::DecodePaddingMode;
use classify_tree::Node;

use super::decode::Decoder;
use super::names::{BASE64, CODEPOINT, ENCODING};
use crate::Classify;
use crate::error::{ClassifyError, FormatErrorKind};
use crate::info::{LeafKind, TypeInfo};
use crate::ops::{ClassifyMut, ClassifyRef, EnumLeaf, Leaf};

/// Writes without padding, reads with or without.
const BASE64_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    NO_PAD.with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub(super) fn encode_leaf(name: &str, leaf: &dyn Leaf) -> Node {
    let text = leaf.leaf_text();
    match leaf.leaf_kind() {
        LeafKind::Str if text.chars().any(|ch| ch < ' ') => {
            Node::leaf(name, BASE64_ENGINE.encode(text.as_bytes())).with_attribute(ENCODING, BASE64)
        }
        LeafKind::Char => match text.chars().next() {
            Some(ch) if ch <= ' ' => {
                Node::leaf(name, u32::from(ch).to_string()).with_attribute(ENCODING, CODEPOINT)
            }
            _ => Node::leaf(name, text),
        },
        _ => Node::leaf(name, text),
    }
}

/// Text of a leaf node after undoing its `encoding`.
fn leaf_text(node: &Node) -> Result<Cow<'_, str>, FormatErrorKind> {
    let raw = node.text().unwrap_or_default();
    match node.attribute(ENCODING) {
        None => Ok(Cow::Borrowed(raw)),
        Some(BASE64) => {
            let bytes = BASE64_ENGINE
                .decode(raw)
                .map_err(|_| FormatErrorKind::InvalidBase64)?;
            String::from_utf8(bytes)
                .map(Cow::Owned)
                .map_err(|_| FormatErrorKind::InvalidUtf8)
        }
        Some(CODEPOINT) => raw
            .trim()
            .parse::<u32>()
            .ok()
            .and_then(char::from_u32)
            .map(|ch| Cow::Owned(ch.to_string()))
            .ok_or_else(|| FormatErrorKind::InvalidCodePoint(raw.into())),
        Some(other) => Err(FormatErrorKind::UnknownEncoding(other.into())),
    }
}

/// Text form of a map key, `None` for unsupported key kinds.
pub(super) fn key_text(key: &dyn Classify) -> Option<String> {
    match key.classify_ref() {
        ClassifyRef::Leaf(leaf) => Some(leaf.leaf_text()),
        ClassifyRef::Enum(variant) => Some(variant.variant_name().into()),
        _ => None,
    }
}

/// Parses a map key of type `info`, `None` if `text` does not fit.
pub(super) fn parse_key(info: &'static TypeInfo, text: &str) -> Option<Box<dyn Classify>> {
    let mut key = info.instantiate()?;
    let parsed = match key.classify_mut() {
        ClassifyMut::Leaf(leaf) => leaf.set_leaf_text(text).is_ok(),
        ClassifyMut::Enum(variant) => variant.set_variant_name(text),
        _ => false,
    };
    parsed.then_some(key)
}

impl Decoder<'_> {
    pub(super) fn decode_leaf(&mut self, leaf: &mut dyn Leaf, node: &Node) -> Result<(), ClassifyError> {
        let text = leaf_text(node).map_err(|kind| self.format_error(kind))?;
        leaf.set_leaf_text(&text)
            .map_err(|error| self.format_error(error))
    }

    pub(super) fn decode_enum(
        &mut self,
        variant: &mut dyn EnumLeaf,
        node: &Node,
    ) -> Result<(), ClassifyError> {
        let name = node.text().unwrap_or_default();
        if variant.set_variant_name(name) {
            return Ok(());
        }
        Err(self.format_error(FormatErrorKind::UnknownEnumValue {
            type_path: variant.classify_type_info().type_path(),
            name: name.into(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::{encode_leaf, leaf_text};
    use crate::error::FormatErrorKind;
    use alloc::string::String;
    use classify_tree::Node;

    fn round_trip(value: &str) {
        let node = encode_leaf("s", &String::from(value));
        assert_eq!(leaf_text(&node).unwrap(), value, "node: {node:?}");
    }

    #[test]
    fn control_characters_use_base64() {
        let node = encode_leaf("s", &String::from("a\tb"));
        assert_eq!(node.attribute("encoding"), Some("base64"));
        assert_eq!(node.text(), Some("YQli"));

        for code in 0_u8..0x20 {
            round_trip(&String::from(char::from(code)));
        }
        round_trip("\0");
        round_trip("line\r\nbreak");
    }

    #[test]
    fn plain_strings_stay_literal() {
        for value in ["", "\"", "a b", "ünïcödé"] {
            let node = encode_leaf("s", &String::from(value));
            assert!(node.attribute("encoding").is_none());
            round_trip(value);
        }
    }

    #[test]
    fn padded_base64_is_accepted() {
        let node = Node::leaf("s", "YQli").with_attribute("encoding", "base64");
        assert_eq!(leaf_text(&node).unwrap(), "a\tb");
        let node = Node::leaf("s", "AA==").with_attribute("encoding", "base64");
        assert_eq!(leaf_text(&node).unwrap(), "\0");
    }

    #[test]
    fn low_characters_use_code_points() {
        let node = encode_leaf("c", &' ');
        assert_eq!(node.attribute("encoding"), Some("codepoint"));
        assert_eq!(node.text(), Some("32"));
        assert_eq!(leaf_text(&node).unwrap(), " ");

        let node = encode_leaf("c", &'!');
        assert!(node.attribute("encoding").is_none());
        assert_eq!(node.text(), Some("!"));
    }

    #[test]
    fn bad_encodings() {
        let node = Node::leaf("s", "@@@").with_attribute("encoding", "base64");
        assert_eq!(leaf_text(&node), Err(FormatErrorKind::InvalidBase64));

        let node = Node::leaf("s", "_w").with_attribute("encoding", "base64");
        assert_eq!(leaf_text(&node), Err(FormatErrorKind::InvalidUtf8));

        let node = Node::leaf("c", "55296").with_attribute("encoding", "codepoint");
        assert_eq!(
            leaf_text(&node),
            Err(FormatErrorKind::InvalidCodePoint("55296".into()))
        );

        let node = Node::leaf("s", "x").with_attribute("encoding", "rot13");
        assert_eq!(
            leaf_text(&node),
            Err(FormatErrorKind::UnknownEncoding("rot13".into()))
        );
    }
}
