use alloc::vec::Vec;

use classify_tree::Node;

use super::Classifier;
use crate::Classify;
use crate::error::{ClassifyError, ConfigurationError};
use crate::ops::ClassifyRef;

/// Walks a value depth first and builds its node tree.
pub(super) struct Encoder<'a> {
    pub(super) classifier: &'a Classifier,
}

impl<'a> Encoder<'a> {
    #[inline]
    pub fn new(classifier: &'a Classifier) -> Self {
        Self { classifier }
    }

    /// Encodes `value` into a node named `name`, dispatching on its kind.
    pub fn encode(&mut self, name: &str, value: &dyn Classify) -> Result<Node, ClassifyError> {
        match value.classify_ref() {
            ClassifyRef::Leaf(leaf) => Ok(super::leaf::encode_leaf(name, leaf)),
            ClassifyRef::Enum(variant) => Ok(Node::leaf(name, variant.variant_name())),
            ClassifyRef::Nullable(nullable) => match nullable.value() {
                Some(inner) => self.encode(name, inner),
                None => Ok(Node::null(name)),
            },
            ClassifyRef::List(list) => self.encode_items(name, list.iter(), list.is_unordered()),
            ClassifyRef::Array(array) => self.encode_items(name, array.iter(), false),
            ClassifyRef::Map(map) => self.encode_map(name, map),
            ClassifyRef::Struct(object) => self.encode_object(name, object),
            ClassifyRef::Deferred(slot) => self.encode_inline_deferred(name, slot),
            ClassifyRef::Polymorphic(slot) => self.encode_polymorphic(name, slot),
            ClassifyRef::Shared(slot) => self.encode(name, slot.inner()),
            ClassifyRef::Parent(_) => Err(ConfigurationError::DetachedParent(
                value.classify_type_info().type_path(),
            )
            .into()),
        }
    }

    /// Sorts item nodes of unordered containers so output is stable.
    pub(super) fn finish_items(name: &str, mut items: Vec<Node>, unordered: bool) -> Node {
        if unordered {
            items.sort();
        }
        let mut node = Node::new(name);
        *node.children_mut() = items;
        node
    }
}
