use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

// -----------------------------------------------------------------------------
// Node

/// A named tree node with optional text, attributes and ordered children.
///
/// A node usually takes one of three shapes:
///
/// - leaf: text and no children,
/// - composite: children only,
/// - null marker: the [`NULL_ATTRIBUTE`](Node::NULL_ATTRIBUTE) and nothing else.
///
/// Attributes are kept sorted by key, so two nodes built from the same data
/// always compare and serialize identically.
///
/// # Examples
///
/// ```
/// use classify_tree::Node;
///
/// let node = Node::new("point")
///     .with_child(Node::leaf("x", "1"))
///     .with_child(Node::leaf("y", "2"));
///
/// assert_eq!(node.child("y").and_then(Node::text), Some("2"));
/// assert!(Node::null("missing").is_null());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Node {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Node>,
}

impl Node {
    /// Attribute carried by a null marker.
    pub const NULL_ATTRIBUTE: &'static str = "null";

    /// Creates an empty node.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: None,
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Creates a node holding only `text`.
    pub fn leaf(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name).with_text(text)
    }

    /// Creates a null marker.
    pub fn null(name: impl Into<String>) -> Self {
        Self::new(name).with_attribute(Self::NULL_ATTRIBUTE, "true")
    }

    #[inline]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[inline]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    #[inline]
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[inline]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[inline]
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// Returns the attribute value for `key`.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    #[inline]
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Sets an attribute, replacing a previous value with the same key.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn remove_attribute(&mut self, key: &str) -> Option<String> {
        self.attributes.remove(key)
    }

    /// Iterates attributes in key order.
    pub fn attributes(&self) -> impl ExactSizeIterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    #[inline]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    #[inline]
    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    #[inline]
    pub fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Returns the first child named `name`.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Iterates all children named `name`, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Returns `true` if the node is a null marker.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.attributes.contains_key(Self::NULL_ATTRIBUTE)
    }

    /// Returns `true` if the node carries text and no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.text.is_some() && self.children.is_empty()
    }

    /// Returns `true` if the node has neither children nor attributes.
    ///
    /// Text is not considered.
    #[inline]
    pub fn is_bare(&self) -> bool {
        self.children.is_empty() && self.attributes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Node;
    use alloc::vec::Vec;

    #[test]
    fn null_marker_shape() {
        let node = Node::null("value");
        assert!(node.is_null());
        assert!(!node.is_leaf());
        assert_eq!(node.text(), None);
        assert_eq!(node.attributes().len(), 1);
    }

    #[test]
    fn children_named_keeps_order() {
        let node = Node::new("list")
            .with_child(Node::leaf("item", "a"))
            .with_child(Node::leaf("other", "x"))
            .with_child(Node::leaf("item", "b"));

        let texts: Vec<_> = node.children_named("item").filter_map(Node::text).collect();
        assert_eq!(texts, ["a", "b"]);
        assert_eq!(node.child("other").and_then(Node::text), Some("x"));
        assert!(node.child("missing").is_none());
    }

    #[test]
    fn attribute_order_does_not_matter() {
        let a = Node::new("n").with_attribute("b", "2").with_attribute("a", "1");
        let b = Node::new("n").with_attribute("a", "1").with_attribute("b", "2");
        assert_eq!(a, b);

        let keys: Vec<_> = a.attributes().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn bare_ignores_text() {
        assert!(Node::leaf("x", "1").is_bare());
        assert!(!Node::null("x").is_bare());
        assert!(!Node::new("x").with_child(Node::new("y")).is_bare());
    }

    #[test]
    fn ron_round_trip() {
        let node = Node::new("root")
            .with_attribute("type", "Circle")
            .with_child(Node::leaf("radius", "2.5"))
            .with_child(Node::null("label"));

        let text = ron::to_string(&node).unwrap();
        let back: Node = ron::from_str(&text).unwrap();
        assert_eq!(back, node);
    }
}
