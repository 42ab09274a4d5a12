use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use super::names::ITEM;

/// Position of the node being decoded, e.g. `item/points/item[2]`.
#[derive(Debug, Clone, Default)]
pub(super) struct NodePath(Vec<String>);

impl NodePath {
    pub fn new(root: &str) -> Self {
        Self(Vec::from([String::from(root)]))
    }

    #[inline]
    pub fn push(&mut self, name: &str) {
        self.0.push(String::from(name));
    }

    /// Enters the `index`-th `item` child.
    #[inline]
    pub fn push_item(&mut self, index: usize) {
        self.0.push(format!("{ITEM}[{index}]"));
    }

    #[inline]
    pub fn pop(&mut self) {
        self.0.pop();
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::NodePath;
    use alloc::string::ToString;

    #[test]
    fn segments_join() {
        let mut path = NodePath::new("item");
        path.push("points");
        path.push_item(2);
        assert_eq!(path.to_string(), "item/points/item[2]");
        path.pop();
        path.pop();
        assert_eq!(path.to_string(), "item");
    }
}
