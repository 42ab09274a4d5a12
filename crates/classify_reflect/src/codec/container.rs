use alloc::vec::Vec;

use classify_tree::Node;
use log::warn;

use super::decode::{Decoder, Scope};
use super::encode::Encoder;
use super::leaf::{key_text, parse_key};
use super::names::{ITEM, KEY};
use crate::Classify;
use crate::error::{ClassifyError, ConfigurationError};
use crate::info::TypeInfo;
use crate::ops::{Array, List, Map};

/// Fails unless the keys of `map` can be written as text.
fn check_key(map: &dyn Map) -> Result<(), ConfigurationError> {
    let info = map.classify_type_info();
    match info {
        TypeInfo::Map(map_info) if map_info.has_supported_key() => Ok(()),
        _ => Err(ConfigurationError::UnsupportedKey {
            map: info.type_path(),
            key: map.key_info().type_path(),
        }),
    }
}

impl Encoder<'_> {
    pub(super) fn encode_items<'v>(
        &mut self,
        name: &str,
        items: impl Iterator<Item = &'v dyn Classify>,
        unordered: bool,
    ) -> Result<Node, ClassifyError> {
        let items = items
            .map(|item| self.encode(ITEM, item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::finish_items(name, items, unordered))
    }

    pub(super) fn encode_map(&mut self, name: &str, map: &dyn Map) -> Result<Node, ClassifyError> {
        check_key(map)?;

        let mut items = Vec::with_capacity(map.len());
        for (key, value) in map.iter() {
            let Some(key) = key_text(key) else {
                return Err(ConfigurationError::UnsupportedKey {
                    map: map.classify_type_info().type_path(),
                    key: key.classify_type_info().type_path(),
                }
                .into());
            };
            items.push(self.encode(ITEM, value)?.with_attribute(KEY, key));
        }
        Ok(Self::finish_items(name, items, map.is_unordered()))
    }
}

impl Decoder<'_> {
    pub(super) fn decode_list(
        &mut self,
        list: &mut dyn List,
        node: &Node,
        scope: &Scope,
    ) -> Result<(), ClassifyError> {
        let item_info = list.item_info();
        list.clear();

        for (index, item) in node.children_named(ITEM).enumerate() {
            self.path.push_item(index);
            let value = self.decode_new(item_info, item, scope)?;
            list.push(value)
                .map_err(|found| super::mismatch(item_info, &*found))?;
            self.path.pop();
        }
        Ok(())
    }

    /// Fills the first `min(n, N)` slots, resets the others and skips
    /// surplus items.
    pub(super) fn decode_array(
        &mut self,
        array: &mut dyn Array,
        node: &Node,
        scope: &Scope,
    ) -> Result<(), ClassifyError> {
        let items: Vec<&Node> = node.children_named(ITEM).collect();
        if items.len() > array.len() {
            warn!(
                "`{}` holds {} items, only the first {} fit",
                self.path,
                items.len(),
                array.len()
            );
        }

        for index in 0..array.len() {
            let Some(slot) = array.get_mut(index) else {
                break;
            };
            slot.reset();
            if let Some(item) = items.get(index) {
                self.path.push_item(index);
                self.decode_into(slot, item, scope)?;
                self.path.pop();
            }
        }
        Ok(())
    }

    /// Entries without a usable key are skipped with a warning.
    pub(super) fn decode_map(
        &mut self,
        map: &mut dyn Map,
        node: &Node,
        scope: &Scope,
    ) -> Result<(), ClassifyError> {
        check_key(map)?;

        let key_info = map.key_info();
        let value_info = map.value_info();
        map.clear();

        for (index, item) in node.children_named(ITEM).enumerate() {
            let Some(text) = item.attribute(KEY) else {
                warn!("`{}/{ITEM}[{index}]` has no key, skipped", self.path);
                continue;
            };
            let Some(key) = parse_key(key_info, text) else {
                warn!(
                    "`{}/{ITEM}[{index}]` key `{text}` is not a valid `{}`, skipped",
                    self.path,
                    key_info.type_path()
                );
                continue;
            };

            self.path.push_item(index);
            let value = self.decode_new(value_info, item, scope)?;
            self.path.pop();

            map.insert(key, value)
                .map_err(|found| super::mismatch(value_info, &*found))?;
        }
        Ok(())
    }
}
