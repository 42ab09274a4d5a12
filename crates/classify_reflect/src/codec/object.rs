//! The object walker: structs member by member, and deferred references.

use alloc::boxed::Box;
use alloc::string::String;

use classify_tree::Node;
use log::debug;

use super::Classifier;
use super::decode::{Decoder, Scope};
use super::encode::Encoder;
use super::names::ID;
use crate::Classify;
use crate::error::{ClassifyError, ConfigurationError, FormatErrorKind};
use crate::info::{LeafKind, MemberInfo, PolicyFlags, StructInfo, TypeInfo};
use crate::ops::{ClassifyMut, ClassifyRef, DeferredSlot, Struct};

// -----------------------------------------------------------------------------
// Validation

fn is_string(info: &TypeInfo) -> bool {
    let info = info.nullable_inner().unwrap_or(info);
    info.as_leaf().is_some_and(|leaf| leaf.kind() == LeafKind::Str)
}

/// Checks the member kinds required by the member policies.
fn validate_members(info: &StructInfo, has_store: bool) -> Result<(), ConfigurationError> {
    let owner = info.ty().path();
    for member in info.members() {
        let found = member.type_info();
        let name = member.field_name();

        if member.has(PolicyFlags::FOLLOW_ID) {
            if !matches!(found, TypeInfo::Deferred(_)) {
                return Err(ConfigurationError::FollowIdNotDeferred {
                    owner,
                    member: name,
                    found: found.type_path(),
                });
            }
            if !has_store {
                return Err(ConfigurationError::MissingStore {
                    owner,
                    member: name,
                });
            }
        }

        let is_parent = matches!(found, TypeInfo::Parent(_));
        if member.has(PolicyFlags::PARENT) && !is_parent {
            return Err(ConfigurationError::ParentNotParentSlot {
                owner,
                member: name,
                found: found.type_path(),
            });
        }
        if is_parent && !member.has(PolicyFlags::PARENT) && !member.has(PolicyFlags::IGNORE) {
            return Err(ConfigurationError::DetachedParent(found.type_path()));
        }

        if member.has(PolicyFlags::ID) && !is_string(found) {
            return Err(ConfigurationError::IdNotString {
                owner,
                member: name,
                found: found.type_path(),
            });
        }
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// Encode

impl Encoder<'_> {
    pub(super) fn encode_object(
        &mut self,
        name: &str,
        object: &dyn Struct,
    ) -> Result<Node, ClassifyError> {
        let info = object.struct_info();
        validate_members(info, self.classifier.store.is_some())?;

        let class = info.class_policy();
        let mut node = Node::new(name);

        for (index, member) in info.members().iter().enumerate() {
            if member.has(PolicyFlags::IGNORE) || member.has(PolicyFlags::PARENT) {
                continue;
            }
            let Some(value) = object.field_at(index) else {
                continue;
            };

            let policy = member.policy();
            if policy.skips_default(class) && value.is_zero() {
                continue;
            }
            if policy.matches_ignored_value(value) {
                continue;
            }

            if member.has(PolicyFlags::FOLLOW_ID) {
                node.push_child(self.encode_followed(member, value)?);
                continue;
            }

            let child = self.encode(member.storage_name(), value)?;
            if policy.skips_empty(class) && holds_collection(member.type_info()) && child.is_bare() {
                continue;
            }
            node.push_child(child);
        }

        Ok(node)
    }

    /// Writes the id of a `follow_id` member and saves its resolved value.
    fn encode_followed(
        &mut self,
        member: &MemberInfo,
        value: &dyn Classify,
    ) -> Result<Node, ClassifyError> {
        let ClassifyRef::Deferred(slot) = value.classify_ref() else {
            unreachable!("checked by `validate_members`");
        };
        let node = Node::new(member.storage_name()).with_attribute(ID, slot.id());

        if let Some(resolved) = slot.resolved() {
            let classifier = self.classifier;
            let Some(store) = classifier.store() else {
                unreachable!("checked by `validate_members`");
            };
            let type_name = slot.inner_info().type_name();
            let saved = self.encode(&classifier.options.root_name, resolved)?;
            debug!("saving `{type_name}` `{}` for member `{}`", slot.id(), member.field_name());
            store.save(type_name, slot.id(), &saved)?;
        }

        Ok(node)
    }

    /// A deferred reference outside `follow_id` is written in place, with its
    /// id as an attribute.
    pub(super) fn encode_inline_deferred(
        &mut self,
        name: &str,
        slot: &dyn DeferredSlot,
    ) -> Result<Node, ClassifyError> {
        let mut node = self.encode(name, slot.evaluate()?)?;
        node.set_attribute(ID, slot.id());
        Ok(node)
    }
}

/// Collections and optional collections, the kinds `ignore_if_empty` acts on.
fn holds_collection(info: &TypeInfo) -> bool {
    info.nullable_inner().unwrap_or(info).is_collection()
}

// -----------------------------------------------------------------------------
// Decode

impl Decoder<'_> {
    pub(super) fn decode_object(
        &mut self,
        object: &mut dyn Struct,
        node: &Node,
        scope: &Scope,
    ) -> Result<(), ClassifyError> {
        let info = object.struct_info();
        validate_members(info, self.classifier.store.is_some())?;

        let members = scope.members();
        for (index, member) in info.members().iter().enumerate() {
            if member.has(PolicyFlags::IGNORE) {
                continue;
            }
            let Some(field) = object.field_at_mut(index) else {
                continue;
            };

            if member.has(PolicyFlags::PARENT) {
                if let ClassifyMut::Parent(slot) = field.classify_mut() {
                    slot.assign(scope.parent.as_ref());
                }
                continue;
            }

            let Some(child) = node.child(member.storage_name()) else {
                continue;
            };

            self.path.push(member.storage_name());
            if member.has(PolicyFlags::FOLLOW_ID) && !child.is_null() {
                self.defer_member(info, member, field, child, &members)?;
            } else {
                self.decode_into(field, child, &members)?;
            }
            self.path.pop();
        }
        Ok(())
    }

    /// Installs an unresolved reference that loads the member from the store
    /// on first read.
    fn defer_member(
        &mut self,
        owner: &'static StructInfo,
        member: &MemberInfo,
        field: &mut dyn Classify,
        child: &Node,
        scope: &Scope,
    ) -> Result<(), ClassifyError> {
        let ClassifyMut::Deferred(slot) = field.classify_mut() else {
            unreachable!("checked by `validate_members`");
        };
        let Some(id) = child.attribute(ID) else {
            return Err(self.format_error(FormatErrorKind::MissingId));
        };

        let classifier = self.classifier.clone();
        let inner = slot.inner_info();
        let parent = scope.parent.clone();
        let owner = owner.ty().path();
        let member = member.field_name();

        slot.defer(
            String::from(id),
            Box::new(move |id: &str| -> Result<Box<dyn Classify>, ClassifyError> {
                let Some(store) = classifier.store() else {
                    return Err(ConfigurationError::MissingStore { owner, member }.into());
                };
                debug!("loading `{}` `{id}` for member `{owner}.{member}`", inner.type_name());
                let node = store.load(inner.type_name(), id)?;
                classifier.deserialize_as(inner, &node, parent.as_ref())
            }),
        );
        Ok(())
    }

    pub(super) fn decode_inline_deferred(
        &mut self,
        slot: &mut dyn DeferredSlot,
        node: &Node,
        scope: &Scope,
    ) -> Result<(), ClassifyError> {
        let inner = slot.inner_info();
        let id = String::from(node.attribute(ID).unwrap_or_default());
        let value = self.decode_new(inner, node, scope)?;
        slot.set_resolved(id, value)
            .map_err(|found| super::mismatch(inner, &*found))
    }
}

impl Classifier {
    /// Checks the member table of `info` against this classifier.
    ///
    /// The codec runs the same check before touching any member of an
    /// object of that type.
    pub fn validate(&self, info: &StructInfo) -> Result<(), ConfigurationError> {
        validate_members(info, self.store.is_some())
    }
}
