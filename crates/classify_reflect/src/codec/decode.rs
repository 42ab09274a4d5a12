use alloc::boxed::Box;
use alloc::string::ToString;

use classify_tree::Node;

use super::Classifier;
use super::node_path::NodePath;
use crate::error::{ClassifyError, ConfigurationError, ConstructionCause};
use crate::error::{FormatError, FormatErrorKind};
use crate::info::TypeInfo;
use crate::ops::{ClassifyMut, Nullable, SharedSlot};
use crate::{Classify, ParentHandle};

// -----------------------------------------------------------------------------
// Scope

/// Parent handles visible while decoding one value.
///
/// `parent` is handed to members marked `parent`. `this` is the handle of
/// the value itself, set when it is being built inside an `Arc`, and becomes
/// the `parent` of its members.
#[derive(Debug, Clone, Default)]
pub(super) struct Scope {
    pub parent: Option<ParentHandle>,
    pub this: Option<ParentHandle>,
}

impl Scope {
    #[inline]
    pub fn with_parent(parent: Option<ParentHandle>) -> Self {
        Self { parent, this: None }
    }

    /// Scope of the members of the current object.
    #[inline]
    pub fn members(&self) -> Self {
        Self::with_parent(self.this.clone())
    }
}

// -----------------------------------------------------------------------------
// Decoder

/// Rebuilds values from a node tree, tracking the current node path.
pub(super) struct Decoder<'a> {
    pub(super) classifier: &'a Classifier,
    pub(super) path: NodePath,
}

impl<'a> Decoder<'a> {
    pub fn new(classifier: &'a Classifier, root: &str) -> Self {
        Self {
            classifier,
            path: NodePath::new(root),
        }
    }

    /// Builds a fresh value of type `info` and decodes `node` into it.
    pub fn decode_new(
        &mut self,
        info: &'static TypeInfo,
        node: &Node,
        scope: &Scope,
    ) -> Result<Box<dyn Classify>, ClassifyError> {
        let mut value = self.construct(info, node)?;
        self.decode_into(value.as_mut(), node, scope)?;
        Ok(value)
    }

    /// Decodes `node` over `value`, dispatching on its kind.
    pub fn decode_into(
        &mut self,
        value: &mut dyn Classify,
        node: &Node,
        scope: &Scope,
    ) -> Result<(), ClassifyError> {
        if node.is_null() {
            if let ClassifyMut::Nullable(nullable) = value.classify_mut() {
                nullable.set_none();
                return Ok(());
            }
            value.reset();
            return Ok(());
        }

        match value.classify_mut() {
            ClassifyMut::Leaf(leaf) => self.decode_leaf(leaf, node),
            ClassifyMut::Enum(variant) => self.decode_enum(variant, node),
            ClassifyMut::Nullable(nullable) => self.decode_nullable(nullable, node, scope),
            ClassifyMut::List(list) => self.decode_list(list, node, scope),
            ClassifyMut::Array(array) => self.decode_array(array, node, scope),
            ClassifyMut::Map(map) => self.decode_map(map, node, scope),
            ClassifyMut::Struct(object) => self.decode_object(object, node, scope),
            ClassifyMut::Deferred(slot) => self.decode_inline_deferred(slot, node, scope),
            ClassifyMut::Polymorphic(slot) => self.decode_polymorphic(slot, node, scope),
            ClassifyMut::Shared(slot) => self.decode_shared(slot, node, scope),
            ClassifyMut::Parent(slot) => Err(ConfigurationError::DetachedParent(
                slot.classify_type_info().type_path(),
            )
            .into()),
        }
    }

    /// A default value of `info`, or of the subtype named by the
    /// discriminator of `node` for polymorphic slots.
    pub(super) fn construct(
        &self,
        info: &'static TypeInfo,
        node: &Node,
    ) -> Result<Box<dyn Classify>, ClassifyError> {
        if let TypeInfo::Polymorphic(poly) = info
            && let Some(entry) = self.resolve_subtype(poly, node)
        {
            return Ok(entry.construct());
        }

        info.instantiate().ok_or_else(|| {
            ClassifyError::construction(info.type_path(), ConstructionCause::NoDefault)
        })
    }

    pub(super) fn format_error(&self, kind: impl Into<FormatErrorKind>) -> ClassifyError {
        FormatError {
            path: self.path.to_string(),
            kind: kind.into(),
        }
        .into()
    }

    fn decode_nullable(
        &mut self,
        nullable: &mut dyn Nullable,
        node: &Node,
        scope: &Scope,
    ) -> Result<(), ClassifyError> {
        let inner = nullable.inner_info();
        let value = self.decode_new(inner, node, scope)?;
        nullable
            .set_some(value)
            .map_err(|found| super::mismatch(inner, &*found))
    }

    fn decode_shared(
        &mut self,
        slot: &mut dyn SharedSlot,
        node: &Node,
        scope: &Scope,
    ) -> Result<(), ClassifyError> {
        slot.rebuild(&mut |value, handle| {
            let inner = Scope {
                parent: scope.parent.clone(),
                this: Some(handle),
            };
            self.decode_into(value, node, &inner)
        })
    }
}
