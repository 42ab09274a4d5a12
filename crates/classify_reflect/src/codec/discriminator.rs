//! The `type` / `fulltype` discriminator of polymorphic slots.
//!
//! A `Box<dyn Base>` holding its declared default subtype is written without
//! a discriminator. Any other subtype gets `type` with its short name if it
//! is declared in the module of the default subtype (or of the base trait,
//! for abstract bases) and is not generic, or `fulltype` with its full path
//! otherwise.
//!
//! Reading is lenient: a discriminator that resolves to no registered
//! subtype, or to several, decodes as the declared default.

use classify_tree::Node;
use log::warn;

use super::decode::{Decoder, Scope};
use super::encode::Encoder;
use super::names::{FULLTYPE, TYPE};
use crate::error::{ClassifyError, ConstructionCause};
use crate::info::{PolymorphicInfo, TypeInfo};
use crate::ops::PolySlot;
use crate::registry::SubtypeEntry;

/// The attribute naming `runtime` inside a slot described by `info`, if any.
fn discriminator(
    info: &PolymorphicInfo,
    runtime: &'static TypeInfo,
) -> Option<(&'static str, &'static str)> {
    if info
        .fallback()
        .is_some_and(|fallback| fallback.type_id() == runtime.type_id())
    {
        return None;
    }

    let ty = runtime.ty();
    if !ty.is_generic() && ty.module_path() == info.context_module() {
        Some((TYPE, ty.name()))
    } else {
        Some((FULLTYPE, ty.path()))
    }
}

/// Returns `true` if `node` names the declared default of `info`.
fn names_fallback(info: &PolymorphicInfo, node: &Node) -> bool {
    info.fallback().is_some_and(|fallback| {
        node.attribute(TYPE) == Some(fallback.type_name())
            || node.attribute(FULLTYPE) == Some(fallback.type_path())
    })
}

impl Encoder<'_> {
    pub(super) fn encode_polymorphic(
        &mut self,
        name: &str,
        slot: &dyn PolySlot,
    ) -> Result<Node, ClassifyError> {
        let inner = slot.inner();
        let mut node = self.encode(name, inner)?;
        if let Some((key, value)) = discriminator(slot.polymorphic_info(), inner.classify_type_info()) {
            node.set_attribute(key, value);
        }
        Ok(node)
    }
}

impl<'a> Decoder<'a> {
    /// The registered subtype named by the discriminator of `node`.
    pub(super) fn resolve_subtype(
        &self,
        info: &PolymorphicInfo,
        node: &Node,
    ) -> Option<&'a SubtypeEntry> {
        let registry = self.classifier.registry();
        let base = info.base().id();

        if let Some(name) = node.attribute(TYPE) {
            registry.find_short(base, info.context_module(), name)
        } else if let Some(path) = node.attribute(FULLTYPE) {
            registry.find_full(base, path)
        } else {
            None
        }
    }

    /// Swaps the boxed value for the subtype named by `node` if needed, then
    /// decodes into it.
    pub(super) fn decode_polymorphic(
        &mut self,
        slot: &mut dyn PolySlot,
        node: &Node,
        scope: &Scope,
    ) -> Result<(), ClassifyError> {
        let info = slot.polymorphic_info();
        let entry = self.resolve_subtype(info, node);

        if entry.is_none()
            && (node.has_attribute(TYPE) || node.has_attribute(FULLTYPE))
            && !names_fallback(info, node)
        {
            warn!(
                "`{}`: unresolved discriminator for `{}`, using the declared type",
                self.path,
                info.ty().path()
            );
        }

        let target = match entry {
            Some(entry) => entry.info(),
            None => info.fallback().ok_or_else(|| {
                ClassifyError::construction(info.ty().path(), ConstructionCause::NoDefault)
            })?,
        };

        if slot.inner().classify_type_info().type_id() != target.type_id() {
            let replacement = match entry {
                Some(entry) => entry.construct(),
                None => info.ty().instantiate().ok_or_else(|| {
                    ClassifyError::construction(info.ty().path(), ConstructionCause::NoDefault)
                })?,
            };
            slot.set(replacement)
                .map_err(|found| super::mismatch(slot.classify_type_info(), &*found))?;
        }

        self.decode_into(slot.inner_mut(), node, scope)
    }
}
