//! Conversion between [`Classify`] values and [`Node`] trees.
//!
//! [`Classifier`] is the entry point. It dispatches on the kind of the
//! declared type:
//!
//! - leaves and enums become one text node,
//! - lists, arrays and maps become a node with one `item` child per entry,
//! - structs become a node with one child per member, following the member
//!   policies,
//! - `Box<dyn Base>` additionally carries a `type` or `fulltype`
//!   discriminator naming the runtime type,
//! - `None` becomes a null marker.
//!
//! Node names and attributes used by the codec are listed in [`names`].

use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use classify_tree::Node;

use crate::error::{ClassifyError, ConstructionCause};
use crate::info::{TypeInfo, Typed};
use crate::registry::TypeRegistry;
use crate::store::ObjectStore;
use crate::{Classify, ParentHandle};

use decode::{Decoder, Scope};
use encode::Encoder;

// -----------------------------------------------------------------------------
// Modules

mod container;
mod decode;
mod discriminator;
mod encode;
mod leaf;
mod node_path;
mod object;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Names

/// Node names and attributes written by the codec.
pub mod names {
    /// Tag of collection entries.
    pub const ITEM: &str = "item";
    /// Map key of an entry, in text form.
    pub const KEY: &str = "key";
    /// Id of a deferred reference.
    pub const ID: &str = "id";
    /// Short discriminator, resolved in the module of the declared type.
    pub const TYPE: &str = "type";
    /// Full discriminator.
    pub const FULLTYPE: &str = "fulltype";
    /// Encoding of a leaf whose text cannot be written as is.
    pub const ENCODING: &str = "encoding";
    /// Value of [`ENCODING`] for strings holding control characters.
    pub const BASE64: &str = "base64";
    /// Value of [`ENCODING`] for control and space characters.
    pub const CODEPOINT: &str = "codepoint";
}

// -----------------------------------------------------------------------------
// ClassifierOptions

/// Tunables of a [`Classifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierOptions {
    /// Name of the root node written by [`Classifier::serialize`] and of the
    /// nodes saved to the object store.
    pub root_name: String,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            root_name: String::from(names::ITEM),
        }
    }
}

// -----------------------------------------------------------------------------
// Classifier

/// Serializes values to node trees and back.
///
/// A classifier holds the [`TypeRegistry`] used to resolve polymorphic
/// discriminators and, optionally, the [`ObjectStore`] behind members marked
/// `follow_id`. Cloning is cheap.
///
/// # Examples
///
/// ```
/// use classify_reflect::{Classifier, Classify};
///
/// #[derive(Classify, Default, Debug, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let classifier = Classifier::default();
/// let node = classifier.serialize(&Point { x: 1, y: -2 }).unwrap();
///
/// assert_eq!(node.name(), "item");
/// assert_eq!(node.child("y").and_then(|y| y.text()), Some("-2"));
///
/// let back: Point = classifier.deserialize(&node).unwrap();
/// assert_eq!(back, Point { x: 1, y: -2 });
/// ```
#[derive(Clone)]
pub struct Classifier {
    registry: Arc<TypeRegistry>,
    store: Option<Arc<dyn ObjectStore>>,
    options: ClassifierOptions,
}

impl Default for Classifier {
    /// A classifier over [`TypeRegistry::new`], without a store.
    fn default() -> Self {
        Self::new(TypeRegistry::new())
    }
}

impl fmt::Debug for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Classifier")
            .field("registry", &self.registry)
            .field("store", &self.store.is_some())
            .field("options", &self.options)
            .finish()
    }
}

impl Classifier {
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            store: None,
            options: ClassifierOptions::default(),
        }
    }

    /// Uses `store` for members marked `follow_id`.
    pub fn with_store(self, store: impl ObjectStore + 'static) -> Self {
        self.with_shared_store(Arc::new(store))
    }

    /// Like [`with_store`](Self::with_store), for a store shared with the
    /// caller.
    pub fn with_shared_store(mut self, store: Arc<dyn ObjectStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_options(mut self, options: ClassifierOptions) -> Self {
        self.options = options;
        self
    }

    #[inline]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    #[inline]
    pub fn store(&self) -> Option<&dyn ObjectStore> {
        self.store.as_deref()
    }

    #[inline]
    pub fn options(&self) -> &ClassifierOptions {
        &self.options
    }

    /// Serializes `value` into a node named after
    /// [`ClassifierOptions::root_name`].
    pub fn serialize<T: Typed>(&self, value: &T) -> Result<Node, ClassifyError> {
        self.serialize_named(&self.options.root_name, value)
    }

    /// Serializes `value` into a node named `name`.
    pub fn serialize_named(&self, name: &str, value: &dyn Classify) -> Result<Node, ClassifyError> {
        Encoder::new(self).encode(name, value)
    }

    /// Builds a `T` from `node`.
    ///
    /// Members missing from the tree keep their default value.
    pub fn deserialize<T: Typed>(&self, node: &Node) -> Result<T, ClassifyError> {
        self.deserialize_as(T::type_info(), node, None)
            .and_then(Self::downcast)
    }

    /// Like [`deserialize`](Self::deserialize), pointing the members of the
    /// root object that are marked `parent` at `parent`.
    pub fn deserialize_with_parent<T: Typed>(
        &self,
        node: &Node,
        parent: &ParentHandle,
    ) -> Result<T, ClassifyError> {
        self.deserialize_as(T::type_info(), node, Some(parent))
            .and_then(Self::downcast)
    }

    /// Builds a value of the type described by `info` from `node`.
    pub fn deserialize_as(
        &self,
        info: &'static TypeInfo,
        node: &Node,
        parent: Option<&ParentHandle>,
    ) -> Result<Box<dyn Classify>, ClassifyError> {
        let scope = Scope::with_parent(parent.cloned());
        Decoder::new(self, node.name()).decode_new(info, node, &scope)
    }

    /// Decodes `node` over an existing value.
    ///
    /// Members missing from the tree are left untouched.
    pub fn deserialize_into(&self, value: &mut dyn Classify, node: &Node) -> Result<(), ClassifyError> {
        Decoder::new(self, node.name()).decode_into(value, node, &Scope::default())
    }

    fn downcast<T: Typed>(value: Box<dyn Classify>) -> Result<T, ClassifyError> {
        value.take::<T>().map_err(|found| mismatch(T::type_info(), &*found))
    }
}

/// A value built for `expected` came out with another type.
pub(crate) fn mismatch(expected: &'static TypeInfo, found: &dyn Classify) -> ClassifyError {
    ClassifyError::construction(
        found.classify_type_info().type_path(),
        ConstructionCause::Mismatch(expected.type_path()),
    )
}
