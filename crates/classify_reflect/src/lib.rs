//! Object graph serialization into [`Node`] trees.
//!
//! Types implement [`Classify`], usually through `#[derive(Classify)]`,
//! which records their members and member policies in static type
//! information. A [`Classifier`] walks a value with that information and
//! produces a tree of named nodes, and rebuilds values from such trees:
//!
//! - leaves (numbers, `bool`, `char`, `String`) and fieldless enums become
//!   text nodes,
//! - `Option`, the standard collections and `[T; N]` map to null markers and
//!   `item` children,
//! - `Box<dyn Base>` members carry a discriminator resolved through the
//!   [`TypeRegistry`](registry::TypeRegistry),
//! - [`DeferredRef`] members marked `follow_id` are written as an id and
//!   loaded lazily from an [`ObjectStore`](store::ObjectStore),
//! - [`Parent`] members are pointed back at the object that owns them.
//!
//! # Examples
//!
//! ```
//! use classify_reflect::{Classifier, Classify};
//!
//! #[derive(Classify, Default, Debug, PartialEq)]
//! struct Settings {
//!     name: String,
//!     #[classify(ignore_if_default)]
//!     retries: u8,
//!     tags: Vec<String>,
//! }
//!
//! let classifier = Classifier::default();
//! let settings = Settings {
//!     name: "main".into(),
//!     retries: 0,
//!     tags: vec!["a".into()],
//! };
//!
//! let node = classifier.serialize(&settings).unwrap();
//! assert!(node.child("retries").is_none());
//!
//! let back: Settings = classifier.deserialize(&node).unwrap();
//! assert_eq!(back, settings);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Generated code names the crate `classify_reflect`, including in the
// crate's own tests and doc tests.
extern crate self as classify_reflect;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod deferred;
mod error;
mod parent;
mod reflection;

pub mod codec;
pub mod impls;
pub mod info;
pub mod ops;
pub mod registry;
pub mod store;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use classify_reflect_derive as derive;
pub use classify_reflect_derive::Classify;
pub use classify_tree::Node;

pub use codec::{Classifier, ClassifierOptions};
pub use deferred::DeferredRef;
pub use error::{ClassifyError, ConfigurationError, ConstructionCause};
pub use error::{FormatError, FormatErrorKind, LeafParseError, StoreError};
pub use parent::{Parent, ParentHandle};
pub use reflection::Classify;
