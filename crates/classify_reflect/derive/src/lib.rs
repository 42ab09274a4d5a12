//! Derive macro for `classify_reflect`, see [`Classify`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static CLASSIFY_ATTRIBUTE_NAME: &str = "classify";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

use derive_data::ClassifyDerive;

// -----------------------------------------------------------------------------
// Macros

/// # Classify Derivation
///
/// `#[derive(Classify)]` implements `TypePath`, `Typed` and `Classify`, plus:
///
/// - `Struct` for `struct T { ... }` and `struct T;`,
/// - `EnumLeaf` for fieldless enums, written as the variant name.
///
/// Tuple structs, unions and enums with fields are rejected.
///
/// Structs need `Default` unless marked `no_default`: the decoder starts
/// from the default value and overwrites the members present in the tree.
/// The first variant of an enum is its default and its zero value.
///
/// ## Type Attributes
///
/// ### Type Path
///
/// Names default to `module_path!()::Ident`. They are written as the
/// `fulltype` discriminator and used as the object store key, so they can be
/// pinned:
///
/// ```rust, ignore
/// #[derive(Classify, Default)]
/// #[classify(type_path = "shapes::Square")]
/// struct Square { /* ... */ }
/// ```
///
/// Generic arguments are appended: `shapes::Pair<u8>`.
///
/// ### Class Policies
///
/// `ignore_if_default` and `ignore_if_empty` apply the member policy of the
/// same name to every member. Members opt out with `keep_default` and
/// `keep_empty`.
///
/// ```rust, ignore
/// #[derive(Classify, Default)]
/// #[classify(ignore_if_default, ignore_if_empty)]
/// struct Sparse {
///     count: u32,
///     #[classify(keep_default)]
///     version: u32,
///     tags: Vec<String>,
/// }
/// ```
///
/// ### Subtypes
///
/// `subtype_of = dyn Base` registers the type as a subtype of a base
/// declared with `impl_polymorphic!`. The registration is collected at link
/// time when the `auto_register` feature is on; without it, call
/// `TypeRegistry::register_subtype` by hand. Not available on generic types.
///
/// ```rust, ignore
/// #[derive(Classify, Default)]
/// #[classify(subtype_of = dyn Shape)]
/// struct Circle { radius: f64 }
/// ```
///
/// ### No Default
///
/// `no_default` drops the `Default` requirement. `Typed::instantiate`
/// returns `None`, so the decoder fails with a construction error wherever it
/// would have to build the type, and `reset` resets the members one by one.
///
/// ## Field Attributes
///
/// | Attribute | Effect |
/// |-----------|--------|
/// | `rename = "Name"` | stores the member under `Name` |
/// | `skip` | leaves the field out of the member table, it does not need to implement `Classify` |
/// | `ignore` | keeps the member in the table but never writes or reads it |
/// | `parent` | never written; a `Parent<P>` pointed at the enclosing object on read |
/// | `follow_id` | a `DeferredRef<T>` written as an id, the value goes to the object store |
/// | `id` | a `String` filled with the id of the reference that loaded the object |
/// | `ignore_if_default` | not written while equal to its zero value |
/// | `ignore_if_empty` | not written while it encodes to an empty collection |
/// | `ignore_if_equal = expr` | not written while equal to `expr` |
/// | `keep_default`, `keep_empty` | opt out of the class policies |
///
/// ## Variant Attributes
///
/// `rename = "Name"` changes the text written for a variant.
#[proc_macro_derive(Classify, attributes(classify))]
pub fn derive_classify(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match ClassifyDerive::from_input(&ast) {
        Ok(ClassifyDerive::Struct(info)) => impls::impl_struct(&info),
        Ok(ClassifyDerive::Enum(info)) => impls::impl_enum(&info),
        Err(err) => err.into_compile_error(),
    }
    .into()
}
