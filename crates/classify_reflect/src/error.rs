use alloc::string::String;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

// -----------------------------------------------------------------------------
// ClassifyError

/// Any failure of a serialize or deserialize call.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClassifyError {
    /// The type tables are misused. Always a bug in the schema, not in the data.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The resolved type cannot be instantiated.
    #[error("cannot construct `{type_path}`: {cause}")]
    Construction {
        type_path: &'static str,
        #[source]
        cause: ConstructionCause,
    },

    /// A present node does not match its declared type.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The object store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ClassifyError {
    #[inline]
    pub(crate) fn construction(type_path: &'static str, cause: ConstructionCause) -> Self {
        Self::Construction { type_path, cause }
    }
}

// -----------------------------------------------------------------------------
// ConfigurationError

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("map `{map}` has key type `{key}`, only strings, integers and enums can be keys")]
    UnsupportedKey {
        map: &'static str,
        key: &'static str,
    },

    #[error("member `{owner}.{member}` follows an id but has type `{found}`, expected a `DeferredRef`")]
    FollowIdNotDeferred {
        owner: &'static str,
        member: &'static str,
        found: &'static str,
    },

    #[error("member `{owner}.{member}` is a parent reference but has type `{found}`, expected a `Parent`")]
    ParentNotParentSlot {
        owner: &'static str,
        member: &'static str,
        found: &'static str,
    },

    #[error("member `{owner}.{member}` receives an id but has type `{found}`, expected a string")]
    IdNotString {
        owner: &'static str,
        member: &'static str,
        found: &'static str,
    },

    #[error("`{0}` can only be a member marked as parent")]
    DetachedParent(&'static str),

    #[error("member `{owner}.{member}` follows an id but no object store is configured")]
    MissingStore {
        owner: &'static str,
        member: &'static str,
    },
}

// -----------------------------------------------------------------------------
// ConstructionCause

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConstructionCause {
    #[error("the type has no default instance")]
    NoDefault,

    #[error("expected a value of type `{0}`")]
    Mismatch(&'static str),
}

// -----------------------------------------------------------------------------
// FormatError

/// A malformed node, tagged with its path from the root.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("malformed node `{path}`: {kind}")]
pub struct FormatError {
    pub path: String,
    pub kind: FormatErrorKind,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FormatErrorKind {
    #[error(transparent)]
    InvalidText(#[from] LeafParseError),

    #[error("`{name}` is not a variant of `{type_path}`")]
    UnknownEnumValue {
        type_path: &'static str,
        name: String,
    },

    #[error("invalid base64 payload")]
    InvalidBase64,

    #[error("base64 payload is not UTF-8")]
    InvalidUtf8,

    #[error("`{0}` is not a valid code point")]
    InvalidCodePoint(String),

    #[error("unknown encoding `{0}`")]
    UnknownEncoding(String),

    #[error("missing `id` attribute")]
    MissingId,
}

/// Text that does not parse as its leaf type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("`{text}` is not a valid `{type_path}`")]
pub struct LeafParseError {
    pub type_path: &'static str,
    pub text: String,
}

// -----------------------------------------------------------------------------
// StoreError

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("no stored `{type_name}` with id `{id}`")]
    NotFound { type_name: String, id: String },

    #[error("cannot access `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("stored `{type_name}` with id `{id}` is malformed: {message}")]
    Malformed {
        type_name: String,
        id: String,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn format_error_names_path() {
        let error = FormatError {
            path: "item/points/item[2]".into(),
            kind: FormatErrorKind::UnknownEnumValue {
                type_path: "demo::Color",
                name: "Purple".into(),
            },
        };
        assert_eq!(
            error.to_string(),
            "malformed node `item/points/item[2]`: `Purple` is not a variant of `demo::Color`"
        );
    }

    #[test]
    fn configuration_converts_into_classify_error() {
        let error: ClassifyError = ConfigurationError::UnsupportedKey {
            map: "BTreeMap<f32, u8>",
            key: "f32",
        }
        .into();
        assert!(matches!(
            error,
            ClassifyError::Configuration(ConfigurationError::UnsupportedKey { .. })
        ));
    }
}
