use alloc::format;
use alloc::string::{String, ToString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use classify_tree::Node;
use log::{debug, trace};
use ron::ser::PrettyConfig;

use crate::error::StoreError;
use crate::store::ObjectStore;

/// An [`ObjectStore`] writing one RON file per object.
///
/// The node saved under `(type_name, id)` lives at
/// `{base}/{type_name}/{id}.{extension}`.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use classify_reflect::store::DirectoryStore;
///
/// let store = DirectoryStore::new("data").with_extension("node");
/// assert_eq!(store.path_of("Map", "v1.2"), PathBuf::from("data/Map/v1.2.node"));
/// ```
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    base: PathBuf,
    extension: String,
}

impl DirectoryStore {
    pub const DEFAULT_EXTENSION: &'static str = "ron";

    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            extension: String::from(Self::DEFAULT_EXTENSION),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    #[inline]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// File that holds the object `(type_name, id)`.
    ///
    /// Characters other than ASCII alphanumerics, `_`, `-` and `.` are
    /// replaced by `_` in both parts, so generic names such as `Vec<u8>`
    /// stay valid on every platform. Distinct names may map to the same file.
    pub fn path_of(&self, type_name: &str, id: &str) -> PathBuf {
        self.base
            .join(file_safe(type_name))
            .join(format!("{}.{}", file_safe(id), self.extension))
    }
}

fn file_safe(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '-' | '.' => c,
            _ => '_',
        })
        .collect()
}

impl ObjectStore for DirectoryStore {
    fn load(&self, type_name: &str, id: &str) -> Result<Node, StoreError> {
        let path = self.path_of(type_name, id);
        trace!("reading {}", path.display());

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound {
                    type_name: type_name.into(),
                    id: id.into(),
                });
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        debug!("loaded `{type_name}` `{id}`");
        ron::from_str(&text).map_err(|error| StoreError::Malformed {
            type_name: type_name.into(),
            id: id.into(),
            message: error.to_string(),
        })
    }

    fn save(&self, type_name: &str, id: &str, node: &Node) -> Result<(), StoreError> {
        let path = self.path_of(type_name, id);
        trace!("writing {}", path.display());

        let text = ron::ser::to_string_pretty(node, PrettyConfig::default()).map_err(|error| {
            StoreError::Malformed {
                type_name: type_name.into(),
                id: id.into(),
                message: error.to_string(),
            }
        })?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, text).map_err(|source| StoreError::Io { path, source })?;

        debug!("saved `{type_name}` `{id}`");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::DirectoryStore;
    use crate::error::StoreError;
    use crate::store::ObjectStore;
    use classify_tree::Node;

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryStore::new(dir.path());

        let node = Node::new("item")
            .with_attribute("kind", "tile")
            .with_child(Node::leaf("x", "3"));
        store.save("Tile", "t-1", &node).unwrap();

        assert!(dir.path().join("Tile").join("t-1.ron").is_file());
        assert_eq!(store.load("Tile", "t-1").unwrap(), node);
    }

    #[test]
    fn generic_names_become_plain_paths() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryStore::new(dir.path());

        assert_eq!(
            store.path_of("BTreeMap<String, u8>", "a/b"),
            dir.path().join("BTreeMap_String__u8_").join("a_b.ron")
        );

        let node = Node::leaf("item", "1");
        store.save("Vec<u8>", "v", &node).unwrap();
        assert!(dir.path().join("Vec_u8_").join("v.ron").is_file());
        assert_eq!(store.load("Vec<u8>", "v").unwrap(), node);
    }

    #[test]
    fn missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryStore::new(dir.path()).with_extension("txt");

        assert!(matches!(
            store.load("Tile", "none"),
            Err(StoreError::NotFound { .. })
        ));

        std::fs::create_dir_all(dir.path().join("Tile")).unwrap();
        std::fs::write(store.path_of("Tile", "bad"), "not ron (").unwrap();
        assert!(matches!(
            store.load("Tile", "bad"),
            Err(StoreError::Malformed { .. })
        ));
    }
}
