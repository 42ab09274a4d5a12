use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// Finds the path under which the crate expanding a macro sees another
/// workspace crate.
///
/// Generated code must name `classify_reflect` the way the invoking crate
/// can reach it, which depends on what that crate lists in its
/// `Cargo.toml`.
///
/// # Example
///
/// ```rust
/// # use classify_macro_utils::Manifest;
/// let path: syn::Path = Manifest::shared(|m| m.get_crate_path("classify_reflect"));
/// ```
///
/// Reading the manifest is not free. Call it once per macro invocation and
/// pass the result around.
///
/// # Resolution rules
///
/// 1. A crate listed in `dependencies` resolves to `::crate_name`.
/// 2. A `classify_` crate resolves to `::classify::short_name` when the
///    facade crate `classify` is listed instead (`classify_reflect` becomes
///    `::classify::reflect`).
/// 3. Rules 1 and 2 are repeated for `dev-dependencies`.
/// 4. Anything else falls back to `::crate_name`.
///
/// A crate that expands its own macros needs `extern crate self as name;`
/// in its root for the fallback to resolve.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const FACADE_NAME: &str = "classify";
const WORKSPACE_PREFIX: &str = "classify_";

impl Manifest {
    #[inline(never)]
    fn get_manifest_path() -> PathBuf {
        env::var_os("CARGO_MANIFEST_DIR")
            .map(|path| {
                let mut path = PathBuf::from(path);
                path.push("Cargo.toml");
                assert!(
                    path.exists(),
                    "Cargo manifest does not exist at path {}",
                    path.display(),
                );
                path
            })
            .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.")
    }

    #[inline(never)]
    fn get_manifest_modified_time(
        cargo_manifest_path: &Path,
    ) -> Result<SystemTime, std::io::Error> {
        std::fs::metadata(cargo_manifest_path).and_then(|metadata| metadata.modified())
    }

    #[inline(never)]
    fn read_manifest(path: &Path) -> Document<Box<str>> {
        let manifest = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        Document::parse(manifest)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()))
    }

    #[inline]
    fn parse_str<T: syn::parse::Parse>(path: &str) -> T {
        syn::parse_str(path).unwrap_or_else(|_| panic!("`{path}` is not a valid path"))
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::parse_str(&format!("::{name}")));
        }

        let module = name.strip_prefix(WORKSPACE_PREFIX)?;
        if !deps.contains_key(FACADE_NAME) {
            return None;
        }
        let mut path = Self::parse_str::<syn::Path>(&format!("::{FACADE_NAME}"));
        path.segments.push(Self::parse_str(module));
        Some(path)
    }

    /// Returns the path of the package `name` as seen from the invoking
    /// crate. See the type level docs for the rules.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        for table in ["dependencies", "dev-dependencies"] {
            if let Some(Item::Table(deps)) = self.manifest.get(table)
                && let Some(path) = Self::find_in_deps(deps, name)
            {
                return path;
            }
        }

        Self::parse_str(&format!("::{name}"))
    }

    /// Runs `func` on the [`Manifest`] of the invoking crate.
    ///
    /// Parsed manifests are cached per path and re-read when the file
    /// changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let manifest_path = Self::get_manifest_path();
        let modified_time = Self::get_manifest_modified_time(&manifest_path)
            .expect("The Cargo.toml should have a modified time.");

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(manifest) = manifests.get(&manifest_path)
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }
        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read_manifest(&manifest_path),
            modified_time,
        };
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(manifest_path, manifest);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::Manifest;
    use std::time::SystemTime;
    use toml_edit::Document;

    fn path_string(path: &syn::Path) -> String {
        let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
        let colon = if path.leading_colon.is_some() { "::" } else { "" };
        format!("{colon}{}", segments.join("::"))
    }

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: Document::parse(Box::from(text)).unwrap(),
            modified_time: SystemTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn direct_dependency_wins() {
        let m = manifest("[dependencies]\nclassify_reflect = \"0.1\"\nclassify = \"0.1\"\n");
        assert_eq!(path_string(&m.get_crate_path("classify_reflect")), "::classify_reflect");
    }

    #[test]
    fn facade_dependency() {
        let m = manifest("[dev-dependencies]\nclassify = \"0.1\"\n");
        assert_eq!(path_string(&m.get_crate_path("classify_reflect")), "::classify::reflect");
    }

    #[test]
    fn fallback_is_absolute() {
        let m = manifest("[package]\nname = \"demo\"\n");
        assert_eq!(path_string(&m.get_crate_path("classify_reflect")), "::classify_reflect");
    }
}
