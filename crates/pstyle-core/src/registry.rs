//! Style registry: logical style names to verified file paths
//!
//! A [`Registry`] is built once, explicitly, from a package root and a
//! catalog table. After construction it is immutable and can be shared
//! freely between threads.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

use crate::catalog::{CollectionSpec, StyleKey, CATALOG, STYLE_EXTENSION};
use crate::error::{Error, Result};
use crate::style_file::read_style_file;

/// One bundled style-definition file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleResource {
    pub name: String,
    pub collection: String,
    /// Path segment below the package root, e.g. `styles/charcoal.mplstyle`
    pub relative_location: PathBuf,
    /// Absolute path computed when the registry was built
    pub resolved_path: PathBuf,
}

impl StyleResource {
    /// `collection/name`
    pub fn qualified_name(&self) -> String {
        format!("{}/{}", self.collection, self.name)
    }

    /// Check the backing file is usable, returning its path
    fn checked_path(&self) -> Result<&Path> {
        let path = self.resolved_path.as_path();
        let packaging = |reason: String| {
            Error::packaging(&self.collection, &self.name, path, reason)
        };

        if path.extension().and_then(|e| e.to_str()) != Some(STYLE_EXTENSION) {
            return Err(packaging(format!("expected a .{STYLE_EXTENSION} file")));
        }

        let metadata = fs::metadata(path).map_err(|e| packaging(e.to_string()))?;
        if !metadata.is_file() {
            return Err(packaging("not a regular file".to_string()));
        }

        File::open(path).map_err(|e| packaging(format!("not readable: {e}")))?;

        Ok(path)
    }
}

/// A named group of styles sharing a visual category
#[derive(Debug, Clone, Serialize)]
pub struct ThemeCollection {
    pub name: String,
    pub description: String,
    members: BTreeMap<String, StyleResource>,
}

impl ThemeCollection {
    /// Style names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&StyleResource> {
        self.members.get(name)
    }

    pub fn styles(&self) -> impl Iterator<Item = &StyleResource> {
        self.members.values()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// One style that failed verification
#[derive(Debug, Serialize)]
pub struct VerifyFailure {
    pub style: String,
    pub message: String,
    pub fatal: bool,
}

/// Outcome of checking every registered style
#[derive(Debug, Default, Serialize)]
pub struct VerifyReport {
    /// Number of styles checked
    pub checked: usize,
    pub failures: Vec<VerifyFailure>,
}

impl VerifyReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// All theme collections of one package
#[derive(Debug, Clone, Serialize)]
pub struct Registry {
    root: PathBuf,
    collections: BTreeMap<String, ThemeCollection>,
}

/// Build the registry of bundled styles rooted at `package_root`.
///
/// `package_root` is the directory that contains `styles/`. Resolution is
/// relative to it, never to the current working directory.
pub fn build_registry(package_root: &Path) -> Result<Registry> {
    Registry::from_catalog(package_root, CATALOG)
}

impl Registry {
    /// Build a registry for an arbitrary catalog table
    pub fn from_catalog(package_root: &Path, catalog: &[CollectionSpec]) -> Result<Self> {
        let root = dunce::canonicalize(package_root).map_err(|e| {
            warn!("Cannot canonicalize package root {:?}: {}", package_root, e);
            Error::PackageRootNotFound {
                searched: vec![package_root.to_path_buf()],
            }
        })?;

        if !root.is_dir() {
            return Err(Error::PackageRootNotFound {
                searched: vec![root],
            });
        }

        let mut collections = BTreeMap::new();
        for spec in catalog {
            if spec.styles.is_empty() {
                return Err(Error::invalid_catalog(format!(
                    "collection '{}' has no styles",
                    spec.name
                )));
            }

            let mut members = BTreeMap::new();
            for key in spec.styles {
                if key.collection != spec.name {
                    return Err(Error::invalid_catalog(format!(
                        "style {key} declared under collection '{}'",
                        spec.name
                    )));
                }

                let relative_location = key.relative_location();
                let resource = StyleResource {
                    name: key.name.to_string(),
                    collection: spec.name.to_string(),
                    resolved_path: root.join(&relative_location),
                    relative_location,
                };
                trace!("Registered {} -> {:?}", key, resource.resolved_path);

                if members.insert(key.name.to_string(), resource).is_some() {
                    return Err(Error::invalid_catalog(format!("duplicate style {key}")));
                }
            }

            let collection = ThemeCollection {
                name: spec.name.to_string(),
                description: spec.description.to_string(),
                members,
            };
            if collections.insert(spec.name.to_string(), collection).is_some() {
                return Err(Error::invalid_catalog(format!(
                    "duplicate collection '{}'",
                    spec.name
                )));
            }
        }

        debug!(
            "Built style registry at {:?}: {} collections",
            root,
            collections.len()
        );

        Ok(Self { root, collections })
    }

    /// Canonical package root the registry resolves against
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Collection names, sorted
    pub fn list_collections(&self) -> Vec<&str> {
        self.collections.keys().map(String::as_str).collect()
    }

    /// Style names registered under `collection`, sorted
    pub fn list_available(&self, collection: &str) -> Result<Vec<&str>> {
        Ok(self.collection(collection)?.names().collect())
    }

    pub fn collection(&self, name: &str) -> Result<&ThemeCollection> {
        self.collections
            .get(name)
            .ok_or_else(|| Error::unknown_collection(name, self.list_collections()))
    }

    pub fn collections(&self) -> impl Iterator<Item = &ThemeCollection> {
        self.collections.values()
    }

    /// Metadata for one style, without touching the filesystem
    pub fn get(&self, collection: &str, style_name: &str) -> Result<&StyleResource> {
        let coll = self.collection(collection)?;
        coll.get(style_name)
            .ok_or_else(|| Error::resource_not_found(collection, style_name, coll.names()))
    }

    /// Every registered style, ordered by collection then name
    pub fn iter(&self) -> impl Iterator<Item = &StyleResource> {
        self.collections.values().flat_map(ThemeCollection::styles)
    }

    /// Resolve a style to the absolute path of its definition file.
    ///
    /// The file must exist and be readable at the time of the call.
    pub fn resolve(&self, collection: &str, style_name: &str) -> Result<PathBuf> {
        let resource = self.get(collection, style_name)?;
        resource.checked_path().map(Path::to_path_buf)
    }

    pub fn resolve_key(&self, key: StyleKey) -> Result<PathBuf> {
        self.resolve(key.collection, key.name)
    }

    /// Resolve `collection/style` (or `collection.style`)
    pub fn resolve_qualified(&self, qualified: &str) -> Result<PathBuf> {
        let (collection, style) = split_qualified(qualified)?;
        self.resolve(collection, style)
    }

    /// Resolved path with `/` separators on every platform
    pub fn resolve_posix(&self, collection: &str, style_name: &str) -> Result<String> {
        self.resolve(collection, style_name).map(|p| to_posix(&p))
    }

    /// Resolve and syntax-check every registered style
    pub fn verify(&self) -> VerifyReport {
        let mut report = VerifyReport::default();

        for resource in self.iter() {
            report.checked += 1;
            let outcome = resource
                .checked_path()
                .and_then(|path| read_style_file(path).map(drop));

            if let Err(err) = outcome {
                warn!("Style {} failed verification: {}", resource.qualified_name(), err);
                report.failures.push(VerifyFailure {
                    style: resource.qualified_name(),
                    message: err.to_string(),
                    fatal: err.is_fatal(),
                });
            }
        }

        debug!(
            "Verified {} styles, {} failures",
            report.checked,
            report.failures.len()
        );
        report
    }
}

/// Split `collection/style` into its parts. `.` is accepted as separator.
pub fn split_qualified(qualified: &str) -> Result<(&str, &str)> {
    let (collection, style) = qualified
        .split_once('/')
        .or_else(|| qualified.split_once('.'))
        .ok_or_else(|| Error::invalid_style_name(qualified))?;

    if collection.is_empty() || style.is_empty() {
        return Err(Error::invalid_style_name(qualified));
    }
    Ok((collection, style))
}

/// Render a path with forward slashes
pub fn to_posix(path: &Path) -> String {
    let s = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        s.into_owned()
    } else {
        s.replace(std::path::MAIN_SEPARATOR, "/")
    }
}
