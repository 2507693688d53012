//! Package root location
//!
//! Finds the directory holding `styles/` relative to the installed binary or
//! the source checkout, never relative to the caller's working directory.
//! Falls back to writing the embedded copy into the user cache directory.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::catalog::STYLES_DIR;
use crate::embedded;
use crate::error::{Error, Result};

/// Directory name used below platform data/cache directories
pub const APP_DIR_NAME: &str = "personal-styles";

/// Where a package root was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootSource {
    /// Explicit `--data-dir` or config `data_dir`
    Override,
    /// Next to the installed executable
    Installed,
    /// The crate directory of a source checkout
    SourceCheckout,
    /// Embedded styles written to the cache directory
    EmbeddedCache,
}

/// A located package root
#[derive(Debug, Clone)]
pub struct PackageRoot {
    pub path: PathBuf,
    pub source: RootSource,
}

/// Whether `dir` looks like a package root
pub fn is_package_root(dir: &Path) -> bool {
    dir.join(STYLES_DIR).is_dir()
}

/// Candidate roots in search order, excluding the embedded fallback
pub fn candidate_roots(override_dir: Option<&Path>) -> Vec<(PathBuf, RootSource)> {
    let mut candidates = Vec::new();

    if let Some(dir) = override_dir {
        candidates.push((dir.to_path_buf(), RootSource::Override));
    }

    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| dunce::canonicalize(exe).ok())
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        if let Some(prefix) = exe_dir.parent() {
            candidates.push((
                prefix.join("share").join(APP_DIR_NAME),
                RootSource::Installed,
            ));
        }
        candidates.push((exe_dir, RootSource::Installed));
    }

    candidates.push((
        PathBuf::from(env!("CARGO_MANIFEST_DIR")),
        RootSource::SourceCheckout,
    ));

    candidates
}

/// Cache directory the embedded styles are written to
pub fn embedded_cache_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|base| base.join(APP_DIR_NAME).join(env!("CARGO_PKG_VERSION")))
}

/// Locate the package root.
///
/// An override that does not contain `styles/` is an error rather than a
/// reason to keep searching: the user asked for that directory.
pub fn locate_package_root(override_dir: Option<&Path>) -> Result<PackageRoot> {
    if let Some(dir) = override_dir {
        if !is_package_root(dir) {
            warn!("Configured data directory has no styles/: {:?}", dir);
            return Err(Error::PackageRootNotFound {
                searched: vec![dir.to_path_buf()],
            });
        }
    }

    let candidates = candidate_roots(override_dir);
    for (path, source) in &candidates {
        if is_package_root(path) {
            debug!("Using package root {:?} ({:?})", path, source);
            return Ok(PackageRoot {
                path: path.clone(),
                source: *source,
            });
        }
    }

    let mut searched: Vec<PathBuf> = candidates.into_iter().map(|(p, _)| p).collect();

    if let Some(cache) = embedded_cache_dir() {
        match embedded::materialize(&cache) {
            Ok(path) => {
                info!("Using embedded styles materialized at {:?}", path);
                return Ok(PackageRoot {
                    path,
                    source: RootSource::EmbeddedCache,
                });
            }
            Err(e) => warn!("Failed to materialize embedded styles in {:?}: {}", cache, e),
        }
        searched.push(cache);
    }

    Err(Error::PackageRootNotFound { searched })
}
