//! Style files compiled into the binary
//!
//! Used as a last resort when no on-disk package root can be found (for
//! example a lone binary copied out of `target/`). The embedded files are
//! written to a cache directory so callers still get real paths.

use include_dir::{include_dir, Dir};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::catalog::STYLES_DIR;
use crate::error::{Result, ResultExt};

static BUNDLED_STYLES: Dir = include_dir!("$CARGO_MANIFEST_DIR/styles");

/// Embedded text of a bundled style file, by file name
pub fn bundled_source(file_name: &str) -> Option<&'static str> {
    BUNDLED_STYLES
        .get_file(file_name)
        .and_then(|f| f.contents_utf8())
}

/// File names of every embedded style file
pub fn bundled_files() -> impl Iterator<Item = &'static str> {
    BUNDLED_STYLES
        .files()
        .filter_map(|f| f.path().file_name().and_then(|n| n.to_str()))
}

/// Write the embedded styles below `target/styles/`.
///
/// Files already present with identical content are left alone, so
/// repeated calls are cheap. Returns `target`, which is a valid package
/// root afterwards.
pub fn materialize(target: &Path) -> Result<PathBuf> {
    let styles_dir = target.join(STYLES_DIR);
    fs::create_dir_all(&styles_dir)
        .with_context(|| format!("Failed to create {}", styles_dir.display()))?;

    let mut written = 0;
    for file in BUNDLED_STYLES.files() {
        let Some(name) = file.path().file_name() else {
            continue;
        };
        let dest = styles_dir.join(name);

        let up_to_date = fs::read(&dest)
            .map(|existing| existing == file.contents())
            .unwrap_or(false);
        if up_to_date {
            continue;
        }

        fs::write(&dest, file.contents())
            .with_context(|| format!("Failed to write embedded style {}", dest.display()))?;
        written += 1;
    }

    if written > 0 {
        info!("Wrote {} embedded style files to {:?}", written, styles_dir);
    } else {
        debug!("Embedded styles already present in {:?}", styles_dir);
    }

    Ok(target.to_path_buf())
}
