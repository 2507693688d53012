//! # pstyle-core - Style Registry
//!
//! Foundation crate for Personal Styles. Resolves logical style names to the
//! packaged matplotlib style sheets (`.mplstyle`) that ship with the crate.
//!
//! ## Public API
//!
//! ### Catalog (`catalog`)
//! - [`catalog::CATALOG`] - Every collection and style, declared once
//! - [`StyleKey`] - Typed constant per style (`catalog::dark::CHARCOAL`)
//!
//! ### Registry (`registry`)
//! - [`build_registry()`] - Explicit one-time construction from a package root
//! - [`Registry`] - `resolve`, `list_available`, `list_collections`, `verify`
//! - [`StyleResource`], [`ThemeCollection`] - Registry contents
//!
//! ### Package Location (`locate`, `embedded`)
//! - [`locate_package_root()`] - Find `styles/` next to the binary or checkout
//! - [`embedded::materialize()`] - Write the compiled-in copy to disk
//!
//! ### Style Files (`style_file`)
//! - [`read_style_file()`] - `key : value` syntax check for `.mplstyle` files
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Lookup errors (recoverable) vs packaging errors (fatal)
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//!
//! ## Example
//!
//! ```no_run
//! use pstyle_core::{build_registry, catalog, locate_package_root};
//!
//! let root = locate_package_root(None)?;
//! let registry = build_registry(&root.path)?;
//!
//! let charcoal = registry.resolve_key(catalog::dark::CHARCOAL)?;
//! println!("{}", charcoal.display());
//!
//! for name in registry.list_available("light")? {
//!     println!("{name}: {}", registry.resolve("light", name)?.display());
//! }
//! # Ok::<(), pstyle_core::Error>(())
//! ```

pub mod catalog;
pub mod embedded;
pub mod error;
pub mod locate;
pub mod logging;
pub mod registry;
pub mod style_file;

/// Prelude for common imports used throughout all Personal Styles crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use catalog::{CollectionSpec, StyleKey, CATALOG, STYLES_DIR, STYLE_EXTENSION};
pub use error::{Error, Result, ResultExt};
pub use locate::{locate_package_root, PackageRoot, RootSource};
pub use registry::{
    build_registry, split_qualified, to_posix, Registry, StyleResource, ThemeCollection,
    VerifyFailure, VerifyReport,
};
pub use style_file::{parse_style, read_style_file, StyleEntry, StyleSheet};
