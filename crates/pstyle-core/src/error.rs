//! Registry error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error types organized by who is at fault: caller, package, or environment
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Lookup Errors (caller mistakes)
    // ─────────────────────────────────────────────────────────────
    #[error("Unknown style collection '{requested}'. Available: {}", list_or_none(.available))]
    UnknownCollection {
        requested: String,
        available: Vec<String>,
    },

    #[error(
        "Unknown style '{requested}' in collection '{collection}'. Available: {}",
        list_or_none(.available)
    )]
    ResourceNotFound {
        collection: String,
        requested: String,
        available: Vec<String>,
    },

    #[error("Invalid style name '{input}': expected '<collection>/<style>'")]
    InvalidStyleName { input: String },

    // ─────────────────────────────────────────────────────────────
    // Packaging Errors (broken build or install)
    // ─────────────────────────────────────────────────────────────
    #[error("Packaging error: style '{collection}/{style}' at {path} is unusable: {reason}")]
    Packaging {
        collection: String,
        style: String,
        path: PathBuf,
        reason: String,
    },

    #[error("Invalid style catalog: {message}")]
    InvalidCatalog { message: String },

    #[error("Style data directory not found. Searched: {}", display_paths(.searched))]
    PackageRootNotFound { searched: Vec<PathBuf> },

    #[error("Style syntax error in {path}, line {line}: {message}")]
    StyleSyntax {
        path: PathBuf,
        line: usize,
        message: String,
    },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

fn list_or_none(names: &[String]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn unknown_collection<I, S>(requested: impl Into<String>, available: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::UnknownCollection {
            requested: requested.into(),
            available: available.into_iter().map(Into::into).collect(),
        }
    }

    pub fn resource_not_found<I, S>(
        collection: impl Into<String>,
        requested: impl Into<String>,
        available: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::ResourceNotFound {
            collection: collection.into(),
            requested: requested.into(),
            available: available.into_iter().map(Into::into).collect(),
        }
    }

    pub fn invalid_style_name(input: impl Into<String>) -> Self {
        Self::InvalidStyleName {
            input: input.into(),
        }
    }

    pub fn packaging(
        collection: impl Into<String>,
        style: impl Into<String>,
        path: impl Into<PathBuf>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Packaging {
            collection: collection.into(),
            style: style.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_catalog(message: impl Into<String>) -> Self {
        Self::InvalidCatalog {
            message: message.into(),
        }
    }

    pub fn style_syntax(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::StyleSyntax {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    ///
    /// Recoverable errors are caller mistakes: a different name or a
    /// fallback collection can succeed where this request failed.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::UnknownCollection { .. }
                | Error::ResourceNotFound { .. }
                | Error::InvalidStyleName { .. }
                | Error::Config { .. }
        )
    }

    /// Check if this error means the installed package itself is broken
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Packaging { .. }
                | Error::InvalidCatalog { .. }
                | Error::PackageRootNotFound { .. }
                | Error::StyleSyntax { .. }
        )
    }

    /// Valid alternatives for a failed lookup, if this is a lookup error
    pub fn alternatives(&self) -> &[String] {
        match self {
            Error::UnknownCollection { available, .. }
            | Error::ResourceNotFound { available, .. } => available,
            _ => &[],
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_collection_lists_alternatives() {
        let err = Error::unknown_collection("neon", ["dark", "light"]);
        let msg = err.to_string();
        assert!(msg.contains("'neon'"));
        assert!(msg.contains("dark, light"));
        assert_eq!(err.alternatives(), ["dark", "light"]);
    }

    #[test]
    fn test_resource_not_found_lists_alternatives() {
        let err = Error::resource_not_found("light", "does-not-exist", ["ivorygrid", "papyrus"]);
        let msg = err.to_string();
        assert!(msg.contains("'does-not-exist'"));
        assert!(msg.contains("'light'"));
        assert!(msg.contains("ivorygrid, papyrus"));
    }

    #[test]
    fn test_empty_alternatives_display() {
        let err = Error::unknown_collection("x", Vec::<String>::new());
        assert!(err.to_string().contains("(none)"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_lookup_errors_are_recoverable() {
        assert!(Error::unknown_collection("x", ["dark"]).is_recoverable());
        assert!(Error::resource_not_found("dark", "x", ["charcoal"]).is_recoverable());
        assert!(Error::invalid_style_name("charcoal").is_recoverable());
        assert!(!Error::unknown_collection("x", ["dark"]).is_fatal());
    }

    #[test]
    fn test_packaging_errors_are_fatal() {
        let err = Error::packaging("dark", "charcoal", "/pkg/styles/charcoal.mplstyle", "missing");
        assert!(err.is_fatal());
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("dark/charcoal"));
        assert!(err.to_string().contains("missing"));

        assert!(Error::invalid_catalog("duplicate").is_fatal());
        assert!(Error::PackageRootNotFound { searched: vec![] }.is_fatal());
    }

    #[test]
    fn test_package_root_not_found_lists_searched() {
        let err = Error::PackageRootNotFound {
            searched: vec![PathBuf::from("/a"), PathBuf::from("/b")],
        };
        let msg = err.to_string();
        assert!(msg.contains("/a"));
        assert!(msg.contains("/b"));
    }

    #[test]
    fn test_style_syntax_error_display() {
        let err = Error::style_syntax("/pkg/styles/x.mplstyle", 7, "missing ':'");
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("missing ':'"));
    }

    #[test]
    fn test_context_passes_error_through() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = res.context("reading style").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
