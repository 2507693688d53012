//! pstyle-app - Configuration and command handlers for Personal Styles
//!
//! Sits between the CLI and the registry: loads `config.toml`, applies the
//! default-collection fallback, and renders query results as text or JSON.

pub mod commands;
pub mod config;

pub use commands::{CommandContext, VerifyOutcome};
pub use config::{OutputFormat, Settings};
