//! Configuration file parsing for Personal Styles
//!
//! Supports `<config_dir>/personal-styles/config.toml`, or any path passed
//! with `--config`.

pub mod settings;
pub mod types;

pub use settings::{default_config_path, init_config, load_settings, load_settings_from};
pub use types::*;
