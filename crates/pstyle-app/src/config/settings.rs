//! Settings parser for config.toml

use super::types::Settings;
use pstyle_core::locate::APP_DIR_NAME;
use pstyle_core::prelude::*;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_CONFIG: &str = r#"# Personal Styles Configuration

[registry]
data_dir = ""                 # Empty = locate styles next to the binary
default_collection = "light"  # Used for unqualified names like `pstyle path papyrus`

[output]
format = "text"               # text | json
posix_paths = false           # Print paths with '/' separators on every platform
"#;

/// Default location: `<config_dir>/personal-styles/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILENAME))
}

/// Load settings from an explicit path, or the default location
pub fn load_settings(explicit: Option<&Path>) -> Settings {
    match explicit.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) => load_settings_from(&path),
        None => {
            debug!("No config directory on this platform, using defaults");
            Settings::default()
        }
    }
}

/// Load settings from `config_path`
///
/// A missing file yields defaults. An unreadable or invalid file is logged
/// and also yields defaults, so a typo never blocks style lookup.
pub fn load_settings_from(config_path: &Path) -> Settings {
    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Write the default config file to `config_path`
///
/// Never overwrites an existing file. Returns whether a file was written.
pub fn init_config(config_path: &Path) -> Result<bool> {
    if config_path.exists() {
        debug!("Config already exists at {:?}", config_path);
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::config(format!("Failed to create {}: {}", parent.display(), e)))?;
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .map_err(|e| Error::config(format!("Failed to write {}: {}", config_path.display(), e)))?;

    info!("Created default config at {:?}", config_path);
    Ok(true)
}
