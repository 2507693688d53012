//! Configuration types for Personal Styles
//!
//! Defines:
//! - `Settings` - Top-level `config.toml` contents
//! - `RegistrySettings` - Where styles come from and which collection is default
//! - `OutputSettings` - How command results are printed

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application settings (`config.toml`)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub registry: RegistrySettings,

    #[serde(default)]
    pub output: OutputSettings,
}

/// Registry settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistrySettings {
    /// Package root containing `styles/`. Empty = automatic location
    #[serde(default)]
    pub data_dir: String,

    /// Collection used for unqualified style names and as lookup fallback
    #[serde(default = "default_collection")]
    pub default_collection: String,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            data_dir: String::new(),
            default_collection: default_collection(),
        }
    }
}

impl RegistrySettings {
    /// Configured data directory, if one is set
    pub fn data_dir(&self) -> Option<PathBuf> {
        let trimmed = self.data_dir.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(PathBuf::from(trimmed))
        }
    }
}

fn default_collection() -> String {
    "light".to_string()
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,

    /// Print paths with `/` separators on every platform
    #[serde(default)]
    pub posix_paths: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.registry.default_collection, "light");
        assert!(settings.registry.data_dir().is_none());
        assert_eq!(settings.output.format, OutputFormat::Text);
        assert!(!settings.output.posix_paths);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: Settings = toml::from_str("[output]\nformat = \"json\"\n").unwrap();
        assert_eq!(settings.output.format, OutputFormat::Json);
        assert_eq!(settings.registry.default_collection, "light");
    }

    #[test]
    fn test_data_dir_blank_is_none() {
        let settings: Settings = toml::from_str("[registry]\ndata_dir = \"   \"\n").unwrap();
        assert!(settings.registry.data_dir().is_none());

        let settings: Settings =
            toml::from_str("[registry]\ndata_dir = \"/opt/personal-styles\"\n").unwrap();
        assert_eq!(
            settings.registry.data_dir(),
            Some(PathBuf::from("/opt/personal-styles"))
        );
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result: Result<Settings, _> = toml::from_str("[output]\nformat = \"yaml\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Text.to_string(), "text");
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }
}
