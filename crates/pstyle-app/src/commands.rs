//! Command handlers
//!
//! Each handler turns a registry query into the text printed by the CLI.
//! Handlers never print themselves, so they can be tested without a process.

use pstyle_core::prelude::*;
use pstyle_core::{read_style_file, split_qualified, to_posix, Registry, StyleResource};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::config::{OutputFormat, Settings};

/// Everything a handler needs
#[derive(Debug, Clone, Copy)]
pub struct CommandContext<'a> {
    pub registry: &'a Registry,
    pub settings: &'a Settings,
}

/// Result of `verify`: the report text and whether the package is healthy
#[derive(Debug)]
pub struct VerifyOutcome {
    pub output: String,
    pub ok: bool,
}

#[derive(Serialize)]
struct CollectionSummary<'a> {
    name: &'a str,
    description: &'a str,
    styles: Vec<&'a str>,
}

#[derive(Serialize)]
struct ResolvedStyle<'a> {
    collection: &'a str,
    name: &'a str,
    path: String,
}

impl<'a> CommandContext<'a> {
    pub fn new(registry: &'a Registry, settings: &'a Settings) -> Self {
        Self { registry, settings }
    }

    fn format(&self) -> OutputFormat {
        self.settings.output.format
    }

    fn display_path(&self, path: &Path) -> String {
        if self.settings.output.posix_paths {
            to_posix(path)
        } else {
            path.display().to_string()
        }
    }

    /// Find a style by user input, falling back to the default collection
    /// when the requested collection does not exist.
    ///
    /// If the style is not in the default collection either, the original
    /// `UnknownCollection` error is returned.
    ///
    /// `style` may be qualified (`dark/charcoal`); otherwise `collection`
    /// or the configured default collection is used.
    pub fn lookup(
        &self,
        style: &str,
        collection: Option<&str>,
    ) -> Result<(&'a StyleResource, PathBuf)> {
        let default = self.settings.registry.default_collection.as_str();
        let (coll, name) = if style.contains('/') || style.contains('.') {
            split_qualified(style)?
        } else {
            (collection.unwrap_or(default), style)
        };

        match self.registry.resolve(coll, name) {
            Ok(path) => Ok((self.registry.get(coll, name)?, path)),
            Err(err @ Error::UnknownCollection { .. }) if coll != default => {
                warn!(
                    "Unknown collection '{}', falling back to default '{}'",
                    coll, default
                );
                // A failed fallback reports the collection the user asked for
                match self.registry.resolve(default, name) {
                    Ok(path) => Ok((self.registry.get(default, name)?, path)),
                    Err(fallback) => {
                        debug!("Fallback to '{}' failed: {}", default, fallback);
                        Err(err)
                    }
                }
            }
            Err(e) => Err(e),
        }
    }

    /// `pstyle collections`
    pub fn collections(&self) -> Result<String> {
        let summaries: Vec<CollectionSummary> = self
            .registry
            .collections()
            .map(|c| CollectionSummary {
                name: &c.name,
                description: &c.description,
                styles: c.names().collect(),
            })
            .collect();

        match self.format() {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&summaries)?),
            OutputFormat::Text => {
                let width = summaries.iter().map(|s| s.name.len()).max().unwrap_or(0);
                let mut out = String::new();
                for s in &summaries {
                    let _ = writeln!(
                        out,
                        "{:<width$}  {} styles  {}",
                        s.name,
                        s.styles.len(),
                        s.description
                    );
                }
                Ok(out)
            }
        }
    }

    /// `pstyle list [COLLECTION]`
    pub fn list(&self, collection: Option<&str>) -> Result<String> {
        let names: Vec<&str> = match collection {
            Some(c) => vec![self.registry.collection(c)?.name.as_str()],
            None => self.registry.list_collections(),
        };

        let mut resolved = Vec::new();
        for coll in names {
            for name in self.registry.list_available(coll)? {
                let path = self.registry.resolve(coll, name)?;
                resolved.push(ResolvedStyle {
                    collection: coll,
                    name,
                    path: self.display_path(&path),
                });
            }
        }

        match self.format() {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&resolved)?),
            OutputFormat::Text => {
                let width = resolved
                    .iter()
                    .map(|r| r.collection.len() + r.name.len() + 1)
                    .max()
                    .unwrap_or(0);
                let mut out = String::new();
                for r in &resolved {
                    let qualified = format!("{}/{}", r.collection, r.name);
                    let _ = writeln!(out, "{:<width$}  {}", qualified, r.path);
                }
                Ok(out)
            }
        }
    }

    /// `pstyle path STYLE [--collection C]`
    pub fn path(&self, style: &str, collection: Option<&str>) -> Result<String> {
        let (resource, path) = self.lookup(style, collection)?;
        let resolved = ResolvedStyle {
            collection: &resource.collection,
            name: &resource.name,
            path: self.display_path(&path),
        };

        match self.format() {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&resolved)?),
            OutputFormat::Text => Ok(format!("{}\n", resolved.path)),
        }
    }

    /// `pstyle show STYLE [--collection C]`
    pub fn show(&self, style: &str, collection: Option<&str>) -> Result<String> {
        let (resource, path) = self.lookup(style, collection)?;
        let sheet = read_style_file(&path)?;

        match self.format() {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&sheet)?),
            OutputFormat::Text => {
                let width = sheet.entries.iter().map(|e| e.key.len()).max().unwrap_or(0);
                let mut out = format!(
                    "# {} ({})\n",
                    resource.qualified_name(),
                    self.display_path(&path)
                );
                for entry in &sheet.entries {
                    let _ = writeln!(out, "{:<width$} : {}", entry.key, entry.value);
                }
                Ok(out)
            }
        }
    }

    /// `pstyle verify`
    pub fn verify(&self) -> Result<VerifyOutcome> {
        let report = self.registry.verify();
        let ok = report.is_ok();

        let output = match self.format() {
            OutputFormat::Json => serde_json::to_string_pretty(&report)?,
            OutputFormat::Text => {
                let mut out = String::new();
                for failure in &report.failures {
                    let _ = writeln!(out, "FAIL  {}: {}", failure.style, failure.message);
                }
                let _ = writeln!(
                    out,
                    "{} of {} styles OK ({})",
                    report.checked - report.failures.len(),
                    report.checked,
                    self.display_path(self.registry.root())
                );
                out
            }
        };

        Ok(VerifyOutcome { output, ok })
    }
}
