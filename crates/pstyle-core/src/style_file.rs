//! Syntax check for matplotlib style sheets (`.mplstyle`)
//!
//! The registry does not interpret style contents. This module only checks
//! that a file has the `key : value` shape matplotlib's rc parser expects,
//! so that a packaging mistake shows up in `verify` rather than inside the
//! plotting library.

use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

use crate::error::{Error, Result, ResultExt};

/// rc keys are dotted identifiers, e.g. `axes.prop_cycle`, `xtick.major.size`
static KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("Invalid rc key regex"));

/// One `key : value` line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleEntry {
    pub key: String,
    pub value: String,
    /// 1-based source line
    pub line: usize,
}

/// Parsed contents of a style sheet, in file order
#[derive(Debug, Clone, Default, Serialize)]
pub struct StyleSheet {
    pub entries: Vec<StyleEntry>,
}

impl StyleSheet {
    /// Effective value of `key` (the last assignment wins)
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read and parse a style file
pub fn read_style_file(path: &Path) -> Result<StyleSheet> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read style file {}", path.display()))?;
    parse_style_at(&content, path)
}

/// Parse style sheet text that did not come from a file
pub fn parse_style(content: &str) -> Result<StyleSheet> {
    parse_style_at(content, Path::new("<memory>"))
}

fn parse_style_at(content: &str, path: &Path) -> Result<StyleSheet> {
    let mut sheet = StyleSheet::default();

    for (idx, raw) in content.lines().enumerate() {
        let line = idx + 1;
        let stripped = strip_comment(raw)
            .ok_or_else(|| syntax(path, line, format!("missing closing quote in '{}'", raw.trim())))?
            .trim();
        if stripped.is_empty() {
            continue;
        }

        let Some((key, value)) = stripped.split_once(':') else {
            return Err(syntax(path, line, format!("missing ':' in '{stripped}'")));
        };

        let key = key.trim();
        let value = value.trim();

        if !KEY_REGEX.is_match(key) {
            return Err(syntax(path, line, format!("invalid key '{key}'")));
        }
        if value.is_empty() {
            return Err(syntax(path, line, format!("empty value for '{key}'")));
        }

        if let Some(prev) = sheet.entries.iter().find(|e| e.key == key) {
            debug!(
                "{}: '{}' on line {} overrides line {}",
                path.display(),
                key,
                line,
                prev.line
            );
        }

        sheet.entries.push(StyleEntry {
            key: key.to_string(),
            value: value.to_string(),
            line,
        });
    }

    Ok(sheet)
}

fn syntax(path: &Path, line: usize, message: String) -> Error {
    Error::style_syntax(PathBuf::from(path), line, message)
}

/// Drop everything from the first `#` outside double quotes.
///
/// Single quotes do not protect `#`, matching matplotlib's rc reader.
/// Returns `None` when a double quote is opened before any comment and
/// never closed.
fn strip_comment(line: &str) -> Option<&str> {
    let mut in_quotes = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '#' if !in_quotes => return Some(&line[..i]),
            _ => {}
        }
    }
    (!in_quotes).then_some(line)
}
