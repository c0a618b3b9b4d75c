//! Reader for the playlist configuration document.
//!
//! The document is INI-style: `[Section]` headers followed by `key = value`
//! (or `key: value`) lines. Keys are case-insensitive, section names are not.
//! A line indented deeper than its key line continues that key's value;
//! `#`/`;` start comment lines.

use crate::error::ConfigError;
use crate::tokens::strip_all;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

pub const GENERAL_SECTION: &str = "General";

pub const INCLUDE_KEY: &str = "include";
pub const EXCLUDE_KEY: &str = "exclude";
pub const RANDOM_KEY: &str = "random";
pub const DIRS_KEY: &str = "dirs";
pub const OUTPUT_PATH_KEY: &str = "outputPath";

/// Key/value pairs of one section, keys stored lower-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    entries: IndexMap<String, String>,
}

impl Section {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&key.to_lowercase()).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&key.to_lowercase())
    }
}

/// A parsed configuration document: sections in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistConfig {
    sections: IndexMap<String, Section>,
}

impl PlaylistConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::parse_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn parse_str(text: &str) -> std::result::Result<Self, ConfigError> {
        let mut sections: IndexMap<String, Section> = IndexMap::new();
        let mut current: Option<String> = None;
        let mut last_key: Option<String> = None;
        let mut key_indent = 0;

        for (idx, raw_line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw_line.trim_end_matches('\r');
            let trimmed = line.trim();

            if trimmed.is_empty() {
                last_key = None;
                continue;
            }
            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            // Continuation of the previous value
            let indent = line.len() - line.trim_start().len();
            if indent > key_indent {
                if let (Some(section), Some(key)) = (&current, &last_key) {
                    if let Some(value) = sections
                        .get_mut(section)
                        .and_then(|s| s.entries.get_mut(key))
                    {
                        if !value.is_empty() {
                            value.push('\n');
                        }
                        value.push_str(trimmed);
                        continue;
                    }
                }
            }

            if trimmed.starts_with('[') && trimmed.ends_with(']') {
                let name = trimmed[1..trimmed.len() - 1].trim();
                if name.is_empty() {
                    return Err(ConfigError::parse(line_no, "empty section name"));
                }
                if sections.contains_key(name) {
                    return Err(ConfigError::parse(
                        line_no,
                        format!("section {name:?} already exists"),
                    ));
                }
                sections.insert(name.to_string(), Section::default());
                current = Some(name.to_string());
                last_key = None;
                continue;
            }

            let Some(section_name) = &current else {
                return Err(ConfigError::parse(line_no, "key found before any section header"));
            };

            let Some(split_at) = trimmed.find(['=', ':']) else {
                return Err(ConfigError::parse(
                    line_no,
                    format!("expected `key = value`, found {trimmed:?}"),
                ));
            };
            let key = trimmed[..split_at].trim().to_lowercase();
            let value = trimmed[split_at + 1..].trim().to_string();
            if key.is_empty() {
                return Err(ConfigError::parse(line_no, "empty key"));
            }

            let section = sections.entry(section_name.clone()).or_default();
            if section.entries.contains_key(&key) {
                return Err(ConfigError::parse(
                    line_no,
                    format!("option {key:?} in section {section_name:?} already exists"),
                ));
            }
            section.entries.insert(key.clone(), value);
            last_key = Some(key);
            key_indent = indent;
        }

        Ok(PlaylistConfig { sections })
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn general(&self) -> Option<&Section> {
        self.section(GENERAL_SECTION)
    }

    /// Every section except General, in file order.
    pub fn artist_sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections
            .iter()
            .filter(|(name, _)| name.as_str() != GENERAL_SECTION)
            .map(|(name, section)| (name.as_str(), section))
    }

    /// The configured playlist location, unquoted.
    pub fn output_path(&self) -> std::result::Result<PathBuf, ConfigError> {
        self.general()
            .and_then(|general| general.get(OUTPUT_PATH_KEY))
            .map(strip_all)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .ok_or(ConfigError::MissingOutputPath)
    }
}
