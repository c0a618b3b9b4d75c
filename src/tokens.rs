//! Normalisation and classification of include/exclude/dirs tokens.
//!
//! A field such as `include = "a.mp3", /music/b.mp3` is split on commas; every
//! entry is trimmed and unquoted, then classified as a path to an existing file
//! or as a bare file name.

use indexmap::IndexSet;
use std::path::{Component, Path, PathBuf};

/// One classified entry of a comma separated field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Resolves to an existing file; stored absolute.
    Path(PathBuf),
    /// Bare file name, matched against scanned files later on.
    Name(String),
}

/// Strip surrounding whitespace, then one layer of matching `'` or `"` quotes.
pub fn strip_all(raw: &str) -> &str {
    let trimmed = raw.trim();
    for quote in ['"', '\''] {
        if trimmed.len() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            return &trimmed[1..trimmed.len() - 1];
        }
    }
    trimmed
}

/// Classify a raw token. Empty tokens (after normalisation) yield `None`.
pub fn classify(raw: &str) -> Option<Token> {
    let entry = strip_all(raw);
    if entry.is_empty() {
        return None;
    }

    let path = Path::new(entry);
    if path.is_file() {
        Some(Token::Path(absolutize(path)))
    } else {
        Some(Token::Name(entry.to_string()))
    }
}

/// Split a comma separated field into normalised, non-empty entries.
pub fn split_field(value: &str) -> impl Iterator<Item = &str> {
    value
        .trim()
        .split(',')
        .map(strip_all)
        .filter(|entry| !entry.is_empty())
}

/// Parse a file list field, routing path tokens into `paths` and name tokens into `names`.
pub fn parse_file_list(value: &str, paths: &mut IndexSet<PathBuf>, names: &mut IndexSet<String>) {
    for entry in value.trim().split(',') {
        match classify(entry) {
            Some(Token::Path(path)) => {
                paths.insert(path);
            }
            Some(Token::Name(name)) => {
                names.insert(name);
            }
            None => {}
        }
    }
}

/// Make `path` absolute against the working directory and collapse `.` and `..`
/// lexically, without touching symlinks.
pub fn absolutize(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `pop` refuses to remove the root, matching "/.." == "/"
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Bare file name of `path`, lossily converted for display and name matching.
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
