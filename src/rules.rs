//! Rule table and per-run resolution state.
//!
//! [`ResolutionContext::build`] reads every section once: artist sections become
//! [`RuleRecord`]s, and include/exclude tokens that name existing files are
//! committed or excluded right away. The context is then threaded by `&mut`
//! through scanning, resolution and sampling, and dropped with the run.

use crate::config::{PlaylistConfig, Section, EXCLUDE_KEY, INCLUDE_KEY, RANDOM_KEY};
use crate::logging::LogState;
use crate::models::RuleRecord;
use crate::tokens::parse_file_list;
use indexmap::{IndexMap, IndexSet};
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct ResolutionContext {
    /// Paths committed to the playlist, in commit order.
    pub file_paths: IndexSet<PathBuf>,
    /// Paths that must never be committed.
    pub exclude_paths: IndexSet<PathBuf>,
    /// General include names still waiting for a match.
    pub file_names: IndexSet<String>,
    /// General exclude names; applied to every scanned file.
    pub exclude_names: IndexSet<String>,
    /// Unresolved files not governed by any artist rule.
    pub random_general: Vec<PathBuf>,
    /// Artist rules keyed by section name, in file order.
    pub rules: IndexMap<String, RuleRecord>,
}

impl ResolutionContext {
    pub fn build(config: &PlaylistConfig, log: &LogState) -> Self {
        let mut ctx = ResolutionContext::default();

        for (artist, section) in config.artist_sections() {
            let mut record = RuleRecord::default();
            ctx.read_file_lists(section, &mut record.pending_names, &mut record.exclude_names);
            record.add_all = accepts_everything(section);

            log.debug(&format!(
                "rule for {}: add_all={} include={:?} exclude={:?}",
                artist, record.add_all, record.pending_names, record.exclude_names
            ));
            ctx.rules.insert(artist.to_string(), record);
        }

        if let Some(general) = config.general() {
            let mut file_names = IndexSet::new();
            let mut exclude_names = IndexSet::new();
            ctx.read_file_lists(general, &mut file_names, &mut exclude_names);
            ctx.file_names = file_names;
            ctx.exclude_names = exclude_names;
        }

        // An excluded path stays out even when another section includes it
        let exclude_paths = &ctx.exclude_paths;
        ctx.file_paths.retain(|path| !exclude_paths.contains(path));

        ctx
    }

    fn read_file_lists(
        &mut self,
        section: &Section,
        include_names: &mut IndexSet<String>,
        exclude_names: &mut IndexSet<String>,
    ) {
        if let Some(include) = section.get(INCLUDE_KEY) {
            parse_file_list(include, &mut self.file_paths, include_names);
        }
        if let Some(exclude) = section.get(EXCLUDE_KEY) {
            parse_file_list(exclude, &mut self.exclude_paths, exclude_names);
        }
    }

    /// Add `path` to the playlist. Excluded paths are refused.
    pub fn commit(&mut self, path: PathBuf) -> bool {
        if self.exclude_paths.contains(&path) {
            return false;
        }
        self.file_paths.insert(path)
    }

    /// True when a scanned file must be skipped before any rule is consulted.
    pub fn is_settled(&self, path: &Path, name: &str) -> bool {
        self.file_paths.contains(path)
            || self.exclude_paths.contains(path)
            || self.exclude_names.contains(name)
    }
}

/// An artist section with neither include entries nor a random count takes
/// every attributed file.
fn accepts_everything(section: &Section) -> bool {
    let include_empty = section
        .get(INCLUDE_KEY)
        .map_or(true, |value| value.trim().is_empty());
    include_empty && !section.contains_key(RANDOM_KEY)
}
