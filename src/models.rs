use indexmap::IndexSet;
use std::path::PathBuf;

/// Per-artist policy and state, built from one artist section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleRecord {
    /// Accept every attributed file that is not excluded.
    pub add_all: bool,
    /// Requested file names not yet found.
    pub pending_names: IndexSet<String>,
    pub exclude_names: IndexSet<String>,
    /// Attributed files not otherwise resolved, candidates for random sampling.
    pub random_pool: Vec<PathBuf>,
}

/// A scanned file on its way through the resolution engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf, // absolute
    pub name: String,
}

/// What the resolution engine did with a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Committed to the playlist under the named section.
    Committed { section: String },
    /// Dropped by an artist's exclude list.
    Excluded { artist: String },
    /// Deferred to the named section's random pool.
    Pooled { section: String },
}
