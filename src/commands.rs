use crate::config::{PlaylistConfig, DIRS_KEY};
use crate::logging::LogState;
use crate::metadata::ArtistLookup;
use crate::playlist::write_playlist;
use crate::report::report_missing;
use crate::rules::ResolutionContext;
use crate::sampler::sample_random;
use crate::scanner::scan_directories;
use anyhow::{Context, Result};
use rand::Rng;
use std::path::{Path, PathBuf};

/// Outcome of one successful configuration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub entries: usize,
    pub random_picks: usize,
    pub missing: usize,
}

/// Build and write the playlist described by one configuration file.
///
/// Rules are built first, then the General `dirs` are scanned, random pools
/// are sampled, never-found requests are reported and the playlist is written.
/// A configuration without `outputPath` is rejected before any scanning.
pub fn generate_playlist<L, R>(
    config_path: &Path,
    lookup: &L,
    rng: &mut R,
    log: &LogState,
) -> Result<RunSummary>
where
    L: ArtistLookup + ?Sized,
    R: Rng + ?Sized,
{
    log.info(&format!("Starting {}", config_path.display()));

    // 1. Read config; no output path means nothing to do
    let config = PlaylistConfig::from_file(config_path)?;
    let output_path = config.output_path()?;

    // 2. Rules, explicit paths and exclusions
    let mut ctx = ResolutionContext::build(&config, log);

    // 3. Scan General dirs
    if let Some(dirs) = config.general().and_then(|general| general.get(DIRS_KEY)) {
        let stats = scan_directories(dirs, &mut ctx, lookup, log);
        log.debug(&format!(
            "scanned {} directories ({} invalid), resolved {} files",
            stats.directories, stats.invalid_directories, stats.resolved_files
        ));
    }

    // 4. Random picks, then report what never turned up
    let random_picks = sample_random(&config, &mut ctx, rng, log);
    let missing = report_missing(&ctx, log);

    // 5. Write
    let entries = write_playlist(&output_path, &ctx.file_paths)
        .with_context(|| format!("Failed to write playlist for {}", config_path.display()))?;

    let summary = RunSummary {
        output_path,
        entries,
        random_picks,
        missing,
    };
    log.info(&format!(
        "Wrote {} entries ({} random, {} missing) to {}",
        summary.entries,
        summary.random_picks,
        summary.missing,
        summary.output_path.display()
    ));
    log.info(&format!("Finished {}", config_path.display()));

    Ok(summary)
}

/// Process configuration files left to right. A failing or invalid file is
/// logged and skipped; the rest still run. Returns the number of files that
/// did not produce a playlist.
pub fn run_configs<L, R>(configs: &[PathBuf], lookup: &L, rng: &mut R, log: &LogState) -> usize
where
    L: ArtistLookup + ?Sized,
    R: Rng + ?Sized,
{
    let mut failures = 0;

    for config_path in configs {
        if !config_path.is_file() {
            log.warn(&format!(
                "skipping invalid config file {}",
                config_path.display()
            ));
            failures += 1;
            continue;
        }

        if let Err(e) = generate_playlist(config_path, lookup, rng, log) {
            log.error(&format!("{}: {:#}", config_path.display(), e));
            failures += 1;
        }
    }

    failures
}
