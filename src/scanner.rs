//! Directory scanning: feed every not-yet-settled file of the configured
//! directories to the resolution engine. Only direct entries are visited.

use crate::logging::LogState;
use crate::metadata::ArtistLookup;
use crate::models::Candidate;
use crate::resolver::resolve;
use crate::rules::ResolutionContext;
use crate::tokens::{absolutize, file_name_of, split_field};
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub directories: usize,
    pub invalid_directories: usize,
    pub resolved_files: usize,
}

/// Scan each directory of a comma separated `dirs` field.
///
/// Missing directories are reported and skipped; a directory listed twice is
/// scanned once. Entries are visited in file name order.
pub fn scan_directories<L: ArtistLookup + ?Sized>(
    dirs: &str,
    ctx: &mut ResolutionContext,
    lookup: &L,
    log: &LogState,
) -> ScanStats {
    let mut stats = ScanStats::default();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for directory in split_field(dirs) {
        let path = Path::new(directory);
        if !path.is_dir() {
            log.warn(&format!("invalid directory {}", directory));
            stats.invalid_directories += 1;
            continue;
        }

        let path = absolutize(path);
        if !seen.insert(path.clone()) {
            log.debug(&format!("directory {} already scanned", path.display()));
            continue;
        }

        stats.directories += 1;
        stats.resolved_files += scan_directory(&path, ctx, lookup, log);
    }

    stats
}

fn scan_directory<L: ArtistLookup + ?Sized>(
    dir: &Path,
    ctx: &mut ResolutionContext,
    lookup: &L,
    log: &LogState,
) -> usize {
    let files = match list_files(dir, log) {
        Ok(files) => files,
        Err(e) => {
            log.error(&format!("could not read directory {}: {}", dir.display(), e));
            return 0;
        }
    };

    let mut resolved = 0;
    for path in files {
        let name = file_name_of(&path);
        if ctx.is_settled(&path, &name) {
            log.debug(&format!("skipping {}", path.display()));
            continue;
        }

        let disposition = resolve(ctx, Candidate { path: path.clone(), name }, lookup, log);
        log.debug(&format!("{}: {:?}", path.display(), disposition));
        resolved += 1;
    }
    resolved
}

/// Regular files (symlinks followed) directly inside `dir`, sorted by name.
fn list_files(dir: &Path, log: &LogState) -> io::Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)?.map(|entry| entry.map(|e| dir.join(e.file_name())));
    Ok(regular_files(dir, entries, log))
}

/// Unreadable entries are reported and skipped.
fn regular_files<I>(dir: &Path, entries: I, log: &LogState) -> Vec<PathBuf>
where
    I: IntoIterator<Item = io::Result<PathBuf>>,
{
    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => log.warn(&format!("skipping unreadable entry in {}: {}", dir.display(), e)),
        }
    }
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlaylistConfig;
    use crate::logging::Level;
    use crate::metadata::testing::StaticArtists;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"x").unwrap();
        path
    }

    fn context(text: &str) -> ResolutionContext {
        let config = PlaylistConfig::parse_str(text).unwrap();
        ResolutionContext::build(&config, &LogState::quiet())
    }

    #[test]
    fn missing_directory_is_reported_and_skipped() {
        let music = TempDir::new().unwrap();
        touch(music.path(), "a.mp3");
        let missing = music.path().join("nowhere");

        let mut ctx = context("[General]\ninclude = a.mp3\n");
        let log = LogState::quiet();
        let dirs = format!("{}, {}", missing.display(), music.path().display());
        let stats = scan_directories(&dirs, &mut ctx, &StaticArtists::new(), &log);

        assert_eq!(stats.invalid_directories, 1);
        assert_eq!(stats.directories, 1);
        assert_eq!(ctx.file_paths.len(), 1);
        let warnings = log.messages(Level::Warn);
        assert_eq!(warnings, vec![format!("invalid directory {}", missing.display())]);
    }

    #[test]
    fn subdirectories_are_not_scanned() {
        let music = TempDir::new().unwrap();
        let nested = music.path().join("nested");
        fs::create_dir(&nested).unwrap();
        touch(&nested, "deep.mp3");
        touch(music.path(), "top.mp3");

        let mut ctx = context("[X]\n");
        let lookup = StaticArtists::new()
            .with("deep.mp3", &["X"])
            .with("top.mp3", &["X"]);
        let stats = scan_directories(
            &music.path().display().to_string(),
            &mut ctx,
            &lookup,
            &LogState::quiet(),
        );

        assert_eq!(stats.resolved_files, 1);
        let names: Vec<_> = ctx.file_paths.iter().map(|p| file_name_of(p)).collect();
        assert_eq!(names, vec!["top.mp3"]);
    }

    #[test]
    fn general_exclude_names_beat_artist_rules() {
        let music = TempDir::new().unwrap();
        touch(music.path(), "skip.mp3");
        touch(music.path(), "keep.mp3");

        let mut ctx = context("[General]\nexclude = skip.mp3\n[X]\n");
        let lookup = StaticArtists::new()
            .with("skip.mp3", &["X"])
            .with("keep.mp3", &["X"]);
        let stats = scan_directories(
            &format!("'{}'", music.path().display()),
            &mut ctx,
            &lookup,
            &LogState::quiet(),
        );

        assert_eq!(stats.resolved_files, 1);
        assert_eq!(ctx.file_paths.len(), 1);
        assert!(ctx.file_paths.contains(&music.path().join("keep.mp3")));
    }

    #[test]
    fn excluded_and_committed_paths_are_not_resolved_again() {
        let music = TempDir::new().unwrap();
        let listed = touch(music.path(), "listed.mp3");
        let banned = touch(music.path(), "banned.mp3");

        let mut ctx = context(&format!(
            "[General]\ninclude = {}\nexclude = {}\n",
            listed.display(),
            banned.display()
        ));
        let stats = scan_directories(
            &music.path().display().to_string(),
            &mut ctx,
            &StaticArtists::new(),
            &LogState::quiet(),
        );

        assert_eq!(stats.resolved_files, 0);
        assert!(ctx.random_general.is_empty());
        assert_eq!(ctx.file_paths.len(), 1);
    }

    #[test]
    fn unreadable_entry_keeps_the_rest_of_the_listing() {
        let music = TempDir::new().unwrap();
        let b = touch(music.path(), "b.mp3");
        let a = touch(music.path(), "a.mp3");
        let log = LogState::quiet();

        let entries = vec![
            Ok(b.clone()),
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
            Ok(music.path().join("vanished.mp3")),
            Ok(a.clone()),
        ];
        let files = regular_files(music.path(), entries, &log);

        assert_eq!(files, vec![a, b]);
        assert_eq!(
            log.messages(Level::Warn),
            vec![format!("skipping unreadable entry in {}: denied", music.path().display())]
        );
    }

    #[test]
    fn duplicate_directories_are_scanned_once() {
        let music = TempDir::new().unwrap();
        touch(music.path(), "b.mp3");
        touch(music.path(), "a.mp3");

        let mut ctx = context("[General]\n");
        let dir = music.path().display().to_string();
        let stats = scan_directories(
            &format!("{dir},{dir}/."),
            &mut ctx,
            &StaticArtists::new(),
            &LogState::quiet(),
        );

        assert_eq!(stats.directories, 1);
        let pool: Vec<_> = ctx.random_general.iter().map(|p| file_name_of(p)).collect();
        assert_eq!(pool, vec!["a.mp3", "b.mp3"]);
    }
}
