//! Per-file resolution: decide whether a scanned file is committed, excluded
//! or deferred to a random pool.

use crate::config::GENERAL_SECTION;
use crate::logging::LogState;
use crate::metadata::ArtistLookup;
use crate::models::{Candidate, Disposition};
use crate::rules::ResolutionContext;

/// Resolve one scanned file that is not yet committed or excluded.
///
/// The first artist (in tag order) that has a rule governs the file; later
/// artists are not consulted. Files without a governing artist fall under the
/// General section. An unreadable tag counts as "no artists".
pub fn resolve<L: ArtistLookup + ?Sized>(
    ctx: &mut ResolutionContext,
    candidate: Candidate,
    lookup: &L,
    log: &LogState,
) -> Disposition {
    let artists = match lookup.artists(&candidate.path) {
        Ok(artists) => artists,
        Err(e) => {
            log.warn(&format!(
                "could not get artist for {}: {}",
                candidate.path.display(),
                e
            ));
            Vec::new()
        }
    };

    let governing = artists
        .into_iter()
        .find(|artist| ctx.rules.contains_key(artist.as_str()));

    match governing {
        Some(artist) => apply_artist_rule(ctx, artist, candidate),
        None => apply_general_rule(ctx, candidate),
    }
}

fn apply_artist_rule(
    ctx: &mut ResolutionContext,
    artist: String,
    candidate: Candidate,
) -> Disposition {
    let Some(record) = ctx.rules.get_mut(&artist) else {
        return apply_general_rule(ctx, candidate);
    };

    if record.exclude_names.contains(&candidate.name) {
        return Disposition::Excluded { artist };
    }

    // Removing the name marks the request as fulfilled
    let requested = record.pending_names.shift_remove(&candidate.name);
    if !(record.add_all || requested) {
        record.random_pool.push(candidate.path);
        return Disposition::Pooled { section: artist };
    }

    ctx.commit(candidate.path);
    Disposition::Committed { section: artist }
}

fn apply_general_rule(ctx: &mut ResolutionContext, candidate: Candidate) -> Disposition {
    if ctx.file_names.shift_remove(&candidate.name) {
        ctx.commit(candidate.path);
        return Disposition::Committed {
            section: GENERAL_SECTION.to_string(),
        };
    }

    ctx.random_general.push(candidate.path);
    Disposition::Pooled {
        section: GENERAL_SECTION.to_string(),
    }
}
