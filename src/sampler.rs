//! Random sampling from the per-section pools.
//!
//! A section asking for `random = k` gets `k` distinct files drawn uniformly
//! from its pool. A malformed count, or a count larger than the pool, skips
//! that section entirely: nothing is drawn and an error is logged.

use crate::config::{PlaylistConfig, Section, GENERAL_SECTION, RANDOM_KEY};
use crate::error::SampleError;
use crate::logging::LogState;
use crate::rules::ResolutionContext;
use rand::seq::SliceRandom;
use rand::Rng;
use std::path::PathBuf;

pub fn parse_count(value: &str) -> Result<usize, SampleError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| SampleError::InvalidCount {
            value: value.to_string(),
        })
}

/// Draw `count` distinct entries of `pool` without replacement.
pub fn draw<R: Rng + ?Sized>(
    pool: &[PathBuf],
    count: usize,
    rng: &mut R,
) -> Result<Vec<PathBuf>, SampleError> {
    if count > pool.len() {
        return Err(SampleError::PoolTooSmall {
            requested: count,
            available: pool.len(),
        });
    }
    Ok(pool.choose_multiple(rng, count).cloned().collect())
}

/// Sample every artist section that declares a random count, then General.
/// Returns the number of files added.
pub fn sample_random<R: Rng + ?Sized>(
    config: &PlaylistConfig,
    ctx: &mut ResolutionContext,
    rng: &mut R,
    log: &LogState,
) -> usize {
    let mut added = 0;

    for (artist, section) in config.artist_sections() {
        let Some(count) = requested_count(artist, section, log) else {
            continue;
        };
        let Some(record) = ctx.rules.get(artist) else {
            continue;
        };
        let picks = draw(&record.random_pool, count, rng);
        added += commit_picks(artist, picks, ctx, log);
    }

    if let Some(general) = config.general() {
        if let Some(count) = requested_count(GENERAL_SECTION, general, log) {
            let picks = draw(&ctx.random_general, count, rng);
            added += commit_picks(GENERAL_SECTION, picks, ctx, log);
        }
    }

    added
}

fn requested_count(name: &str, section: &Section, log: &LogState) -> Option<usize> {
    let value = section.get(RANDOM_KEY)?;
    match parse_count(value) {
        Ok(count) => Some(count),
        Err(e) => {
            log.error(&format!("{} for {}", e, name));
            None
        }
    }
}

fn commit_picks(
    name: &str,
    picks: Result<Vec<PathBuf>, SampleError>,
    ctx: &mut ResolutionContext,
    log: &LogState,
) -> usize {
    let picks = match picks {
        Ok(picks) => picks,
        Err(e) => {
            log.error(&format!("{} for {}", e, name));
            return 0;
        }
    };

    let mut added = 0;
    for path in picks {
        log.info(&format!("Adding random {}", path.display()));
        if ctx.commit(path) {
            added += 1;
        }
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Level;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{HashMap, HashSet};

    fn pool(n: usize) -> Vec<PathBuf> {
        (0..n)
            .map(|i| PathBuf::from(format!("/music/{i}.mp3")))
            .collect()
    }

    fn context_with_pool(text: &str, artist: &str, n: usize) -> (PlaylistConfig, ResolutionContext) {
        let config = PlaylistConfig::parse_str(text).unwrap();
        let mut ctx = ResolutionContext::build(&config, &LogState::quiet());
        ctx.rules.get_mut(artist).unwrap().random_pool = pool(n);
        (config, ctx)
    }

    #[test]
    fn parses_non_negative_counts_only() {
        assert_eq!(parse_count(" 3 "), Ok(3));
        assert_eq!(parse_count("0"), Ok(0));
        assert!(parse_count("-1").is_err());
        assert!(parse_count("two").is_err());
        assert!(parse_count("").is_err());
    }

    #[test]
    fn draws_distinct_members_of_the_pool() {
        let pool = pool(5);
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picks = draw(&pool, 2, &mut rng).unwrap();
            let unique: HashSet<_> = picks.iter().collect();
            assert_eq!(unique.len(), 2);
            assert!(picks.iter().all(|p| pool.contains(p)));
        }
    }

    #[test]
    fn draws_are_roughly_uniform() {
        let pool = pool(5);
        let mut rng = StdRng::seed_from_u64(7);
        let mut counts: HashMap<PathBuf, usize> = HashMap::new();
        for _ in 0..2000 {
            for pick in draw(&pool, 1, &mut rng).unwrap() {
                *counts.entry(pick).or_default() += 1;
            }
        }
        assert_eq!(counts.len(), 5);
        assert!(counts.values().all(|&n| (300..=500).contains(&n)), "{counts:?}");
    }

    #[test]
    fn oversized_requests_are_refused() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            draw(&pool(1), 2, &mut rng),
            Err(SampleError::PoolTooSmall {
                requested: 2,
                available: 1
            })
        );
        assert_eq!(draw(&pool(2), 2, &mut rng).unwrap().len(), 2);
    }

    #[test]
    fn artist_random_commits_exactly_k() {
        let (config, mut ctx) = context_with_pool("[X]\nrandom = 2\n", "X", 5);
        let log = LogState::quiet();
        let mut rng = StdRng::seed_from_u64(42);

        assert_eq!(sample_random(&config, &mut ctx, &mut rng, &log), 2);
        assert_eq!(ctx.file_paths.len(), 2);
        assert_eq!(log.messages(Level::Info).len(), 2);
    }

    #[test]
    fn pool_too_small_adds_nothing_for_that_artist_only() {
        let text = "[X]\nrandom = 2\n[Y]\nrandom = 1\n";
        let (config, mut ctx) = context_with_pool(text, "X", 1);
        ctx.rules.get_mut("Y").unwrap().random_pool = vec![PathBuf::from("/y/1.mp3")];
        let log = LogState::quiet();

        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            sample_random(&config, &mut ctx, &mut rng, &log);
            assert_eq!(ctx.file_paths.iter().collect::<Vec<_>>(), vec![&PathBuf::from("/y/1.mp3")]);
        }

        let errors = log.messages(Level::Error);
        assert!(errors[0].contains("requested 2 random files but only 1 are available for X"));
    }

    #[test]
    fn invalid_count_skips_sampling() {
        let (config, mut ctx) = context_with_pool("[X]\nrandom = lots\n", "X", 5);
        let log = LogState::quiet();
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(sample_random(&config, &mut ctx, &mut rng, &log), 0);
        assert!(ctx.file_paths.is_empty());
        assert_eq!(
            log.messages(Level::Error),
            vec!["invalid number of random files \"lots\" for X"]
        );
    }

    #[test]
    fn general_random_samples_the_general_pool() {
        let config = PlaylistConfig::parse_str("[General]\nrandom = 3\n").unwrap();
        let mut ctx = ResolutionContext::build(&config, &LogState::quiet());
        ctx.random_general = pool(4);
        let mut rng = StdRng::seed_from_u64(9);

        let added = sample_random(&config, &mut ctx, &mut rng, &LogState::quiet());
        assert_eq!(added, 3);
        assert!(ctx.file_paths.iter().all(|p| ctx.random_general.contains(p)));
    }

    #[test]
    fn general_pool_is_left_alone_without_a_random_key() {
        let config = PlaylistConfig::parse_str("[General]\ndirs = /music\n").unwrap();
        let mut ctx = ResolutionContext::build(&config, &LogState::quiet());
        ctx.random_general = pool(4);
        let mut rng = StdRng::seed_from_u64(9);

        assert_eq!(sample_random(&config, &mut ctx, &mut rng, &LogState::quiet()), 0);
        assert!(ctx.file_paths.is_empty());
    }
}
