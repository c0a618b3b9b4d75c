pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod models;
pub mod playlist;
pub mod report;
pub mod resolver;
pub mod rules;
pub mod sampler;
pub mod scanner;
pub mod tokens;

use clap::Parser;
use logging::LogState;
use metadata::TagArtistLookup;
use std::path::PathBuf;
use std::process::ExitCode;

/// Generate XSPF playlists from playlist configuration files.
///
/// Files are processed left to right; a bad file is reported and skipped.
#[derive(Parser, Debug)]
#[command(name = "genplaylist")]
struct Cli {
    /// Playlist configuration files
    #[arg(required = true, value_name = "CONFIG")]
    configs: Vec<PathBuf>,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let log = LogState::from_env();

    let failures = commands::run_configs(
        &cli.configs,
        &TagArtistLookup,
        &mut rand::thread_rng(),
        &log,
    );

    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
