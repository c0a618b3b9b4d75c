use genplaylist_lib::metadata::{ArtistLookup, TagArtistLookup};
use std::env;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        println!("Usage: list_artists <file_path>...");
        return ExitCode::FAILURE;
    }

    let mut failed = false;
    for path_str in &args {
        let path = Path::new(path_str);
        match TagArtistLookup.artists(path) {
            Ok(artists) if artists.is_empty() => println!("{}: (no artist)", path_str),
            Ok(artists) => println!("{}: {}", path_str, artists.join(" | ")),
            Err(e) => {
                println!("{}: error: {}", path_str, e);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
