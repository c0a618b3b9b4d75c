use crate::error::MetadataError;
use lofty::config::ParseOptions;
use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::tag::ItemKey;
use std::path::Path;

/// Separator between contributing artists inside one artist tag value.
const ARTIST_SEPARATOR: char = '/';

/// Source of contributing-artist names for a media file.
pub trait ArtistLookup {
    /// Artist names in tag order. A file without an artist tag yields an empty list.
    fn artists(&self, path: &Path) -> Result<Vec<String>, MetadataError>;
}

/// Reads artists from the file's embedded tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagArtistLookup;

impl ArtistLookup for TagArtistLookup {
    fn artists(&self, path: &Path) -> Result<Vec<String>, MetadataError> {
        read_artists(path)
    }
}

/// Reads the artist values of the primary tag (or first tag) of a file
pub fn read_artists<P: AsRef<Path>>(path: P) -> Result<Vec<String>, MetadataError> {
    let path = path.as_ref();
    let unreadable = |source| MetadataError::Unreadable {
        path: path.to_path_buf(),
        source,
    };
    let io_error = |source| MetadataError::Io {
        path: path.to_path_buf(),
        source,
    };

    // Audio properties are never needed here
    let tagged_file = Probe::open(path)
        .map_err(unreadable)?
        .options(ParseOptions::new().read_properties(false))
        .guess_file_type()
        .map_err(io_error)?
        .read()
        .map_err(unreadable)?;

    let Some(tag) = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag())
    else {
        return Ok(Vec::new());
    };

    Ok(split_artists(tag.get_strings(&ItemKey::TrackArtist)))
}

/// Split raw artist values on `/`, dropping blank fragments.
pub fn split_artists<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .flat_map(|value| value.split(ARTIST_SEPARATOR))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
