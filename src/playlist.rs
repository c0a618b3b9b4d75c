//! XSPF playlist output.

use crate::error::WriteError;
use crate::tokens::file_name_of;
use quick_xml::escape::escape;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

const PLAYLIST_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<playlist version=\"1\" xmlns=\"http://xspf.org/ns/0/\">\n\t<trackList>\n";
const PLAYLIST_FOOTER: &str = "\t</trackList>\n</playlist>";
const LOCATION_PREFIX: &str = "file:///";

/// One `<track>` line for an absolute path, title being its base name.
pub fn render_entry(path: &Path) -> String {
    let location = format!("{}{}", LOCATION_PREFIX, path.to_string_lossy());
    let title = file_name_of(path);
    format!(
        "\t\t<track><location>{}</location><title>{}</title></track>\n",
        escape(location.as_str()),
        escape(title.as_str())
    )
}

/// Write a complete playlist document to `writer`. Stops at the first failed write.
pub fn write_to<'a, W, I>(writer: &mut W, paths: I) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a PathBuf>,
{
    writer.write_all(PLAYLIST_HEADER.as_bytes())?;
    let mut written = 0;
    for path in paths {
        writer.write_all(render_entry(path).as_bytes())?;
        written += 1;
    }
    writer.write_all(PLAYLIST_FOOTER.as_bytes())?;
    Ok(written)
}

/// Create (or truncate) `output` and write the playlist into it.
///
/// The file is flushed and closed even when an entry fails to write; whatever
/// was written up to that point stays on disk.
pub fn write_playlist<'a, I>(output: &Path, paths: I) -> Result<usize, WriteError>
where
    I: IntoIterator<Item = &'a PathBuf>,
{
    let file = File::create(output).map_err(|source| WriteError::Create {
        path: output.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    let written = write_to(&mut writer, paths);
    let flushed = writer.flush();
    drop(writer);

    let to_error = |source| WriteError::Write {
        path: output.to_path_buf(),
        source,
    };
    let written = written.map_err(to_error)?;
    flushed.map_err(to_error)?;
    Ok(written)
}
