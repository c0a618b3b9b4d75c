use std::path::PathBuf;
use thiserror::Error;

/// Problems with a playlist configuration document.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("can't find output file path in General section")]
    MissingOutputPath,
}

impl ConfigError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        ConfigError::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Tag data for a file could not be read.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("cannot parse metadata for {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },

    #[error("cannot open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Random sampling for one section could not be performed.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SampleError {
    #[error("invalid number of random files {value:?}")]
    InvalidCount { value: String },

    #[error("requested {requested} random files but only {available} are available")]
    PoolTooSmall { requested: usize, available: usize },
}

/// Writing the playlist document failed.
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("failed to create playlist {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write playlist {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
