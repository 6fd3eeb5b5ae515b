use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Every way a generator run can fail. None of these are recoverable: the
/// driver stops at the first one and the process exits non-zero.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read directory tree under {path}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("scan root {path} is not a directory")]
    NotADirectory { path: PathBuf },

    #[error("failed to stat {path}")]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read config file {path}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {path}")]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid ignore pattern `{pattern}`")]
    IgnorePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
