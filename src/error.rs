use std::io;
use std::path::PathBuf;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("invalid download configuration: {0}")]
    Configuration(String),

    #[error("failed to open {} for writing: {source}", .path.display())]
    OpenDestination {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("download of {url} failed: {source}")]
    DownloadFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("download of {url} failed with HTTP {status}")]
    HttpStatus {
        url: String,
        status: StatusCode,
    },

    #[error("failed to write {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = core::result::Result<T, DownloadError>;
