use std::path::{Path, PathBuf};
use crate::error::DownloadError;

/// Chrome-like agent; some SDK mirrors reject obvious non-browser clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub const DEFAULT_MIN_CHUNK_SIZE: u64 = 1024 * 1024;

pub const DEFAULT_PROGRESS_UPDATES: u64 = 1000;

#[derive(Debug, Clone)]
pub struct DownloadConfiguration {
    pub url: String,
    pub path: PathBuf,
    pub user_agent: String,
    pub min_chunk_size: u64,
    pub progress_updates: u64,
}

pub struct DownloadConfigurationBuilder {
    url: Option<String>,
    path: Option<PathBuf>,
    user_agent: String,
    min_chunk_size: u64,
    progress_updates: u64,
}

impl DownloadConfigurationBuilder {
    pub fn set_url(mut self, url: impl Into<String>) -> DownloadConfigurationBuilder {
        self.url = Some(url.into());
        self
    }

    pub fn set_file_path(mut self, path: impl AsRef<Path>) -> DownloadConfigurationBuilder {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn set_user_agent(mut self, user_agent: impl Into<String>) -> DownloadConfigurationBuilder {
        self.user_agent = user_agent.into();
        self
    }

    /// Lower bound for the size of each progress chunk.
    pub fn set_min_chunk_size(mut self, min_chunk_size: u64) -> DownloadConfigurationBuilder {
        self.min_chunk_size = min_chunk_size;
        self
    }

    /// Approximate number of progress redraws for a known-length body.
    pub fn set_progress_updates(mut self, progress_updates: u64) -> DownloadConfigurationBuilder {
        self.progress_updates = progress_updates;
        self
    }

    pub fn build(self) -> crate::error::Result<DownloadConfiguration> {
        let url = match self.url {
            Some(url) if !url.trim().is_empty() => url,
            _ => return Err(DownloadError::Configuration("download url is not set".to_string())),
        };

        let path = match self.path {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => return Err(DownloadError::Configuration("download path is not set".to_string())),
        };

        if self.min_chunk_size == 0 {
            return Err(DownloadError::Configuration("minimum chunk size must be positive".to_string()));
        }

        if self.progress_updates == 0 {
            return Err(DownloadError::Configuration("progress update count must be positive".to_string()));
        }

        Ok(DownloadConfiguration {
            url,
            path,
            user_agent: self.user_agent,
            min_chunk_size: self.min_chunk_size,
            progress_updates: self.progress_updates,
        })
    }
}

impl DownloadConfiguration {
    pub fn new() -> DownloadConfigurationBuilder {
        DownloadConfigurationBuilder {
            url: None,
            path: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            min_chunk_size: DEFAULT_MIN_CHUNK_SIZE,
            progress_updates: DEFAULT_PROGRESS_UPDATES,
        }
    }

    /// Size of each progress chunk: roughly `progress_updates` redraws,
    /// but never below `min_chunk_size`.
    pub fn chunk_size(&self, total_length: u64) -> u64 {
        (total_length / self.progress_updates).max(self.min_chunk_size)
    }
}
