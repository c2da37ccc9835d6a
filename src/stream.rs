use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use crate::error::DownloadError;

/// Destination file of a single download. Dropping it closes the handle.
pub struct Stream {
    path: PathBuf,
    file: File,
}

impl Stream {
    /// Creates or truncates `path`. The parent directory must already exist.
    pub async fn new(path: &Path) -> crate::error::Result<Stream> {
        match OpenOptions::new().
            create(true).
            write(true).
            truncate(true).
            open(path).await {
            Ok(file) => {
                Ok(Stream {
                    path: path.to_path_buf(),
                    file,
                })
            }
            Err(e) => {
                Err(DownloadError::OpenDestination { path: path.to_path_buf(), source: e })
            }
        }
    }

    pub async fn write_async(&mut self, buffer: &[u8]) -> crate::error::Result<()> {
        if let Err(e) = self.file.write_all(buffer).await {
            return Err(DownloadError::WriteFailed { path: self.path.clone(), source: e });
        }

        Ok(())
    }

    pub async fn flush_async(&mut self) -> crate::error::Result<()> {
        if let Err(e) = self.file.flush().await {
            return Err(DownloadError::WriteFailed { path: self.path.clone(), source: e });
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::error::DownloadError;
    use crate::stream::Stream;

    #[tokio::test]
    async fn test_stream_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("installer.bin");
        std::fs::write(&path, b"stale contents").unwrap();

        let mut stream = Stream::new(&path).await.unwrap();
        stream.write_async(b"new").await.unwrap();
        stream.flush_async().await.unwrap();
        drop(stream);

        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_stream_requires_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("installer.bin");
        let result = Stream::new(&path).await;
        assert!(matches!(result, Err(DownloadError::OpenDestination { .. })));
        assert!(!path.parent().unwrap().exists());
    }
}
