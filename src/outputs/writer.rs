//! Byte-write primitive for sitemap output.
//!
//! The generator never touches the filesystem directly. It hands finished
//! documents to a [`SitemapWriter`], which decides where the bytes go.
//! [`FsWriter`] is the production implementation.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument};

/// Destination for rendered sitemap files.
#[async_trait]
pub trait SitemapWriter: Send + Sync {
    /// Write `data` under `filename`, replacing any previous content.
    async fn write(&self, filename: &str, data: &[u8]) -> io::Result<()>;
}

/// Writes sitemap files into a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsWriter {
    dir: PathBuf,
}

impl FsWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Ensure the output directory exists and is writable.
    ///
    /// Creates the directory if needed, then writes and removes an empty check file
    /// so permission problems surface before any sitemap is generated.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the directory exists and accepts writes.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The directory cannot be created
    /// - The directory is not writable (permission denied, read-only filesystem, etc.)
    #[instrument(level = "info", skip_all, fields(dir = %self.dir.display()))]
    pub async fn ensure_writable(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir).await?;
        let check_path = self.dir.join("..__write_check__");
        fs::write(&check_path, b"").await?;
        let _ = fs::remove_file(&check_path).await;
        info!("Output directory is writable");
        Ok(())
    }
}

#[async_trait]
impl SitemapWriter for FsWriter {
    async fn write(&self, filename: &str, data: &[u8]) -> io::Result<()> {
        let path = self.dir.join(filename);
        fs::write(&path, data).await?;
        debug!(path = %path.display(), bytes = data.len(), "Wrote file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fs_writer_writes_into_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let writer = FsWriter::new(tmp.path());

        writer.write("news.xml", b"<urlset/>").await.unwrap();

        let written = std::fs::read_to_string(tmp.path().join("news.xml")).unwrap();
        assert_eq!(written, "<urlset/>");
    }

    #[tokio::test]
    async fn test_fs_writer_fails_for_missing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let writer = FsWriter::new(tmp.path().join("missing"));

        let err = writer.write("news.xml", b"x").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_ensure_writable_creates_dir_and_cleans_up() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("public").join("maps");
        let writer = FsWriter::new(&dir);

        writer.ensure_writable().await.unwrap();

        assert!(dir.is_dir());
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
    }
}
