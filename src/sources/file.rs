//! File-backed URL source.
//!
//! The format is chosen by extension:
//!
//! - `.json`: an array of [`UrlEntry`] objects
//! - `.yaml` / `.yml`: a sequence of [`UrlEntry`] mappings
//! - anything else: plain text, one URL per line, optionally followed by
//!   whitespace and an RFC 3339 timestamp or `YYYY-MM-DD` date
//!
//! ```text
//! # blank lines and comments are ignored
//! https://example.com/news/1 2025-05-06
//! https://example.com/news/2 2025-05-06T10:15:00Z
//! https://example.com/about
//! ```

use super::SitemapSource;
use crate::error::SitemapError;
use crate::models::{UrlEntry, parse_lastmod};
use crate::utils::truncate_for_log;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument};

/// Reads URL entries from a file each time [`SitemapSource::urls`] is called.
#[derive(Debug, Clone)]
pub struct FileSource {
    name: String,
    path: PathBuf,
}

impl FileSource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SitemapSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(level = "info", skip_all, fields(source = %self.name, path = %self.path.display()))]
    async fn urls(&self) -> Result<Vec<UrlEntry>, SitemapError> {
        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| SitemapError::source_failed(&self.name, e))?;

        let extension = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let entries = match extension.as_deref() {
            Some("json") => serde_json::from_str::<Vec<UrlEntry>>(&content)
                .map_err(|e| SitemapError::source_failed(&self.name, e))?,
            Some("yaml" | "yml") => parse_yaml(&content)
                .map_err(|e| SitemapError::source_failed(&self.name, e))?,
            _ => parse_lines(&content).map_err(|e| SitemapError::source_failed(&self.name, e))?,
        };

        info!(count = entries.len(), "Loaded URLs");
        Ok(entries)
    }
}

fn parse_yaml(content: &str) -> Result<Vec<UrlEntry>, serde_yaml::Error> {
    // An empty document deserializes as null, not as an empty sequence.
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yaml::from_str(content)
}

/// Parse the plain-text format. Errors name the offending line.
fn parse_lines(content: &str) -> Result<Vec<UrlEntry>, String> {
    let mut entries = Vec::new();

    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        let Some(url) = parts.next() else { continue };
        let lastmod = match parts.next() {
            Some(raw) => Some(parse_lastmod(raw).ok_or_else(|| {
                format!(
                    "line {}: unrecognized lastmod `{}`",
                    number + 1,
                    truncate_for_log(raw, 40)
                )
            })?),
            None => None,
        };
        if parts.next().is_some() {
            return Err(format!(
                "line {}: expected `<url> [lastmod]`, got `{}`",
                number + 1,
                truncate_for_log(line, 80)
            ));
        }

        debug!(%url, ?lastmod, "Parsed line");
        entries.push(UrlEntry::new(url, lastmod));
    }

    Ok(entries)
}
