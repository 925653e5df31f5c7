//! URL sources feeding the generator.
//!
//! Each source produces the URLs of one logical sitemap. Its name becomes the
//! file stem: `<name>.xml`, or `<name>-<n>.xml` when the list is split.
//!
//! | Source | Module | Notes |
//! |--------|--------|-------|
//! | In-memory list | [`StaticSource`] | For embedding callers and tests |
//! | JSON / YAML / text file | [`file::FileSource`] | Format chosen by extension |
//!
//! Names are used as-is. They must not contain path separators; that is the
//! caller's responsibility and is not checked here.

pub mod file;

use crate::error::SitemapError;
use crate::models::UrlEntry;
use async_trait::async_trait;

pub use file::FileSource;

/// A named provider of URL entries for one sitemap.
///
/// An empty list is valid and means the source contributes no file and no
/// index entry. An `Err` fails only this source; other sources still run.
#[async_trait]
pub trait SitemapSource: Send + Sync {
    /// Stable identifier used to derive output file names.
    fn name(&self) -> &str;

    /// The URLs of this sitemap, in any order.
    async fn urls(&self) -> Result<Vec<UrlEntry>, SitemapError>;
}

/// A source backed by an in-memory list.
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    urls: Vec<UrlEntry>,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, urls: Vec<UrlEntry>) -> Self {
        Self {
            name: name.into(),
            urls,
        }
    }
}

#[async_trait]
impl SitemapSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn urls(&self) -> Result<Vec<UrlEntry>, SitemapError> {
        Ok(self.urls.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_source_returns_its_urls() {
        let source = StaticSource::new(
            "pages",
            vec![
                UrlEntry::new("https://example.com/", None),
                UrlEntry::new("https://example.com/", None),
            ],
        );

        assert_eq!(source.name(), "pages");
        let urls = source.urls().await.unwrap();
        assert_eq!(urls.len(), 2, "duplicates are kept");
    }

    #[tokio::test]
    async fn test_sources_are_object_safe() {
        let sources: Vec<Box<dyn SitemapSource>> = vec![
            Box::new(StaticSource::new("a", vec![])),
            Box::new(StaticSource::new("b", vec![])),
        ];
        let names: Vec<&str> = sources.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
