//! Generator configuration.
//!
//! Settings come from an optional YAML file and are then overridden by CLI
//! flags. The merged result is validated once into an immutable
//! [`GeneratorConfig`] before any source runs.
//!
//! ```yaml
//! base_url: https://example.com
//! dir: ./public
//! index_filename: sitemap.xml
//! lastmod_format: "%Y-%m-%d"
//! max_urls_count: 45000
//! concurrency: 4
//! sources:
//!   - name: articles
//!     path: data/articles.json
//! ```

use crate::cli::Cli;
use crate::error::SitemapError;
use crate::outputs::{DEFAULT_LASTMOD_FORMAT, DateFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Largest URL count the sitemaps.org protocol allows in one file.
pub const PROTOCOL_MAX_URLS: usize = 50_000;

/// Default URLs per file, kept below [`PROTOCOL_MAX_URLS`] to leave headroom.
pub const DEFAULT_MAX_URLS: usize = 45_000;

pub const DEFAULT_INDEX_FILENAME: &str = "sitemap.xml";

pub const DEFAULT_CONCURRENCY: usize = 4;

/// Raw contents of the YAML config file. Every field is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub dir: Option<PathBuf>,
    pub index_filename: String,
    pub lastmod_format: String,
    pub max_urls_count: usize,
    pub concurrency: usize,
    pub sources: Vec<SourceConfig>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            dir: None,
            index_filename: DEFAULT_INDEX_FILENAME.to_string(),
            lastmod_format: DEFAULT_LASTMOD_FORMAT.to_string(),
            max_urls_count: DEFAULT_MAX_URLS,
            concurrency: DEFAULT_CONCURRENCY,
            sources: Vec::new(),
        }
    }
}

/// One file-backed source: its sitemap name and the file holding its URLs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    pub name: String,
    pub path: PathBuf,
}

impl SourceConfig {
    /// Parse a `NAME=PATH` CLI value.
    pub fn parse_cli(raw: &str) -> Result<Self, String> {
        match raw.split_once('=') {
            Some((name, path)) if !name.is_empty() && !path.is_empty() => Ok(Self {
                name: name.to_string(),
                path: PathBuf::from(path),
            }),
            _ => Err(format!("expected NAME=PATH, got `{raw}`")),
        }
    }
}

impl FileConfig {
    /// Load a config file. Relative source paths are resolved against the
    /// file's directory.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn load(path: &Path) -> Result<Self, SitemapError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SitemapError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;
        let mut config = Self::from_yaml(&content)?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        for source in &mut config.sources {
            if source.path.is_relative() {
                source.path = base.join(&source.path);
            }
        }
        if let Some(dir) = config.dir.as_mut() {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
        debug!(sources = config.sources.len(), "Loaded config file");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, SitemapError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply CLI overrides. CLI sources are appended after file sources.
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if let Some(base_url) = &cli.base_url {
            self.base_url = Some(base_url.clone());
        }
        if let Some(dir) = &cli.dir {
            self.dir = Some(dir.clone());
        }
        if let Some(index_filename) = &cli.index_filename {
            self.index_filename = index_filename.clone();
        }
        if let Some(lastmod_format) = &cli.lastmod_format {
            self.lastmod_format = lastmod_format.clone();
        }
        if let Some(max_urls) = cli.max_urls {
            self.max_urls_count = max_urls;
        }
        if let Some(concurrency) = cli.concurrency {
            self.concurrency = concurrency;
        }
        self.sources.extend(cli.sources.iter().cloned());
        self
    }

    /// Validate and split into the generator settings, the output directory
    /// and the sources to run.
    pub fn into_parts(self) -> Result<(GeneratorConfig, PathBuf, Vec<SourceConfig>), SitemapError> {
        let dir = self
            .dir
            .ok_or_else(|| SitemapError::Config("output `dir` is not set".to_string()))?;
        if let Some(source) = self.sources.iter().find(|s| s.name.trim().is_empty()) {
            return Err(SitemapError::Config(format!(
                "source for `{}` has an empty name",
                source.path.display()
            )));
        }
        let generator = GeneratorConfig::new(
            self.base_url.unwrap_or_default(),
            self.index_filename,
            &self.lastmod_format,
            self.max_urls_count,
            self.concurrency,
        )?;
        Ok((generator, dir, self.sources))
    }
}

/// Immutable settings for one generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    base_url: String,
    index_filename: String,
    lastmod_format: DateFormat,
    max_urls_count: usize,
    concurrency: usize,
}

impl GeneratorConfig {
    /// Build and validate a configuration.
    ///
    /// `max_urls_count` of `0` means files are never split.
    pub fn new(
        base_url: impl Into<String>,
        index_filename: impl Into<String>,
        lastmod_format: &str,
        max_urls_count: usize,
        concurrency: usize,
    ) -> Result<Self, SitemapError> {
        let base_url = base_url.into();
        let index_filename = index_filename.into();

        if base_url.trim().is_empty() {
            return Err(SitemapError::Config("`base_url` is not set".to_string()));
        }
        if index_filename.is_empty() || index_filename.contains(['/', '\\']) {
            return Err(SitemapError::Config(format!(
                "`index_filename` must be a plain file name, got `{index_filename}`"
            )));
        }
        if concurrency == 0 {
            return Err(SitemapError::Config(
                "`concurrency` must be at least 1".to_string(),
            ));
        }
        if max_urls_count > PROTOCOL_MAX_URLS {
            tracing::warn!(
                max_urls_count,
                limit = PROTOCOL_MAX_URLS,
                "max_urls_count exceeds the sitemap protocol limit"
            );
        }

        Ok(Self {
            base_url,
            index_filename,
            lastmod_format: DateFormat::new(lastmod_format)?,
            max_urls_count,
            concurrency,
        })
    }

    /// Defaults for everything but the base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, SitemapError> {
        Self::new(
            base_url,
            DEFAULT_INDEX_FILENAME,
            DEFAULT_LASTMOD_FORMAT,
            DEFAULT_MAX_URLS,
            DEFAULT_CONCURRENCY,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn index_filename(&self) -> &str {
        &self.index_filename
    }

    pub fn lastmod_format(&self) -> &DateFormat {
        &self.lastmod_format
    }

    pub fn max_urls_count(&self) -> usize {
        self.max_urls_count
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::with_base_url("https://example.com").unwrap();

        assert_eq!(config.index_filename(), "sitemap.xml");
        assert_eq!(config.lastmod_format().pattern(), "%Y-%m-%d");
        assert_eq!(config.max_urls_count(), 45_000);
        assert_eq!(config.concurrency(), 4);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            GeneratorConfig::with_base_url(""),
            Err(SitemapError::Config(_))
        ));
        assert!(GeneratorConfig::new("https://e.com", "maps/index.xml", "%Y", 10, 1).is_err());
        assert!(GeneratorConfig::new("https://e.com", "sitemap.xml", "%Y", 10, 0).is_err());
        assert!(matches!(
            GeneratorConfig::new("https://e.com", "sitemap.xml", "%Y-%Q", 10, 1),
            Err(SitemapError::InvalidDateFormat(_))
        ));
    }

    #[test]
    fn test_zero_max_urls_is_allowed() {
        let config = GeneratorConfig::new("https://e.com", "sitemap.xml", "%Y", 0, 1).unwrap();
        assert_eq!(config.max_urls_count(), 0);
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
base_url: https://example.com
dir: public
max_urls_count: 2
sources:
  - name: articles
    path: data/articles.json
"#;
        let config = FileConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.base_url.as_deref(), Some("https://example.com"));
        assert_eq!(config.max_urls_count, 2);
        assert_eq!(config.index_filename, "sitemap.xml");
        assert_eq!(config.sources[0].name, "articles");
    }

    #[test]
    fn test_from_yaml_rejects_unknown_fields() {
        assert!(matches!(
            FileConfig::from_yaml("changefreq: daily"),
            Err(SitemapError::ConfigParse(_))
        ));
    }

    #[tokio::test]
    async fn test_load_resolves_relative_paths() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("sitemap.yaml");
        std::fs::write(
            &path,
            "dir: out\nsources:\n  - name: news\n    path: news.txt\n  - name: abs\n    path: /srv/abs.txt\n",
        )
        .unwrap();

        let config = FileConfig::load(&path).await.unwrap();

        assert_eq!(config.dir, Some(tmp.path().join("out")));
        assert_eq!(config.sources[0].path, tmp.path().join("news.txt"));
        assert_eq!(config.sources[1].path, PathBuf::from("/srv/abs.txt"));
    }

    #[test]
    fn test_cli_overrides_file() {
        let cli = Cli::parse_from([
            "sitemap_gen",
            "--base-url",
            "https://cli.example.com",
            "--dir",
            "/tmp/out",
            "--max-urls",
            "0",
            "--source",
            "news=news.txt",
        ]);
        let file = FileConfig::from_yaml("base_url: https://file.example.com\nsources:\n  - name: a\n    path: a.json\n").unwrap();

        let (generator, dir, sources) = file.merge_cli(&cli).into_parts().unwrap();

        assert_eq!(generator.base_url(), "https://cli.example.com");
        assert_eq!(generator.max_urls_count(), 0);
        assert_eq!(dir, PathBuf::from("/tmp/out"));
        let names: Vec<&str> = sources.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "news"]);
    }

    #[test]
    fn test_missing_dir_is_config_error() {
        let file = FileConfig::from_yaml("base_url: https://example.com").unwrap();
        assert!(matches!(file.into_parts(), Err(SitemapError::Config(_))));
    }

    #[test]
    fn test_parse_cli_source() {
        assert_eq!(
            SourceConfig::parse_cli("news=data/news.txt").unwrap(),
            SourceConfig {
                name: "news".to_string(),
                path: PathBuf::from("data/news.txt"),
            }
        );
        assert!(SourceConfig::parse_cli("news").is_err());
        assert!(SourceConfig::parse_cli("=x").is_err());
    }
}
