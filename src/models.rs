//! Data models for sitemap generation.
//!
//! - [`UrlEntry`]: one URL supplied by a source, with an optional last
//!   modification time
//! - [`SitemapFile`]: one emitted sitemap file, as listed in the index
//!
//! Both are transient: they live for one generation run and their only lasting
//! effect is the XML written to disk.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

/// Anything carrying an optional last-modification time.
///
/// Used by [`crate::utils::sort_by_lastmod`], which orders both URL entries
/// and sitemap files the same way.
pub trait Lastmod {
    fn lastmod(&self) -> Option<DateTime<Utc>>;

    /// Unix seconds of [`Lastmod::lastmod`], or `0` when there is none.
    fn effective_timestamp(&self) -> i64 {
        self.lastmod().map_or(0, |t| t.timestamp())
    }

    /// The timestamp to publish as `<lastmod>`.
    ///
    /// Only timestamps after the unix epoch count. Zero and earlier are
    /// treated like a missing value.
    fn published_lastmod(&self) -> Option<DateTime<Utc>> {
        self.lastmod().filter(|t| t.timestamp() > 0)
    }
}

/// A single URL supplied by a sitemap source.
///
/// `url` is written verbatim (escaped) into `<loc>` and is expected to be
/// absolute already. Duplicates are not removed.
///
/// # JSON / YAML shape
///
/// ```json
/// { "url": "https://example.com/a", "lastmod": "2025-05-06T10:00:00Z" }
/// ```
///
/// `lastmod` is optional and may be an RFC 3339 timestamp, a `YYYY-MM-DD`
/// date (midnight UTC) or a unix timestamp in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UrlEntry {
    pub url: String,
    #[serde(default, deserialize_with = "deserialize_lastmod")]
    pub lastmod: Option<DateTime<Utc>>,
}

impl UrlEntry {
    pub fn new(url: impl Into<String>, lastmod: Option<DateTime<Utc>>) -> Self {
        Self {
            url: url.into(),
            lastmod,
        }
    }
}

impl Lastmod for UrlEntry {
    fn lastmod(&self) -> Option<DateTime<Utc>> {
        self.lastmod
    }
}

/// A sitemap file written during a run.
///
/// `lastmod` is the most recent published `lastmod` among the URLs in the
/// file, or `None` when none of them carried one after the unix epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapFile {
    /// File name relative to the output directory, e.g. `articles-2.xml`.
    pub location: String,
    pub lastmod: Option<DateTime<Utc>>,
}

impl Lastmod for SitemapFile {
    fn lastmod(&self) -> Option<DateTime<Utc>> {
        self.lastmod
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLastmod {
    Seconds(i64),
    Text(String),
}

fn deserialize_lastmod<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawLastmod>::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(RawLastmod::Seconds(secs)) => DateTime::from_timestamp(secs, 0)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {secs}"))),
        Some(RawLastmod::Text(text)) => parse_lastmod(&text)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognized lastmod: {text}"))),
    }
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
pub fn parse_lastmod(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
