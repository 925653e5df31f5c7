//! Output generation for sitemap files.
//!
//! # Submodules
//!
//! - [`urlset`]: renders one per-source sitemap file (`<urlset>`)
//! - [`indexes`]: renders the sitemap index (`<sitemapindex>`)
//! - [`writer`]: the byte-write primitive and its filesystem implementation
//!
//! # Output Structure
//!
//! ```text
//! dir/
//! ├── sitemap.xml       # Index
//! ├── news.xml          # Source that fit in one file
//! ├── articles-1.xml    # Source split across several files
//! └── articles-2.xml
//! ```

pub mod indexes;
pub mod urlset;
pub mod writer;

use crate::error::SitemapError;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// XML declaration shared by every file we emit.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Namespace of the sitemaps.org 0.9 protocol.
pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Default `<lastmod>` rendering: `YYYY-MM-DD`.
pub const DEFAULT_LASTMOD_FORMAT: &str = "%Y-%m-%d";

/// A validated strftime pattern used to render `<lastmod>` values.
///
/// Timestamps are rendered in UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat(String);

impl DateFormat {
    /// Validate `pattern` as a chrono strftime pattern.
    pub fn new(pattern: &str) -> Result<Self, SitemapError> {
        if pattern.is_empty()
            || StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
        {
            return Err(SitemapError::InvalidDateFormat(pattern.to_string()));
        }
        Ok(Self(pattern.to_string()))
    }

    pub fn pattern(&self) -> &str {
        &self.0
    }

    /// Append the formatted timestamp to `out`.
    pub fn write_to(&self, out: &mut String, at: &DateTime<Utc>) -> std::fmt::Result {
        write!(out, "{}", at.format(&self.0))
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self(DEFAULT_LASTMOD_FORMAT.to_string())
    }
}

/// Write a `<lastmod>` line at `indent` if there is a timestamp after the
/// unix epoch. Zero and earlier are treated as missing.
pub(crate) fn write_lastmod(
    out: &mut String,
    indent: &str,
    lastmod: Option<&DateTime<Utc>>,
    format: &DateFormat,
) -> Result<(), SitemapError> {
    if let Some(at) = lastmod.filter(|t| t.timestamp() > 0) {
        out.push_str(indent);
        out.push_str("<lastmod>");
        format.write_to(out, at)?;
        out.push_str("</lastmod>\n");
    }
    Ok(())
}
