//! Error types for sitemap generation.
//!
//! An empty source is not an error: it simply produces no file and no index
//! entry. Everything else that can go wrong during a run is a [`SitemapError`].

use std::io;
use std::path::PathBuf;

/// Error raised while configuring or running a sitemap generation.
#[derive(Debug, thiserror::Error)]
pub enum SitemapError {
    /// A source could not produce its URL list.
    #[error("source `{name}` failed: {reason}")]
    Source {
        /// Name of the failing source.
        name: String,
        /// Human-readable cause.
        reason: String,
    },

    /// Writing a per-source sitemap file failed.
    #[error("failed to write sitemap file `{filename}`")]
    Write {
        filename: String,
        #[source]
        source: io::Error,
    },

    /// Writing the sitemap index failed.
    #[error("failed to write sitemap index `{filename}`")]
    IndexWrite {
        filename: String,
        #[source]
        source: io::Error,
    },

    /// The `lastmod` format string is not a valid strftime pattern.
    #[error("invalid lastmod format `{0}`")]
    InvalidDateFormat(String),

    /// A configuration value is missing or out of range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The configuration file could not be read.
    #[error("failed to read config file `{}`", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid YAML for [`crate::config::FileConfig`].
    #[error("failed to parse config file")]
    ConfigParse(#[from] serde_yaml::Error),

    /// Formatting XML into the output buffer failed.
    #[error("failed to render XML")]
    Render(#[from] std::fmt::Error),
}

impl SitemapError {
    /// Build a [`SitemapError::Source`] from any displayable cause.
    pub fn source_failed(name: &str, reason: impl std::fmt::Display) -> Self {
        Self::Source {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}
