//! # Sitemap Gen
//!
//! Generates [sitemaps.org](https://www.sitemaps.org/protocol.html) sitemap
//! files from pluggable URL sources and a sitemap index referencing them.
//!
//! ```ignore
//! use sitemap_gen::{FsWriter, Generator, GeneratorConfig, SitemapSource, StaticSource, UrlEntry};
//!
//! let config = GeneratorConfig::with_base_url("https://example.com")?;
//! let generator = Generator::new(config, FsWriter::new("./public"));
//! let sources: Vec<Box<dyn SitemapSource>> = vec![Box::new(StaticSource::new(
//!     "pages",
//!     vec![UrlEntry::new("https://example.com/about", None)],
//! ))];
//!
//! let report = generator.generate(&sources).await;
//! assert!(report.is_success());
//! ```
//!
//! The `sitemap_gen` binary wraps this with a YAML config file and
//! file-backed sources.

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod models;
pub mod outputs;
pub mod sources;
pub mod utils;

pub use config::GeneratorConfig;
pub use error::SitemapError;
pub use generator::{GenerationReport, Generator, SourceReport};
pub use models::{SitemapFile, UrlEntry};
pub use outputs::writer::{FsWriter, SitemapWriter};
pub use sources::{FileSource, SitemapSource, StaticSource};
