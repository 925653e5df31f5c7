//! Command-line interface definitions.
//!
//! Every flag overrides the matching key of the optional YAML config file.
//! Some flags can also be provided via environment variables.

use crate::config::SourceConfig;
use clap::Parser;
use std::path::PathBuf;

/// Generate sitemaps.org sitemap files and a sitemap index.
///
/// # Examples
///
/// ```sh
/// # Everything from a config file
/// sitemap_gen -c sitemap.yaml
///
/// # Ad-hoc run without a config file
/// sitemap_gen --base-url https://example.com -d ./public \
///     --source articles=data/articles.json --source pages=data/pages.txt
///
/// # Split files at 10k URLs and give up after a minute
/// sitemap_gen -c sitemap.yaml --max-urls 10000 --timeout-secs 60
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a sitemap.yaml config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base URL prefixed to file names in the sitemap index
    #[arg(short, long, env = "SITEMAP_BASE_URL")]
    pub base_url: Option<String>,

    /// Output directory for the sitemap files
    #[arg(short, long, env = "SITEMAP_DIR")]
    pub dir: Option<PathBuf>,

    /// File name of the sitemap index
    #[arg(long)]
    pub index_filename: Option<String>,

    /// strftime pattern for <lastmod> values
    #[arg(long)]
    pub lastmod_format: Option<String>,

    /// Maximum URLs per sitemap file (0 = never split)
    #[arg(short, long)]
    pub max_urls: Option<usize>,

    /// Number of sources processed at the same time
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Additional source as NAME=PATH (repeatable)
    #[arg(short, long = "source", value_parser = SourceConfig::parse_cli)]
    pub sources: Vec<SourceConfig>,

    /// Abort the run if it takes longer than this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}
