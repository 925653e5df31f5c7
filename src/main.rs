//! # Sitemap Gen
//!
//! Generates [sitemaps.org](https://www.sitemaps.org/protocol.html) sitemap
//! files from one or more URL sources, splitting large sources across several
//! files, and writes a sitemap index that references all of them.
//!
//! ## Usage
//!
//! ```sh
//! sitemap_gen -c sitemap.yaml
//! sitemap_gen -b https://example.com -d ./public -s articles=articles.json
//! ```
//!
//! ## Architecture
//!
//! 1. **Configuration**: YAML file merged with CLI flags, validated up front
//! 2. **Sources**: each source yields the URLs of one logical sitemap
//! 3. **Per-source files**: newest first, chunked by `max_urls_count`
//! 4. **Index**: every written file, ordered by its freshest URL

use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use sitemap_gen::cli::Cli;
use sitemap_gen::config::FileConfig;
use sitemap_gen::{FileSource, FsWriter, Generator, SitemapSource};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("sitemap_gen starting up");

    let args = Cli::parse();
    debug!(?args.config, ?args.dir, sources = args.sources.len(), "Parsed CLI arguments");

    // ---- Configuration ----
    let file_config = match &args.config {
        Some(path) => FileConfig::load(path).await?,
        None => FileConfig::default(),
    };
    let (config, dir, source_configs) = file_config.merge_cli(&args).into_parts()?;
    info!(
        base_url = %config.base_url(),
        dir = %dir.display(),
        max_urls_count = config.max_urls_count(),
        sources = source_configs.len(),
        "Configuration loaded"
    );

    // Early check: ensure output dir is writable
    let writer = FsWriter::new(dir);
    if let Err(e) = writer.ensure_writable().await {
        error!(
            path = %writer.dir().display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e.into());
    }

    let sources: Vec<Box<dyn SitemapSource>> = source_configs
        .into_iter()
        .map(|s| {
            let source = FileSource::new(s.name, s.path);
            debug!(source = %source.name(), path = %source.path().display(), "Registered source");
            Box::new(source) as Box<dyn SitemapSource>
        })
        .collect();
    if sources.is_empty() {
        warn!("No sources configured; only an empty index will be written");
    }

    // ---- Generate ----
    let generator = Generator::new(config, writer);
    let run = generator.generate(&sources);
    let report = match args.timeout_secs {
        Some(secs) => match tokio::time::timeout(Duration::from_secs(secs), run).await {
            Ok(report) => report,
            Err(_) => {
                error!(timeout_secs = secs, "Generation timed out; files written so far are kept");
                return Err(format!("generation timed out after {secs}s").into());
            }
        },
        None => run.await,
    };

    for source in &report.sources {
        match &source.error {
            Some(e) => warn!(source = %source.name, files = source.files.len(), error = %e, "Source incomplete"),
            None if source.is_empty() => info!(source = %source.name, "Source was empty"),
            None => info!(source = %source.name, files = source.files.len(), "Source complete"),
        }
    }

    let elapsed = start_time.elapsed();
    let failures = report.failures().count();
    info!(
        ?elapsed,
        files = report.files().count(),
        index = %generator.config().index_filename(),
        failures,
        "Execution complete"
    );

    if !report.is_success() {
        for failure in report.failures() {
            error!(error = %failure, "Generation failure");
        }
        return Err(format!("sitemap generation finished with {failures} failure(s)").into());
    }

    Ok(())
}
