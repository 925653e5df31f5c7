//! Sitemap generation pipeline.
//!
//! ## Flow
//!
//! 1. **Sources**: every [`SitemapSource`] is asked for its URLs (several at a
//!    time, bounded by the configured concurrency)
//! 2. **Per-source files**: URLs are sorted newest first, split into chunks of
//!    at most `max_urls_count`, and each chunk is written as one urlset file
//! 3. **Index**: once every source has finished, the written files are sorted
//!    by their freshest URL and listed in the sitemap index
//!
//! A failing source only stops its own remaining chunks. The other sources
//! still run and the index is still written, listing every file that made it
//! to disk.

use crate::config::GeneratorConfig;
use crate::error::SitemapError;
use crate::models::{Lastmod, SitemapFile};
use crate::outputs::writer::SitemapWriter;
use crate::outputs::{indexes, urlset};
use crate::sources::SitemapSource;
use crate::utils::{chunk_urls, sort_by_lastmod};
use futures::stream::{self, StreamExt};
use tracing::{debug, error, info, instrument, warn};

/// Outcome of one source.
#[derive(Debug)]
pub struct SourceReport {
    pub name: String,
    /// Files written for this source, in chunk order.
    pub files: Vec<SitemapFile>,
    /// Why the source stopped early, if it did.
    pub error: Option<SitemapError>,
}

impl SourceReport {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            files: Vec::new(),
            error: None,
        }
    }

    /// `true` when the source had no URLs and nothing went wrong.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.error.is_none()
    }
}

/// Outcome of a full run.
#[derive(Debug)]
pub struct GenerationReport {
    /// One report per source, in the order the sources were given.
    pub sources: Vec<SourceReport>,
    /// Number of index entries written, or why the index could not be written.
    pub index: Result<usize, SitemapError>,
}

impl GenerationReport {
    /// `true` when every source and the index were written without error.
    pub fn is_success(&self) -> bool {
        self.index.is_ok() && self.sources.iter().all(|s| s.error.is_none())
    }

    /// Every sitemap file written, across all sources.
    pub fn files(&self) -> impl Iterator<Item = &SitemapFile> {
        self.sources.iter().flat_map(|s| s.files.iter())
    }

    /// Every error encountered, source errors first.
    pub fn failures(&self) -> impl Iterator<Item = &SitemapError> {
        self.sources
            .iter()
            .filter_map(|s| s.error.as_ref())
            .chain(self.index.as_ref().err())
    }
}

/// Generates sitemap files and their index through a [`SitemapWriter`].
pub struct Generator<W> {
    config: GeneratorConfig,
    writer: W,
}

impl<W: SitemapWriter> Generator<W> {
    pub fn new(config: GeneratorConfig, writer: W) -> Self {
        Self { config, writer }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Run every source, then write the index.
    ///
    /// Sources run concurrently but their reports keep the input order, so
    /// identical input gives an identical index.
    ///
    /// # Arguments
    ///
    /// * `sources` - The sources to turn into sitemap files, in index tie-break order
    ///
    /// # Returns
    ///
    /// A [`GenerationReport`] with one [`SourceReport`] per source and the
    /// outcome of the index write.
    ///
    /// # Errors
    ///
    /// Never fails as a whole. Source and write failures are recorded in the
    /// report; check [`GenerationReport::is_success`].
    #[instrument(level = "info", skip_all, fields(sources = sources.len()))]
    pub async fn generate(&self, sources: &[Box<dyn SitemapSource>]) -> GenerationReport {
        let reports: Vec<SourceReport> = stream::iter(sources)
            .map(|source| self.create_sitemap(&**source))
            .buffered(self.config.concurrency())
            .collect()
            .await;

        let files: Vec<SitemapFile> = reports
            .iter()
            .flat_map(|r| r.files.iter().cloned())
            .collect();
        let index = self.create_index_sitemap(files).await;

        GenerationReport {
            sources: reports,
            index,
        }
    }

    /// Write the sitemap file(s) for one source.
    ///
    /// An empty source writes nothing. On a failed write the remaining chunks
    /// are skipped; files already written stay in the report.
    #[instrument(level = "info", skip_all, fields(source = %source.name()))]
    pub async fn create_sitemap(&self, source: &dyn SitemapSource) -> SourceReport {
        let name = source.name();
        let mut report = SourceReport::new(name);

        let mut urls = match source.urls().await {
            Ok(urls) => urls,
            Err(e) => {
                error!(error = %e, "Source failed; skipping");
                report.error = Some(e);
                return report;
            }
        };
        if urls.is_empty() {
            info!("Source has no URLs; no sitemap written");
            return report;
        }

        sort_by_lastmod(&mut urls);
        let chunks = chunk_urls(&urls, self.config.max_urls_count());
        let multiple = chunks.len() > 1;
        debug!(urls = urls.len(), chunks = chunks.len(), "Partitioned URLs");

        for (i, chunk) in chunks.into_iter().enumerate() {
            let location = if multiple {
                format!("{}-{}.xml", name, i + 1)
            } else {
                format!("{name}.xml")
            };
            let lastmod = chunk.iter().filter_map(|e| e.published_lastmod()).max();

            let xml = match urlset::render(chunk, self.config.lastmod_format()) {
                Ok(xml) => xml,
                Err(e) => {
                    error!(file = %location, error = %e, "Failed to render sitemap");
                    report.error = Some(e);
                    break;
                }
            };

            if let Err(e) = self.writer.write(&location, xml.as_bytes()).await {
                error!(file = %location, error = %e, "Failed to write sitemap; skipping remaining chunks");
                report.error = Some(SitemapError::Write {
                    filename: location,
                    source: e,
                });
                break;
            }

            info!(file = %location, urls = chunk.len(), "Wrote sitemap");
            report.files.push(SitemapFile { location, lastmod });
        }

        report
    }

    /// Sort `files` newest first and write the sitemap index.
    ///
    /// # Arguments
    ///
    /// * `files` - Every sitemap file written during the run, in any order
    ///
    /// # Returns
    ///
    /// The number of entries written to the index.
    ///
    /// # Errors
    ///
    /// Returns [`SitemapError::IndexWrite`] if the writer fails and
    /// [`SitemapError::Render`] if a date cannot be formatted. Per-source
    /// files already written are left in place.
    #[instrument(level = "info", skip_all, fields(file = %self.config.index_filename(), entries = files.len()))]
    pub async fn create_index_sitemap(
        &self,
        mut files: Vec<SitemapFile>,
    ) -> Result<usize, SitemapError> {
        sort_by_lastmod(&mut files);

        let xml = indexes::render(
            self.config.base_url(),
            &files,
            self.config.lastmod_format(),
        )?;

        if files.is_empty() {
            warn!("No sitemap files were written; index will be empty");
        }

        let filename = self.config.index_filename();
        self.writer
            .write(filename, xml.as_bytes())
            .await
            .map_err(|source| {
                error!(error = %source, "Failed to write sitemap index");
                SitemapError::IndexWrite {
                    filename: filename.to_string(),
                    source,
                }
            })?;

        info!("Wrote sitemap index");
        Ok(files.len())
    }
}
