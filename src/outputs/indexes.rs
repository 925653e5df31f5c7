//! Sitemap index rendering.
//!
//! The index lists every sitemap file written during a run:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!     <sitemap>
//!         <loc>https://example.com/articles-1.xml</loc>
//!         <lastmod>2025-05-06</lastmod>
//!     </sitemap>
//! </sitemapindex>
//! ```
//!
//! Entries appear in the order given; sorting happens in the generator.

use super::{DateFormat, SITEMAP_NS, XML_DECLARATION, write_lastmod};
use crate::error::SitemapError;
use crate::models::SitemapFile;
use quick_xml::escape::escape;

/// Render the `<sitemapindex>` document.
///
/// Each `<loc>` is `base_url` (without trailing slashes) joined to the file's
/// location with a single `/`.
pub fn render(
    base_url: &str,
    files: &[SitemapFile],
    format: &DateFormat,
) -> Result<String, SitemapError> {
    let base_url = base_url.trim_end_matches('/');
    let mut xml = String::with_capacity(128 + files.len() * 112);

    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str("<sitemapindex xmlns=\"");
    xml.push_str(SITEMAP_NS);
    xml.push_str("\">\n");

    for file in files {
        let loc = format!("{}/{}", base_url, file.location);
        xml.push_str("    <sitemap>\n        <loc>");
        xml.push_str(&escape(loc.as_str()));
        xml.push_str("</loc>\n");
        write_lastmod(&mut xml, "        ", file.lastmod.as_ref(), format)?;
        xml.push_str("    </sitemap>\n");
    }

    xml.push_str("</sitemapindex>");
    Ok(xml)
}
