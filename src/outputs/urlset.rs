//! Per-source sitemap rendering.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!     <url>
//!         <loc>https://example.com/a</loc>
//!         <lastmod>2025-05-06</lastmod>
//!     </url>
//! </urlset>
//! ```
//!
//! `<lastmod>` is omitted for entries without a timestamp, or with one at or
//! before the unix epoch.

use super::{DateFormat, SITEMAP_NS, XML_DECLARATION, write_lastmod};
use crate::error::SitemapError;
use crate::models::UrlEntry;
use quick_xml::escape::escape;

/// Render one `<urlset>` document for `entries`, in the given order.
pub fn render(entries: &[UrlEntry], format: &DateFormat) -> Result<String, SitemapError> {
    let mut xml = String::with_capacity(128 + entries.len() * 96);

    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str("<urlset xmlns=\"");
    xml.push_str(SITEMAP_NS);
    xml.push_str("\">\n");

    for entry in entries {
        xml.push_str("    <url>\n        <loc>");
        xml.push_str(&escape(entry.url.as_str()));
        xml.push_str("</loc>\n");
        write_lastmod(&mut xml, "        ", entry.lastmod.as_ref(), format)?;
        xml.push_str("    </url>\n");
    }

    xml.push_str("</urlset>");
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use quick_xml::events::Event;
    use quick_xml::reader::Reader;

    fn date(y: i32, m: u32, d: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap())
    }

    /// Read `<url>` elements back as `(loc, lastmod)` pairs.
    fn parse(xml: &str) -> Vec<(String, Option<String>)> {
        let mut reader = Reader::from_str(xml);
        let mut pairs = Vec::new();
        let mut current: Option<String> = None;
        let mut loc = String::new();
        let mut lastmod: Option<String> = None;

        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) => match e.name().as_ref() {
                    b"url" => {
                        loc.clear();
                        lastmod = None;
                    }
                    b"loc" | b"lastmod" => {
                        current = Some(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                    }
                    _ => {}
                },
                Event::Text(e) => {
                    let text = reader.decoder().decode(&e).unwrap().into_owned();
                    push_text(&current, &mut loc, &mut lastmod, &text);
                }
                Event::GeneralRef(e) => {
                    let name = reader.decoder().decode(&e).unwrap().into_owned();
                    let text = match name.as_str() {
                        "amp" => "&",
                        "lt" => "<",
                        "gt" => ">",
                        "quot" => "\"",
                        "apos" => "'",
                        other => panic!("unexpected entity {other}"),
                    };
                    push_text(&current, &mut loc, &mut lastmod, text);
                }
                Event::End(e) => {
                    if e.name().as_ref() == b"url" {
                        pairs.push((loc.clone(), lastmod.take()));
                    }
                    current = None;
                }
                Event::Eof => break,
                _ => {}
            }
        }
        pairs
    }

    fn push_text(
        current: &Option<String>,
        loc: &mut String,
        lastmod: &mut Option<String>,
        text: &str,
    ) {
        match current.as_deref() {
            Some("loc") => loc.push_str(text),
            Some("lastmod") => lastmod.get_or_insert_with(String::new).push_str(text),
            _ => {}
        }
    }

    #[test]
    fn test_urlset_exact_layout() {
        let entries = vec![
            UrlEntry::new("https://example.com/a", date(2025, 5, 6)),
            UrlEntry::new("https://example.com/b", None),
        ];
        let xml = render(&entries, &DateFormat::default()).unwrap();

        let expected = [
            r#"<?xml version="1.0" encoding="UTF-8"?>"#,
            r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#,
            "    <url>",
            "        <loc>https://example.com/a</loc>",
            "        <lastmod>2025-05-06</lastmod>",
            "    </url>",
            "    <url>",
            "        <loc>https://example.com/b</loc>",
            "    </url>",
            "</urlset>",
        ]
        .join("\n");
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_urlset_empty() {
        let xml = render(&[], &DateFormat::default()).unwrap();
        assert!(xml.starts_with(XML_DECLARATION));
        assert!(xml.ends_with("</urlset>"));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_urlset_escapes_special_chars() {
        let entries = vec![UrlEntry::new("https://example.com/search?q=a&b=<c>", None)];
        let xml = render(&entries, &DateFormat::default()).unwrap();

        assert!(xml.contains("<loc>https://example.com/search?q=a&amp;b=&lt;c&gt;</loc>"));
    }

    #[test]
    fn test_urlset_omits_lastmod_at_or_before_epoch() {
        let entries = vec![
            UrlEntry::new("https://example.com/epoch", DateTime::from_timestamp(0, 0)),
            UrlEntry::new("https://example.com/before", DateTime::from_timestamp(-86_400, 0)),
        ];
        let xml = render(&entries, &DateFormat::default()).unwrap();

        assert!(!xml.contains("<lastmod>"));
        assert_eq!(xml.matches("<url>").count(), 2);
    }

    #[test]
    fn test_urlset_round_trip() {
        let entries = vec![
            UrlEntry::new("https://example.com/news/1", date(2025, 5, 6)),
            UrlEntry::new("https://example.com/news/2?page=2&sort=asc", date(2024, 12, 31)),
            UrlEntry::new("https://example.com/about", None),
            UrlEntry::new("https://example.com/news/1", date(2023, 1, 2)),
        ];
        let format = DateFormat::default();
        let xml = render(&entries, &format).unwrap();

        let expected: Vec<(String, Option<String>)> = entries
            .iter()
            .map(|e| {
                let lastmod = e.lastmod.map(|t| t.format("%Y-%m-%d").to_string());
                (e.url.clone(), lastmod)
            })
            .collect();
        assert_eq!(parse(&xml), expected);
    }
}
