use std::io;

use chrono::NaiveDate;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesText, Event};

use crate::error::Result;
use crate::types::SitemapConfig;

pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Public URL of a page. The `home` slug maps to the site root.
#[must_use]
pub fn page_url(base_url: &str, slug: &str) -> String {
    if slug == "home" {
        format!("{base_url}/")
    } else {
        format!("{base_url}/{slug}")
    }
}

fn write_url<W: io::Write>(
    writer: &mut Writer<W>,
    entry: &SitemapConfig,
    base_url: &str,
    today: NaiveDate,
) -> io::Result<()> {
    let loc = page_url(base_url, &entry.page_slug);
    let lastmod = entry
        .last_modified
        .map_or(today, |dt| dt.date_naive())
        .format("%Y-%m-%d")
        .to_string();

    writer
        .create_element("url")
        .write_inner_content(|w| {
            w.create_element("loc")
                .write_text_content(BytesText::new(&loc))?;
            w.create_element("lastmod")
                .write_text_content(BytesText::new(&lastmod))?;
            w.create_element("changefreq")
                .write_text_content(BytesText::new(&entry.change_frequency))?;
            w.create_element("priority")
                .write_text_content(BytesText::new(&entry.priority))?;
            Ok(())
        })?;
    Ok(())
}

/// Renders a sitemaps.org document with one `<url>` per included row, in row
/// order. Rows without a `last_modified` date use `today`.
pub fn render_sitemap(
    entries: &[SitemapConfig],
    base_url: &str,
    today: NaiveDate,
) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer
        .create_element("urlset")
        .with_attribute(("xmlns", SITEMAP_NAMESPACE))
        .write_inner_content(|w| {
            for entry in entries.iter().filter(|e| e.include_in_sitemap) {
                write_url(w, entry, base_url, today)?;
            }
            Ok(())
        })?;

    String::from_utf8(writer.into_inner())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn entry(slug: &str, include: bool) -> SitemapConfig {
        SitemapConfig {
            id: 0,
            page_slug: slug.to_string(),
            include_in_sitemap: include,
            priority: "0.8".to_string(),
            change_frequency: "weekly".to_string(),
            last_modified: Some(Utc.with_ymd_and_hms(2024, 3, 9, 17, 45, 0).unwrap()),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()
    }

    #[test]
    fn test_excluded_rows_are_skipped() {
        let xml = render_sitemap(
            &[entry("projects", true), entry("drafts", false)],
            "https://example.com",
            today(),
        )
        .unwrap();

        assert_eq!(xml.matches("<url>").count(), 1);
        assert!(xml.contains("<loc>https://example.com/projects</loc>"));
        assert!(!xml.contains("drafts"));
    }

    #[test]
    fn test_home_maps_to_root() {
        let xml = render_sitemap(&[entry("home", true)], "https://example.com", today()).unwrap();
        assert!(xml.contains("<loc>https://example.com/</loc>"));
    }

    #[test]
    fn test_entry_fields_verbatim() {
        let mut e = entry("skills", true);
        e.priority = "0.30".to_string();
        e.change_frequency = "yearly".to_string();

        let xml = render_sitemap(&[e], "http://localhost:8080", today()).unwrap();
        assert!(xml.contains("<lastmod>2024-03-09</lastmod>"));
        assert!(xml.contains("<changefreq>yearly</changefreq>"));
        assert!(xml.contains("<priority>0.30</priority>"));
    }

    #[test]
    fn test_missing_lastmod_uses_today() {
        let mut e = entry("contact", true);
        e.last_modified = None;

        let xml = render_sitemap(&[e], "https://example.com", today()).unwrap();
        assert!(xml.contains("<lastmod>2025-01-02</lastmod>"));
    }

    #[test]
    fn test_document_shape_and_order() {
        let xml = render_sitemap(
            &[entry("b", true), entry("a", true)],
            "https://example.com",
            today(),
        )
        .unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
        assert!(xml.contains(&format!("<urlset xmlns=\"{SITEMAP_NAMESPACE}\">")));
        assert!(xml.ends_with("</urlset>"));
        assert!(xml.find("/b</loc>").unwrap() < xml.find("/a</loc>").unwrap());
    }

    #[test]
    fn test_exact_layout() {
        let xml = render_sitemap(&[entry("home", true)], "https://example.com", today()).unwrap();

        let expected = [
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>".to_string(),
            format!("<urlset xmlns=\"{SITEMAP_NAMESPACE}\">"),
            "  <url>".to_string(),
            "    <loc>https://example.com/</loc>".to_string(),
            "    <lastmod>2024-03-09</lastmod>".to_string(),
            "    <changefreq>weekly</changefreq>".to_string(),
            "    <priority>0.8</priority>".to_string(),
            "  </url>".to_string(),
            "</urlset>".to_string(),
        ]
        .join("\n");
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_values_are_escaped() {
        let xml = render_sitemap(&[entry("a&b", true)], "https://example.com", today()).unwrap();
        assert!(xml.contains("<loc>https://example.com/a&amp;b</loc>"));
    }

    #[test]
    fn test_empty_sitemap() {
        let xml = render_sitemap(&[], "https://example.com", today()).unwrap();
        assert_eq!(xml.matches("<url>").count(), 0);
        assert!(xml.contains("<urlset"));
    }
}
