//! Sitemap generation (sitemaps.org protocol)

use chrono::{DateTime, NaiveDate};

use super::xml::escape_xml;
use super::ContentRecord;
use crate::helpers::{date_xml, full_url_for, parse_date};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Render one `<url>` per record, in input order
///
/// `<loc>` joins the base URL and the record path with exactly one slash;
/// records without a path point at the site root. `<lastmod>` carries the
/// record's date in W3C Datetime form and is left out when the date does not
/// parse, so the output depends only on the input.
pub fn build_sitemap(records: &[ContentRecord], base_url: &str) -> String {
    tracing::debug!("Generating sitemap with {} urls", records.len());

    let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!("<urlset xmlns=\"{}\">\n", SITEMAP_NS));

    for record in records {
        let loc = full_url_for(base_url, record.path_or_root());
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&loc)));

        if let Some(date) = record.date.as_deref().map(str::trim) {
            match lastmod(date) {
                Some(lastmod) => {
                    xml.push_str(&format!("    <lastmod>{}</lastmod>\n", escape_xml(&lastmod)));
                }
                None => {
                    tracing::warn!(
                        "Skipping lastmod for {:?}: unparseable date {:?}",
                        record.title,
                        date
                    );
                }
            }
        }

        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// W3C Datetime form of a record date
///
/// Plain dates and RFC 3339 timestamps are kept as written; other accepted
/// forms (naive timestamps) are rewritten as UTC timestamps.
fn lastmod(date: &str) -> Option<String> {
    let rfc3339 =
        date.as_bytes().get(10) == Some(&b'T') && DateTime::parse_from_rfc3339(date).is_ok();
    if rfc3339 || NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok() {
        return Some(date.to_string());
    }
    parse_date(date).map(|parsed| date_xml(&parsed))
}
