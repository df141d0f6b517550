//! Atom feed generation (RFC 4287)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::xml::{cdata, escape_xml};
use super::{path_slug, ContentRecord};
use crate::helpers::{date_xml, full_url_for};

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// Feed author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Feed-level metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedMeta {
    pub title: String,
    pub author: Author,
    /// Absolute URL the feed itself is served from
    pub feed_url: String,
    /// Absolute URL of the site; also the feed id
    pub site_url: String,
}

/// Turns a record body into the HTML placed in `<content>`
pub trait BodyRenderer {
    fn render(&self, body: &str) -> String;
}

/// Uses the body as-is
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl BodyRenderer for PassThrough {
    fn render(&self, body: &str) -> String {
        body.to_string()
    }
}

/// Stable id of the `index`-th (1-based) entry for a path
pub fn entry_id(index: usize, path: &str) -> String {
    format!("{}-{}", index, path_slug(path))
}

/// Build the feed with the current time as generation timestamp
pub fn build_atom_feed(records: &[ContentRecord], meta: &FeedMeta) -> String {
    build_atom_feed_at(records, meta, Utc::now())
}

/// Build the feed with a fixed generation timestamp
pub fn build_atom_feed_at(records: &[ContentRecord], meta: &FeedMeta, now: DateTime<Utc>) -> String {
    build_atom_feed_with(records, meta, now, &PassThrough)
}

/// Render one `<entry>` per record, in input order
///
/// Callers sort the records (see [`super::sort_by_date_desc`]); the generator
/// does not. Entry ids come from a per-path counter created for this call,
/// so they are identical across regenerations of the same input. `now` is
/// used for the feed's `<updated>` and for every record without a usable
/// date; those are the only values that change between runs.
pub fn build_atom_feed_with(
    records: &[ContentRecord],
    meta: &FeedMeta,
    now: DateTime<Utc>,
    renderer: &dyn BodyRenderer,
) -> String {
    tracing::debug!("Generating feed with {} entries", records.len());

    let now_xml = date_xml(&now);
    let site_url = meta.site_url.trim_end_matches('/');
    let mut counters: HashMap<String, usize> = HashMap::new();

    let mut feed = String::new();
    feed.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
    feed.push('\n');
    feed.push_str(&format!("<feed xmlns=\"{}\">\n", ATOM_NS));
    feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&meta.title)));
    feed.push_str(&format!(
        "  <link href=\"{}\" rel=\"self\"/>\n",
        escape_xml(&meta.feed_url)
    ));
    feed.push_str(&format!("  <link href=\"{}/\"/>\n", escape_xml(site_url)));
    feed.push_str(&format!("  <updated>{}</updated>\n", now_xml));
    feed.push_str(&format!("  <id>{}/</id>\n", escape_xml(site_url)));
    feed.push_str("  <author>\n");
    feed.push_str(&format!(
        "    <name>{}</name>\n",
        escape_xml(&meta.author.name)
    ));
    if let Some(email) = &meta.author.email {
        feed.push_str(&format!("    <email>{}</email>\n", escape_xml(email)));
    }
    feed.push_str("  </author>\n");

    for record in records {
        let path = record.path_or_root();
        // keyed by slug: paths that slugify alike (`/a/b`, `/a-b`) must not share an id
        let counter = counters.entry(path_slug(path)).or_insert(0);
        *counter += 1;

        let updated = match record.parsed_date() {
            Some(date) => date_xml(&date),
            None => {
                if let Some(raw) = &record.date {
                    tracing::warn!(
                        "Using generation time for {:?}: unparseable date {:?}",
                        record.title,
                        raw
                    );
                }
                now_xml.clone()
            }
        };

        let body = match record.content.as_deref() {
            Some(content) if !content.trim().is_empty() => renderer.render(content),
            _ => format!("<p>{}</p>", escape_xml(&record.title)),
        };

        feed.push_str("  <entry>\n");
        feed.push_str(&format!(
            "    <title>{}</title>\n",
            escape_xml(&record.title)
        ));
        feed.push_str(&format!(
            "    <link href=\"{}\"/>\n",
            escape_xml(&full_url_for(site_url, path))
        ));
        feed.push_str(&format!(
            "    <id>{}</id>\n",
            escape_xml(&entry_id(*counter, path))
        ));
        feed.push_str(&format!("    <updated>{}</updated>\n", updated));
        feed.push_str(&format!(
            "    <content type=\"html\">{}</content>\n",
            cdata(&body)
        ));
        feed.push_str("  </entry>\n");
    }

    feed.push_str("</feed>\n");
    feed
}
