//! Machine-readable documents derived from the site's content records
//!
//! [`build_sitemap`] renders a sitemaps.org `urlset`, [`build_atom_feed`] an
//! RFC 4287 Atom feed. Both are pure string builders: loading the records
//! and writing or serving the output is left to the caller.

mod feed;
mod sitemap;
mod xml;

pub use feed::{
    build_atom_feed, build_atom_feed_at, build_atom_feed_with, entry_id, Author, BodyRenderer,
    FeedMeta, PassThrough,
};
pub use sitemap::build_sitemap;
pub use xml::{cdata, escape_xml, strip_invalid_xml_chars};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::helpers::parse_date;

/// A page or content item listed in the sitemap and the feed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    #[serde(alias = "name")]
    pub title: String,

    /// Site-relative path; absent or empty means the site root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// ISO-8601 date or timestamp
    #[serde(default, alias = "lastUpdated", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Entry body (Markdown or HTML)
    #[serde(default, alias = "description", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ContentRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Path with a missing value mapped to the root
    pub fn path_or_root(&self) -> &str {
        match self.path.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => path,
            _ => "/",
        }
    }

    /// Parsed date, if present and well-formed
    pub fn parsed_date(&self) -> Option<DateTime<Utc>> {
        self.date.as_deref().and_then(parse_date)
    }
}

/// Slug of a site path: leading separators removed, `index` for the root
///
/// # Examples
/// ```ignore
/// path_slug("/about")    // -> "about"
/// path_slug("/blog/a b") // -> "blog-a-b"
/// path_slug("")          // -> "index"
/// ```
pub fn path_slug(path: &str) -> String {
    let slug = slug::slugify(path.trim().trim_start_matches('/'));
    if slug.is_empty() {
        "index".to_string()
    } else {
        slug
    }
}

/// Sort newest first; undated records keep their relative order at the end
pub fn sort_by_date_desc(records: &mut [ContentRecord]) {
    records.sort_by_cached_key(|record| std::cmp::Reverse(record.parsed_date()));
}
