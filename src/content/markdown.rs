//! Markdown rendering for feed entry bodies

use lazy_static::lazy_static;
use pulldown_cmark::{html, Options, Parser};
use regex::{Captures, Regex};

use crate::documents::BodyRenderer;

/// Marker separating the excerpt from the rest of a body
const MORE_MARKER: &str = "<!-- more -->";

lazy_static! {
    static ref ROOT_RELATIVE_RE: Regex = Regex::new(r#"\b(href|src)=(["'])/([^/]|$)"#).unwrap();
}

/// Markdown renderer producing feed-ready HTML
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    /// Root-relative links (`href="/..."`) are made absolute against this
    base_url: Option<String>,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer that rewrites root-relative links onto `base_url`
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: Some(base_url.trim_end_matches('/').to_string()),
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION;
        let parser = Parser::new_ext(markdown, options);

        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        match &self.base_url {
            Some(base_url) => convert_relative_urls_to_absolute(&html_output, base_url),
            None => html_output,
        }
    }

    /// Parse excerpt from content (split by <!-- more -->)
    pub fn split_excerpt(content: &str) -> (Option<String>, String) {
        if let Some(pos) = content.find(MORE_MARKER) {
            let excerpt = content[..pos].trim().to_string();
            let remaining = content[pos + MORE_MARKER.len()..].trim().to_string();
            let full = format!("{}\n\n{}", excerpt, remaining);
            (Some(excerpt), full)
        } else {
            (None, content.to_string())
        }
    }
}

impl BodyRenderer for MarkdownRenderer {
    /// Feed entries carry the excerpt when one is marked
    fn render(&self, body: &str) -> String {
        let (excerpt, full) = Self::split_excerpt(body);
        MarkdownRenderer::render(self, excerpt.as_deref().unwrap_or(&full))
    }
}

/// Convert root-relative URLs in HTML content to absolute URLs
/// Handles href="/..." and src="/..." in either quote style; protocol-relative
/// `//host/...` links are left alone
fn convert_relative_urls_to_absolute(content: &str, base_url: &str) -> String {
    ROOT_RELATIVE_RE
        .replace_all(content, |caps: &Captures| {
            format!("{}={}{}/{}", &caps[1], &caps[2], base_url, &caps[3])
        })
        .into_owned()
}
