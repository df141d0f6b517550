//! llms.txt parsing
//!
//! Reads the llmstxt.org layout into a structured document:
//!
//! ```text
//! # Title
//! > Optional summary
//! Free-form info
//! ## Section
//! - [Link title](https://example.com): optional description
//! ```

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

lazy_static! {
    static ref SECTION_RE: Regex = Regex::new(r"(?m)^##[ \t]*(.*?)[ \t]*$").unwrap();
    static ref LINK_RE: Regex =
        Regex::new(r"(?m)^-\s*\[([^\]]+)\]\(([^)]+)\)(?::[ \t]*(.*?))?[ \t]*$").unwrap();
}

/// llms.txt errors
#[derive(Error, Debug)]
pub enum LlmsError {
    #[error("llms.txt has no '# title' heading")]
    MissingTitle,
}

/// A link listed in a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmsLink {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

/// Parsed llms.txt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmsDocument {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub info: String,
    /// Sections in document order
    pub sections: IndexMap<String, Vec<LlmsLink>>,
}

fn parse_links(block: &str) -> Vec<LlmsLink> {
    LINK_RE
        .captures_iter(block)
        .map(|caps| LlmsLink {
            title: caps[1].trim().to_string(),
            url: caps[2].trim().to_string(),
            desc: caps
                .get(3)
                .map(|m| m.as_str().trim().to_string())
                .filter(|d| !d.is_empty()),
        })
        .collect()
}

/// Title, summary and info from the text before the first section
fn parse_header(head: &str) -> Result<(String, Option<String>, String), LlmsError> {
    let mut lines = head.lines().skip_while(|l| l.trim().is_empty());

    let title = lines
        .next()
        .and_then(|l| l.trim().strip_prefix('#'))
        .filter(|t| !t.starts_with('#'))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(LlmsError::MissingTitle)?;

    let mut rest: Vec<&str> = lines.skip_while(|l| l.trim().is_empty()).collect();

    let summary = match rest.first().and_then(|l| l.trim().strip_prefix('>')) {
        Some(summary) => {
            let summary = summary.trim().to_string();
            rest.remove(0);
            Some(summary).filter(|s| !s.is_empty())
        }
        None => None,
    };

    let info = rest.join("\n").trim().to_string();
    Ok((title, summary, info))
}

/// Parse an llms.txt document
pub fn parse(text: &str) -> Result<LlmsDocument, LlmsError> {
    let headings: Vec<_> = SECTION_RE.captures_iter(text).collect();

    let head_end = headings
        .first()
        .and_then(|caps| caps.get(0))
        .map_or(text.len(), |m| m.start());
    let (title, summary, info) = parse_header(&text[..head_end])?;

    let mut sections = IndexMap::new();
    for (idx, caps) in headings.iter().enumerate() {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let body_end = headings
            .get(idx + 1)
            .and_then(|next| next.get(0))
            .map_or(text.len(), |m| m.start());
        let links = parse_links(&text[whole.end()..body_end]);
        sections.insert(name.as_str().to_string(), links);
    }

    Ok(LlmsDocument {
        title,
        summary,
        info,
        sections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"# muensterer.tech

> Personal website of a developer and maker.

Everything below is generated from hand-written data.
Second info line.

## Pages
- [About](https://muensterer.tech/about): Who I am
- [Uses](https://muensterer.tech/uses)

## Optional
- [Feed](https://muensterer.tech/feed.xml): Atom feed
"#;

    #[test]
    fn test_parse_header() {
        let doc = parse(SAMPLE).unwrap();
        assert_eq!(doc.title, "muensterer.tech");
        assert_eq!(
            doc.summary.as_deref(),
            Some("Personal website of a developer and maker.")
        );
        assert_eq!(
            doc.info,
            "Everything below is generated from hand-written data.\nSecond info line."
        );
    }

    #[test]
    fn test_parse_sections_in_order() {
        let doc = parse(SAMPLE).unwrap();
        let names: Vec<_> = doc.sections.keys().cloned().collect();
        assert_eq!(names, vec!["Pages", "Optional"]);

        let pages = &doc.sections["Pages"];
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].title, "About");
        assert_eq!(pages[0].url, "https://muensterer.tech/about");
        assert_eq!(pages[0].desc.as_deref(), Some("Who I am"));
        assert!(pages[1].desc.is_none());
    }

    #[test]
    fn test_without_summary_or_sections() {
        let doc = parse("# Just a title\n\nSome info").unwrap();
        assert_eq!(doc.title, "Just a title");
        assert!(doc.summary.is_none());
        assert_eq!(doc.info, "Some info");
        assert!(doc.sections.is_empty());
    }

    #[test]
    fn test_missing_title() {
        assert!(matches!(parse("no heading here"), Err(LlmsError::MissingTitle)));
        assert!(matches!(parse("## Section only"), Err(LlmsError::MissingTitle)));
    }

    #[test]
    fn test_serializes_like_source_layout() {
        let doc = parse(SAMPLE).unwrap();
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["sections"]["Optional"][0]["desc"], "Atom feed");
        assert!(json["sections"]["Pages"][1].get("desc").is_none());
    }
}
