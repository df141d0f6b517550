//! Search and filtering for the redirect listing

use serde::Deserialize;
use std::str::FromStr;

use super::RedirectRecord;
use crate::helpers::is_external;

/// Which redirects to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedirectKind {
    /// No url, or a url on this site
    Internal,
    /// An http(s) url on another site
    External,
}

impl RedirectKind {
    pub fn matches(&self, record: &RedirectRecord) -> bool {
        let external = record.url.as_deref().is_some_and(is_external);
        match self {
            RedirectKind::Internal => !external,
            RedirectKind::External => external,
        }
    }
}

impl FromStr for RedirectKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "internal" => Ok(RedirectKind::Internal),
            "external" => Ok(RedirectKind::External),
            _ => anyhow::bail!("Unknown redirect type: {}. Available: internal, external", s),
        }
    }
}

/// Case-insensitive substring search over name, description, aliases and url
fn search_matches(record: &RedirectRecord, query: &str) -> bool {
    let contains = |value: &str| value.to_lowercase().contains(query);

    contains(&record.name)
        || record.description.as_deref().is_some_and(contains)
        || record.aliases.iter().any(|alias| contains(alias))
        || record.url.as_deref().is_some_and(contains)
}

/// Records matching an optional search query and an optional kind, in table order
pub fn filter_redirects<'a, I>(
    records: I,
    search: Option<&str>,
    kind: Option<RedirectKind>,
) -> Vec<&'a RedirectRecord>
where
    I: IntoIterator<Item = &'a RedirectRecord>,
{
    let query = search
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    records
        .into_iter()
        .filter(|record| query.as_deref().map_or(true, |q| search_matches(record, q)))
        .filter(|record| kind.map_or(true, |k| k.matches(record)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redirects::RedirectTable;

    fn table() -> RedirectTable {
        RedirectTable::new(vec![
            RedirectRecord::new("github")
                .with_url("https://github.com/someone")
                .with_aliases(["gh"]),
            RedirectRecord::new("now")
                .with_url("zettelkasten/now")
                .with_description("What I'm up to"),
            RedirectRecord::new("feed").with_url("/feed.xml").with_aliases(["rss"]),
            RedirectRecord::new("help"),
        ])
    }

    fn names(records: Vec<&RedirectRecord>) -> Vec<&str> {
        records.into_iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_no_filters() {
        let table = table();
        assert_eq!(filter_redirects(&table, None, None).len(), 4);
    }

    #[test]
    fn test_search_fields() {
        let table = table();
        assert_eq!(names(filter_redirects(&table, Some("RSS"), None)), vec!["feed"]);
        assert_eq!(names(filter_redirects(&table, Some("up to"), None)), vec!["now"]);
        assert_eq!(names(filter_redirects(&table, Some("github.com"), None)), vec!["github"]);
    }

    #[test]
    fn test_kind_filter() {
        let table = table();
        assert_eq!(
            names(filter_redirects(&table, None, Some(RedirectKind::External))),
            vec!["github"]
        );
        assert_eq!(
            names(filter_redirects(&table, None, Some(RedirectKind::Internal))),
            vec!["now", "feed", "help"]
        );
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("External".parse::<RedirectKind>().unwrap(), RedirectKind::External);
        assert!("sideways".parse::<RedirectKind>().is_err());
    }
}
