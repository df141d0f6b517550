//! Redirect records and the table that holds them

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Redirect table compiled into the binary
const BUILTIN_REDIRECTS: &str = include_str!("../../data/redirects.yml");

/// A single named redirect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectRecord {
    /// Canonical name, matched case-insensitively
    pub name: String,

    /// Human-readable note, never matched by the resolver
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Explicit destination; synthesized from the name when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Additional match strings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl RedirectRecord {
    /// Create a record with just a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            url: None,
            aliases: Vec::new(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Name followed by aliases, in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Whether the (already lower-cased) token names this record
    pub fn matches(&self, token: &str) -> bool {
        self.keys().any(|key| key.to_lowercase() == token)
    }
}

/// Ordered, immutable list of redirects
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RedirectTable {
    records: Vec<RedirectRecord>,
}

impl RedirectTable {
    pub fn new(records: Vec<RedirectRecord>) -> Self {
        Self { records }
    }

    /// The table shipped with the binary
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_REDIRECTS).context("Built-in redirect table is invalid")
    }

    /// Parse a table from YAML (or JSON, which is valid YAML)
    pub fn from_yaml(content: &str) -> Result<Self> {
        let records: Vec<RedirectRecord> = serde_yaml::from_str(content)?;
        Ok(Self::new(records))
    }

    /// Load a table from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read redirects from {:?}", path))?;
        let table = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse redirects from {:?}", path))?;
        tracing::debug!("Loaded {} redirects from {:?}", table.len(), path);
        Ok(table)
    }

    pub fn records(&self) -> &[RedirectRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RedirectRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Lower-cased keys claimed by more than one record, with the claiming
    /// record names in table order. The first claimant wins at resolve time.
    pub fn duplicate_keys(&self) -> Vec<(String, Vec<String>)> {
        let mut owners: HashMap<String, Vec<String>> = HashMap::new();
        let mut order: Vec<String> = Vec::new();

        for record in &self.records {
            let mut seen_in_record: Vec<String> = Vec::new();
            for key in record.keys() {
                let key = key.to_lowercase();
                if seen_in_record.contains(&key) {
                    continue;
                }
                seen_in_record.push(key.clone());

                let entry = owners.entry(key.clone()).or_default();
                if entry.is_empty() {
                    order.push(key);
                }
                entry.push(record.name.clone());
            }
        }

        order
            .into_iter()
            .filter_map(|key| {
                let names = owners.remove(&key)?;
                (names.len() > 1).then_some((key, names))
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a RedirectTable {
    type Item = &'a RedirectRecord;
    type IntoIter = std::slice::Iter<'a, RedirectRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_loads() {
        let table = RedirectTable::builtin().unwrap();
        assert_eq!(table.len(), 90);
        assert!(table.iter().all(|r| !r.name.is_empty()));
        assert_eq!(table.records()[0].name, "homepage");
        assert_eq!(table.records()[89].name, "help");
    }

    #[test]
    fn test_builtin_table_groups() {
        let table = RedirectTable::builtin().unwrap();
        let url_of = |name: &str| {
            table
                .iter()
                .find(|r| r.name == name)
                .and_then(|r| r.url.clone())
        };

        assert!(url_of("signal").unwrap().starts_with("https://signal.me/"));
        assert_eq!(url_of("raycast").unwrap(), "https://raycast.com/?via=dnnsmnstrr");
        assert_eq!(url_of("felix").unwrap(), "https://felixmuensterer.com/");
        assert_eq!(
            url_of("wishlist").unwrap(),
            "https://www.amazon.de/hz/wishlist/ls/1Y2URDXEYY1JO"
        );
        assert_eq!(url_of("stack").unwrap(), "https://stackshare.io/dnnsmnstrr/my-stack");
        assert_eq!(url_of("uberspace").unwrap(), "https://mnstrr.uber.space/");
        assert_eq!(url_of("readcv").unwrap(), "https://read.cv/dnnsmnstrr");
        assert_eq!(url_of("admin").unwrap(), "https://youareanidiot.cc/");
    }

    #[test]
    fn test_parse_optional_fields() {
        let yaml = r#"
- name: help
- name: github
  url: https://github.com/someone
  aliases: [gh, "🤖"]
"#;
        let table = RedirectTable::from_yaml(yaml).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.records()[0].url.is_none());
        assert!(table.records()[0].aliases.is_empty());
        assert_eq!(table.records()[1].aliases, vec!["gh", "🤖"]);
    }

    #[test]
    fn test_serialize_skips_empty_fields() {
        let record = RedirectRecord::new("help");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"name":"help"}"#);
    }

    #[test]
    fn test_duplicate_keys() {
        let table = RedirectTable::new(vec![
            RedirectRecord::new("a").with_aliases(["x", "y"]),
            RedirectRecord::new("b").with_aliases(["X"]),
            RedirectRecord::new("c").with_aliases(["c"]),
        ]);
        let dups = table.duplicate_keys();
        assert_eq!(dups, vec![("x".to_string(), vec!["a".to_string(), "b".to_string()])]);
    }

    #[test]
    fn test_builtin_duplicates_reported() {
        let table = RedirectTable::builtin().unwrap();
        let dups = table.duplicate_keys();
        assert!(dups
            .iter()
            .any(|(key, names)| key == "📰" && names == &["it-talents", "feed"]));
    }
}
