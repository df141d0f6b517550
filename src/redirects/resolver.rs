//! Token resolution

use std::collections::HashMap;

use super::{RedirectRecord, RedirectTable};

/// Outcome of resolving a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    Found(&'a RedirectRecord),
    NotFound,
}

impl<'a> Resolution<'a> {
    pub fn record(&self) -> Option<&'a RedirectRecord> {
        match self {
            Resolution::Found(record) => Some(record),
            Resolution::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }
}

impl<'a> From<Option<&'a RedirectRecord>> for Resolution<'a> {
    fn from(record: Option<&'a RedirectRecord>) -> Self {
        record.map_or(Resolution::NotFound, Resolution::Found)
    }
}

/// Find the first record whose name or alias equals the token, ignoring case
pub fn resolve<'a>(token: &str, table: &'a RedirectTable) -> Resolution<'a> {
    let token = token.to_lowercase();
    table.iter().find(|record| record.matches(&token)).into()
}

/// Redirect table with a precomputed lookup from lower-cased name/alias
/// to table position
///
/// Keeps the first occurrence of every key, so lookups agree with [`resolve`].
#[derive(Debug, Clone)]
pub struct RedirectIndex {
    table: RedirectTable,
    positions: HashMap<String, usize>,
}

impl RedirectIndex {
    pub fn new(table: RedirectTable) -> Self {
        let mut positions = HashMap::new();
        for (idx, record) in table.iter().enumerate() {
            for key in record.keys() {
                positions.entry(key.to_lowercase()).or_insert(idx);
            }
        }
        Self { table, positions }
    }

    pub fn resolve(&self, token: &str) -> Resolution<'_> {
        self.positions
            .get(&token.to_lowercase())
            .and_then(|&idx| self.table.records().get(idx))
            .into()
    }

    pub fn table(&self) -> &RedirectTable {
        &self.table
    }

    /// Number of distinct lookup keys
    pub fn key_count(&self) -> usize {
        self.positions.len()
    }
}
