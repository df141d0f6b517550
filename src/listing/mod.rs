//! Search, sort and pagination for JSON data files served by the data API

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

use crate::helpers::parse_date;

/// Default keys searched when a query is given
pub const DEFAULT_SEARCH_KEYS: &[&str] = &["title", "description"];

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Lenient parse: anything but `desc` is ascending
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::to_lowercase).as_deref() {
            Some("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

/// Query parameters accepted by the data API
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub dir: Option<String>,
    pub direction: Option<String>,
}

impl ListingQuery {
    pub fn direction(&self) -> SortDirection {
        SortDirection::parse(self.dir.as_deref().or(self.direction.as_deref()))
    }
}

/// One page of a data file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub page: usize,
    pub limit: usize,
    pub data_type: String,
    pub total: usize,
    pub total_pages: usize,
    pub items: Vec<Value>,
}

/// Result of applying a query to a data file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ListingResponse {
    Page(Listing),
    /// Non-array data is passed through untouched
    Raw(Value),
}

/// Text form of a scalar for searching and fallback comparison
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Items where any of `keys` contains `query`, case-insensitively
///
/// Array fields match when any element matches.
pub fn search(items: &[Value], query: &str, keys: &[&str]) -> Vec<Value> {
    let query = query.to_lowercase();
    let matches = |value: &Value| {
        value_text(value).is_some_and(|text| text.to_lowercase().contains(&query))
    };

    items
        .iter()
        .filter(|item| {
            keys.iter().any(|key| match item.get(key) {
                None => false,
                Some(value) if is_blank(value) => false,
                Some(Value::Array(values)) => values.iter().any(matches),
                Some(value) => matches(value),
            })
        })
        .cloned()
        .collect()
}

fn compare_values(key: &str, a: &Value, b: &Value) -> Ordering {
    if key == "date" {
        if let (Some(a), Some(b)) = (
            a.as_str().and_then(parse_date),
            b.as_str().and_then(parse_date),
        ) {
            return a.cmp(&b);
        }
    }

    match (a, b) {
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => {
            let (a, b) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        _ => value_text(a).cmp(&value_text(b)),
    }
}

/// Stable sort by `key`; items without the key always go last
pub fn sort(items: &mut [Value], key: &str, direction: SortDirection) {
    items.sort_by(|a, b| match (a.get(key), b.get(key)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let ordering = compare_values(key, a, b);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
    });
}

/// Slice out a 1-based page
pub fn paginate(items: Vec<Value>, page: usize, limit: usize, data_type: &str) -> Listing {
    let page = page.max(1);
    let limit = limit.max(1);
    let total = items.len();
    let start = (page - 1).saturating_mul(limit);

    let items = items.into_iter().skip(start).take(limit).collect();

    Listing {
        page,
        limit,
        data_type: data_type.to_string(),
        total,
        total_pages: total.div_ceil(limit),
        items,
    }
}

/// Apply search, sort and pagination to a data file's content
pub fn apply(
    data: Value,
    query: &ListingQuery,
    data_type: &str,
    default_limit: usize,
) -> ListingResponse {
    let mut items = match data {
        Value::Array(items) => items,
        other => return ListingResponse::Raw(other),
    };

    if let Some(search_query) = query.search.as_deref().filter(|s| !s.is_empty()) {
        items = search(&items, search_query, DEFAULT_SEARCH_KEYS);
    }

    if let Some(key) = query.sort_by.as_deref().filter(|s| !s.is_empty()) {
        sort(&mut items, key, query.direction());
    }

    let page = parse_number(query.page.as_deref()).unwrap_or(1);
    let limit = parse_number(query.limit.as_deref()).unwrap_or(default_limit);

    ListingResponse::Page(paginate(items, page, limit, data_type))
}

fn parse_number(value: Option<&str>) -> Option<usize> {
    value.and_then(|v| v.trim().parse().ok())
}
