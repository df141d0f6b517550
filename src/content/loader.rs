//! Content loader - reads content records, redirects and data files from the data directory

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::documents::ContentRecord;
use crate::redirects::RedirectTable;
use crate::Site;

/// Errors reading a data file for the data API
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Data file not found for slug: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid JSON in data file {slug}: {source}")]
    Parse {
        slug: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Whether a slug may name a data file (no separators, no dot segments)
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Path of the JSON file behind a data API slug
pub fn data_file_path(data_dir: &Path, slug: &str) -> Result<PathBuf, DataError> {
    if !is_valid_slug(slug) {
        return Err(DataError::NotFound(slug.to_string()));
    }
    Ok(data_dir.join(format!("{}.json", slug)))
}

/// Parse a data file's content
pub fn parse_data(slug: &str, content: &str) -> Result<Value, DataError> {
    serde_json::from_str(content).map_err(|source| DataError::Parse {
        slug: slug.to_string(),
        source,
    })
}

/// Read a JSON or YAML file, chosen by extension
fn read_structured<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let ext = path.extension().and_then(|e| e.to_str());
    let value = match ext {
        Some("yml") | Some("yaml") => serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?,
        _ => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?,
    };
    Ok(value)
}

/// Loads site data from the data directory
pub struct ContentLoader<'a> {
    site: &'a Site,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        Self { site }
    }

    /// Load the pages listed in the sitemap and feed
    ///
    /// A missing file means an empty site.
    pub fn load_records(&self) -> Result<Vec<ContentRecord>> {
        let path = self.site.data_dir.join(&self.site.config.content_file);
        if !path.exists() {
            tracing::warn!("Content file {:?} not found, no pages loaded", path);
            return Ok(Vec::new());
        }

        let records: Vec<ContentRecord> = read_structured(&path)?;
        for record in &records {
            if record.title.trim().is_empty() {
                tracing::warn!("Content record without title at path {:?}", record.path);
            }
        }
        tracing::debug!("Loaded {} content records from {:?}", records.len(), path);
        Ok(records)
    }

    /// Load the redirect table: the configured file, or the built-in table
    pub fn load_redirects(&self) -> Result<RedirectTable> {
        match &self.site.config.redirects_file {
            Some(file) => RedirectTable::load(self.site.data_dir.join(file)),
            None => RedirectTable::builtin(),
        }
    }

    /// Load a data file by slug
    pub fn load_data(&self, slug: &str) -> Result<Value, DataError> {
        let path = data_file_path(&self.site.data_dir, slug)?;
        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DataError::NotFound(slug.to_string()),
            _ => DataError::Io(e),
        })?;
        parse_data(slug, &content)
    }

    /// Slugs of all data files, sorted
    pub fn data_slugs(&self) -> Result<Vec<String>> {
        let dir = &self.site.data_dir;
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut slugs: Vec<String> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(String::from))
            .filter(|slug| is_valid_slug(slug))
            .collect();
        slugs.sort();
        Ok(slugs)
    }

    /// Raw llms.txt, if the site has one
    pub fn read_llms(&self) -> Result<Option<String>> {
        let path = self.site.data_dir.join(&self.site.config.llms_file);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }
}
