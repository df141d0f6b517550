//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::documents::{Author, FeedMeta};
use crate::helpers::full_url_for;
use crate::redirects::DestinationConfig;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,
    pub email: Option<String>,

    // URL
    pub url: String,
    pub default_redirect_base: String,
    pub not_found_path: String,

    // Directory
    pub data_dir: String,
    pub public_dir: String,

    // Sources
    pub content_file: String,
    /// Replaces the built-in redirect table when set
    pub redirects_file: Option<String>,
    pub llms_file: String,

    // Output
    pub feed_path: String,
    pub sitemap_path: String,
    pub render_markdown: bool,

    // Data API
    pub listing_limit: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Dennis Muensterer".to_string(),
            author: "Dennis Muensterer".to_string(),
            email: None,

            url: "https://muensterer.tech".to_string(),
            default_redirect_base: "https://dnnsmnstrr.github.io".to_string(),
            not_found_path: "/redirects".to_string(),

            data_dir: "data".to_string(),
            public_dir: "public".to_string(),

            content_file: "pages.json".to_string(),
            redirects_file: None,
            llms_file: "llms.txt".to_string(),

            feed_path: "feed.xml".to_string(),
            sitemap_path: "sitemap.xml".to_string(),
            render_markdown: true,

            listing_limit: 50,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Destination settings for the redirect resolver
    pub fn destination(&self) -> DestinationConfig {
        DestinationConfig {
            default_base: self.default_redirect_base.clone(),
            not_found_path: self.not_found_path.clone(),
        }
    }

    /// Feed metadata derived from the site settings
    pub fn feed_meta(&self) -> FeedMeta {
        FeedMeta {
            title: self.title.clone(),
            author: Author {
                name: self.author.clone(),
                email: self.email.clone(),
            },
            feed_url: full_url_for(&self.url, &self.feed_path),
            site_url: self.url.trim_end_matches('/').to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.data_dir, "data");
        assert_eq!(config.listing_limit, 50);
        assert!(config.redirects_file.is_none());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Site
author: Test User
email: test@example.com
url: https://x.test/
listing_limit: 20
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Site");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.listing_limit, 20);
        // untouched fields keep their defaults
        assert_eq!(config.feed_path, "feed.xml");
    }

    #[test]
    fn test_feed_meta() {
        let config = SiteConfig {
            url: "https://x.test/".to_string(),
            ..SiteConfig::default()
        };
        let meta = config.feed_meta();
        assert_eq!(meta.site_url, "https://x.test");
        assert_eq!(meta.feed_url, "https://x.test/feed.xml");
        assert_eq!(meta.author.name, "Dennis Muensterer");
    }
}
