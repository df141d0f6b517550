//! homepage-rs: backend for a personal website
//!
//! This crate resolves named redirect shortcuts, generates the site's
//! sitemap and Atom feed from hand-maintained content records, and serves
//! both alongside a small JSON data API.

pub mod commands;
pub mod config;
pub mod content;
pub mod documents;
pub mod helpers;
pub mod listing;
pub mod llms;
pub mod redirects;
pub mod server;

use anyhow::Result;
use std::path::Path;

/// The site being built or served
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Data directory (content records, redirects, data API files)
    pub data_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Site {
    /// Create a new Site instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let data_dir = base_dir.join(&config.data_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            data_dir,
            public_dir,
        })
    }

    /// Initialize a new site
    pub fn init(&self) -> Result<()> {
        commands::init::run(self)
    }

    /// Generate sitemap, feed and llms.json into the public directory
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Remove generated files
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
