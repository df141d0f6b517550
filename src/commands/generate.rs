//! Generate sitemap, feed and llms.json

use anyhow::Result;
use chrono::Utc;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::fs;
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::content::{ContentLoader, MarkdownRenderer};
use crate::documents::{self, BodyRenderer, ContentRecord, PassThrough};
use crate::llms;
use crate::Site;

/// Sitemap for the site's content records, in file order
pub fn sitemap_xml(site: &Site, records: &[ContentRecord]) -> String {
    documents::build_sitemap(records, &site.config.url)
}

/// Atom feed for the site's content records, newest first
pub fn feed_xml(site: &Site, records: &[ContentRecord]) -> String {
    let mut sorted = records.to_vec();
    documents::sort_by_date_desc(&mut sorted);

    let markdown = MarkdownRenderer::with_base_url(&site.config.url);
    let renderer: &dyn BodyRenderer = if site.config.render_markdown {
        &markdown
    } else {
        &PassThrough
    };

    documents::build_atom_feed_with(&sorted, &site.config.feed_meta(), Utc::now(), renderer)
}

fn write_output(site: &Site, relative: &str, content: &str) -> Result<()> {
    let output_path = site.public_dir.join(relative.trim_start_matches('/'));
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_path, content)?;
    tracing::info!("Generated {}", relative);
    Ok(())
}

/// Generate all documents into the public directory
pub fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();
    let loader = ContentLoader::new(site);

    let records = loader.load_records()?;
    tracing::info!("Loaded {} pages", records.len());

    let redirects = loader.load_redirects()?;
    for (key, names) in redirects.duplicate_keys() {
        tracing::warn!(
            "Redirect key {:?} is claimed by {}; {:?} wins",
            key,
            names.join(", "),
            names[0]
        );
    }

    fs::create_dir_all(&site.public_dir)?;

    write_output(site, &site.config.sitemap_path, &sitemap_xml(site, &records))?;
    write_output(site, &site.config.feed_path, &feed_xml(site, &records))?;

    if let Some(text) = loader.read_llms()? {
        match llms::parse(&text) {
            Ok(doc) => write_output(site, "llms.json", &serde_json::to_string_pretty(&doc)?)?,
            Err(e) => tracing::warn!("Skipping llms.json: {}", e),
        }
    }

    let duration = start.elapsed();
    tracing::info!("Completed in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Regenerate whenever the data directory or the config changes
pub async fn watch(site: &Site) -> Result<()> {
    let base_dir = site.base_dir.clone();
    let data_dir = site.data_dir.clone();

    tokio::task::spawn_blocking(move || watch_blocking(&base_dir, &data_dir)).await?
}

fn watch_blocking(base_dir: &Path, data_dir: &Path) -> Result<()> {
    let (tx, rx) = channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    if data_dir.exists() {
        debouncer
            .watcher()
            .watch(data_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", data_dir);
    }

    let config_path = base_dir.join("_config.yml");
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                for event in &events {
                    tracing::info!("File changed: {}", event.path.display());
                }

                // config may have changed, so reload the site too
                match Site::new(base_dir).and_then(|site| run(&site)) {
                    Ok(()) => tracing::info!("Regenerated successfully"),
                    Err(e) => tracing::error!("Generation failed: {}", e),
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}
