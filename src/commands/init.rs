//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::Site;

const CONFIG_TEMPLATE: &str = r#"# Site configuration

# Site
title: My Homepage
author: John Doe
email:

# URL
url: http://example.com
# redirects without a url point to <default_redirect_base>/<name>
default_redirect_base: http://example.com
# where unknown redirect tokens are sent
not_found_path: /redirects

# Directory
data_dir: data
public_dir: public

# Sources (relative to data_dir)
content_file: pages.json
redirects_file: redirects.yml
llms_file: llms.txt

# Output (relative to public_dir)
feed_path: feed.xml
sitemap_path: sitemap.xml
render_markdown: true

# Data API
listing_limit: 50
"#;

const PAGES_TEMPLATE: &str = r#"[
  { "name": "Home", "path": "/" },
  { "name": "About", "path": "/about", "description": "Who I am and what I do" },
  { "name": "Uses", "path": "/uses", "description": "Tools and devices I use" }
]
"#;

const REDIRECTS_TEMPLATE: &str = r#"# name, optional description, optional url, optional aliases.
# The first record matching a token wins.
- name: github
  url: https://github.com
  aliases: [gh, code]
- name: help
  aliases: ["?", list]
"#;

const LLMS_TEMPLATE: &str = r#"# My Homepage

> A personal website.

## Pages
- [About](http://example.com/about): Who I am
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let data_dir = target_dir.join("data");
    fs::create_dir_all(&data_dir)?;
    fs::create_dir_all(target_dir.join("public"))?;

    write_if_missing(&target_dir.join("_config.yml"), CONFIG_TEMPLATE)?;
    write_if_missing(&data_dir.join("pages.json"), PAGES_TEMPLATE)?;
    write_if_missing(&data_dir.join("redirects.yml"), REDIRECTS_TEMPLATE)?;
    write_if_missing(&data_dir.join("llms.txt"), LLMS_TEMPLATE)?;

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        tracing::info!("Keeping existing {:?}", path);
        return Ok(());
    }
    fs::write(path, content)?;
    tracing::debug!("Created {:?}", path);
    Ok(())
}

/// Run the init command with an existing Site instance
pub fn run(site: &Site) -> Result<()> {
    init_site(&site.base_dir)
}
