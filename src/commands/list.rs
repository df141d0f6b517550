//! List site information

use anyhow::Result;

use crate::content::ContentLoader;
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let loader = ContentLoader::new(site);

    match content_type {
        "redirect" | "redirects" => {
            let table = loader.load_redirects()?;
            println!("Redirects ({}):", table.len());
            for record in &table {
                let target = record.url.as_deref().unwrap_or("(default)");
                if record.aliases.is_empty() {
                    println!("  {} -> {}", record.name, target);
                } else {
                    println!(
                        "  {} [{}] -> {}",
                        record.name,
                        record.aliases.join(", "),
                        target
                    );
                }
            }
            for (key, names) in table.duplicate_keys() {
                println!("  ! {:?} is shared by {}", key, names.join(", "));
            }
        }
        "page" | "pages" => {
            let records = loader.load_records()?;
            println!("Pages ({}):", records.len());
            for record in records {
                println!(
                    "  {} - {} [{}]",
                    record.date.as_deref().unwrap_or("----------"),
                    record.title,
                    record.path_or_root()
                );
            }
        }
        "data" => {
            let slugs = loader.data_slugs()?;
            println!("Data files ({}):", slugs.len());
            for slug in slugs {
                println!("  /api/{}", slug);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: redirects, pages, data",
                content_type
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_unknown_type() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert!(run(&site, "posts").is_err());
        assert!(run(&site, "redirects").is_ok());
        assert!(run(&site, "pages").is_ok());
    }
}
