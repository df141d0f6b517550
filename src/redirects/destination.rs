//! Destination URLs for resolved redirects

use serde::{Deserialize, Serialize};

use super::Resolution;
use crate::helpers::{full_url_for, has_scheme};

/// Where unresolved and url-less redirects point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationConfig {
    /// Base for redirects without an explicit url
    pub default_base: String,
    /// Destination for tokens that match nothing
    pub not_found_path: String,
}

/// Destination for a resolution
///
/// An explicit record url is returned verbatim. Records without one point
/// at `default_base/name`; misses point at the not-found path.
pub fn build_destination(resolution: Resolution<'_>, config: &DestinationConfig) -> String {
    match resolution {
        Resolution::NotFound => config.not_found_path.clone(),
        Resolution::Found(record) => match &record.url {
            Some(url) => url.clone(),
            None => format!(
                "{}/{}",
                config.default_base.trim_end_matches('/'),
                record.name
            ),
        },
    }
}

/// Make a destination safe to send as a `Location` header
///
/// URLs with a scheme and site-relative paths are kept. Bare fragments such
/// as `github/dotfiles` are joined onto the default base, which handles them
/// as redirects of its own.
pub fn qualify(destination: &str, default_base: &str) -> String {
    if has_scheme(destination) || destination.starts_with('/') {
        destination.to_string()
    } else {
        full_url_for(default_base, destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redirects::RedirectRecord;

    fn config() -> DestinationConfig {
        DestinationConfig {
            default_base: "https://x.test".to_string(),
            not_found_path: "/redirects".to_string(),
        }
    }

    #[test]
    fn test_explicit_url_verbatim() {
        let record = RedirectRecord::new("site").with_url("https://example.com");
        assert_eq!(
            build_destination(Resolution::Found(&record), &config()),
            "https://example.com"
        );

        let record = RedirectRecord::new("now").with_url("zettelkasten/now");
        assert_eq!(
            build_destination(Resolution::Found(&record), &config()),
            "zettelkasten/now"
        );
    }

    #[test]
    fn test_synthesized_url() {
        let record = RedirectRecord::new("github");
        assert_eq!(
            build_destination(Resolution::Found(&record), &config()),
            "https://x.test/github"
        );

        let mut trailing = config();
        trailing.default_base = "https://x.test/".to_string();
        assert_eq!(
            build_destination(Resolution::Found(&record), &trailing),
            "https://x.test/github"
        );
    }

    #[test]
    fn test_not_found() {
        assert_eq!(build_destination(Resolution::NotFound, &config()), "/redirects");
    }

    #[test]
    fn test_qualify() {
        let base = "https://x.test";
        assert_eq!(qualify("https://example.com", base), "https://example.com");
        assert_eq!(qualify("mailto:a@b.c", base), "mailto:a@b.c");
        assert_eq!(qualify("/feed.xml", base), "/feed.xml");
        assert_eq!(qualify("github/dotfiles", base), "https://x.test/github/dotfiles");
        assert_eq!(
            qualify("contact?Subject=Hi%21", base),
            "https://x.test/contact?Subject=Hi%21"
        );
    }
}
