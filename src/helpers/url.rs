//! URL helper functions

/// Join a site-relative path onto a base URL with exactly one separating slash
///
/// # Examples
/// ```ignore
/// full_url_for("https://x.test/", "/about") // -> "https://x.test/about"
/// full_url_for("https://x.test", "")        // -> "https://x.test/"
/// ```
pub fn full_url_for(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim().trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", base)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Site-relative form of a path: always starts with exactly one slash
pub fn url_for(path: &str) -> String {
    full_url_for("", path)
}

/// Whether the string starts with a URI scheme (`https:`, `mailto:`, ...)
pub fn has_scheme(url: &str) -> bool {
    match url.find(':') {
        Some(0) | None => false,
        Some(idx) => {
            let scheme = &url[..idx];
            scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
    }
}

/// Whether the URL points to another site over http(s)
pub fn is_external(url: &str) -> bool {
    url.starts_with("http")
}
