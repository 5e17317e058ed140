//! URL parsing contracts.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// HTTP/HTTPS URL: scheme, a host (domain, `localhost` or IPv4), optional
/// port, optional path/query/fragment without whitespace.
pub const HTTP_URL_PATTERN: &str = r"^https?://(?:localhost|\d{1,3}(?:\.\d{1,3}){3}|(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,})(?::\d{1,5})?(?:[/?#]\S*)?$";

pub static HTTP_URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(HTTP_URL_PATTERN).expect("HTTP_URL_PATTERN is a valid regex"));

pub fn is_http_url(value: &str) -> bool {
    HTTP_URL_REGEX.is_match(value)
}

/// Value emitted by the parse form and posted to `/api/parse`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseFormData {
    pub url: String,
}

/// Summary of a fetched page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub headings: Vec<String>,
    pub links_count: usize,
    pub fetched_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https_urls() {
        for url in [
            "http://example.com",
            "https://example.com/",
            "https://sub.example.co.uk/path/to/page?q=1&x=y#top",
            "http://localhost:3000/api",
            "http://127.0.0.1/index.html",
            "https://my-site.io:8443",
        ] {
            assert!(is_http_url(url), "{url} should match");
        }
    }

    #[test]
    fn rejects_other_values() {
        for url in [
            "",
            "example.com",
            "ftp://example.com",
            "https://",
            "https://exa mple.com",
            "https://example",
            "javascript:alert(1)",
            "https://-bad.com",
        ] {
            assert!(!is_http_url(url), "{url} should not match");
        }
    }
}
