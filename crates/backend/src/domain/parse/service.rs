use chrono::Utc;
use contracts::parse::{is_http_url, ParseFormData, ParseResult};
use scraper::{Html, Selector};
use thiserror::Error;

/// Headings kept in a page summary
pub const MAX_HEADINGS: usize = 10;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("URL is not a valid http(s) address: {0}")]
    InvalidUrl(String),

    #[error("{url} responded with HTTP {status}")]
    Upstream { status: u16, url: String },

    #[error("Failed to fetch page: {0}")]
    Fetch(String),
}

/// Fetch the page at `data.url` and summarize it
pub async fn parse_page(
    client: &reqwest::Client,
    data: &ParseFormData,
) -> Result<ParseResult, ParseError> {
    let url = data.url.trim();
    if !is_http_url(url) {
        return Err(ParseError::InvalidUrl(url.to_string()));
    }

    let resp = client
        .get(url)
        .header("Accept", "text/html,application/xhtml+xml")
        .send()
        .await
        .map_err(|e| ParseError::Fetch(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ParseError::Upstream {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let html = resp
        .text()
        .await
        .map_err(|e| ParseError::Fetch(e.to_string()))?;

    Ok(extract_page_summary(url, &html))
}

/// Collapse runs of whitespace; empty text counts as absent
fn clean_text(text: &str) -> Option<String> {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    (!text.is_empty()).then_some(text)
}

fn first_text(document: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    document
        .select(&sel)
        .find_map(|el| clean_text(&el.text().collect::<String>()))
}

fn first_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    document
        .select(&sel)
        .find_map(|el| el.value().attr(attr).and_then(clean_text))
}

/// Title, description, leading h1/h2 headings and link count of a page
pub fn extract_page_summary(url: &str, html: &str) -> ParseResult {
    let document = Html::parse_document(html);

    let title = first_text(&document, "title")
        .or_else(|| first_attr(&document, r#"meta[property="og:title"]"#, "content"));
    let description = first_attr(&document, r#"meta[name="description"]"#, "content")
        .or_else(|| first_attr(&document, r#"meta[property="og:description"]"#, "content"));

    let headings = Selector::parse("h1, h2")
        .map(|sel| {
            document
                .select(&sel)
                .filter_map(|el| clean_text(&el.text().collect::<String>()))
                .take(MAX_HEADINGS)
                .collect()
        })
        .unwrap_or_default();

    let links_count = Selector::parse("a[href]")
        .map(|sel| document.select(&sel).count())
        .unwrap_or(0);

    ParseResult {
        url: url.to_string(),
        title,
        description,
        headings,
        links_count,
        fetched_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!doctype html>
<html>
<head>
  <title>  Example   Domain </title>
  <meta name="description" content="An example page">
  <meta property="og:title" content="OG title">
</head>
<body>
  <h1>Main heading</h1>
  <p>Text with <a href="/one">one</a> and <a>anchor without href</a>.</p>
  <h2>First
      section</h2>
  <h3>Not collected</h3>
  <h2>   </h2>
  <a href="https://example.org">two</a>
</body>
</html>"#;

    #[test]
    fn test_extract_page_summary() {
        let summary = extract_page_summary("https://example.com", PAGE);
        assert_eq!(summary.url, "https://example.com");
        assert_eq!(summary.title.as_deref(), Some("Example Domain"));
        assert_eq!(summary.description.as_deref(), Some("An example page"));
        assert_eq!(summary.headings, vec!["Main heading", "First section"]);
        assert_eq!(summary.links_count, 2);
    }

    #[test]
    fn test_open_graph_fallbacks() {
        let html = r#"<html><head>
            <meta property="og:title" content="Shared title">
            <meta property="og:description" content="Shared description">
        </head><body></body></html>"#;
        let summary = extract_page_summary("https://example.com", html);
        assert_eq!(summary.title.as_deref(), Some("Shared title"));
        assert_eq!(summary.description.as_deref(), Some("Shared description"));
        assert!(summary.headings.is_empty());
        assert_eq!(summary.links_count, 0);
    }

    #[test]
    fn test_headings_are_capped() {
        let body: String = (0..15).map(|i| format!("<h2>Heading {i}</h2>")).collect();
        let html = format!("<html><body>{body}</body></html>");
        let summary = extract_page_summary("https://example.com", &html);
        assert_eq!(summary.headings.len(), MAX_HEADINGS);
        assert_eq!(summary.headings[9], "Heading 9");
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected_before_fetch() {
        let client = reqwest::Client::new();
        let data = ParseFormData {
            url: "ftp://example.com/file".to_string(),
        };
        let err = parse_page(&client, &data).await.unwrap_err();
        assert!(matches!(err, ParseError::InvalidUrl(_)));
    }
}
