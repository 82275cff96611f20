// src/checker/http.rs
// =============================================================================
// Broken link detection for one page.
//
// Key functionality:
// - Collects every <a href> on the page, resolving relative links against
//   the page URL
// - Sends a HEAD request per link (lightweight, no body download)
// - Status >= 400 or a failed request means the link is broken
//
// Requests run one after another. A broken link becomes an issue string,
// never an error, so one dead link cannot stop the rest of the audit.
// =============================================================================

use crate::crawl::resolve_href;
use crate::fetch::PageSource;
use reqwest::StatusCode;
use scraper::Html;
use tracing::debug;
use url::Url;

use super::html::selector;

// Every href on the page, resolved, in document order
//
// Only http(s) links are returned. mailto:, tel: and javascript: links
// cannot be checked with a HEAD request.
pub fn page_links(document: &Html, page_url: &Url) -> Vec<String> {
    document
        .select(&selector("a[href]"))
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_href(page_url, href))
        .filter(|link| is_checkable_link(link))
        .collect()
}

// Checks each link and returns one issue per broken one
//
// Duplicate hrefs are checked (and reported) once per anchor.
pub async fn check_broken_links(source: &dyn PageSource, links: &[String]) -> Vec<String> {
    let mut issues = Vec::new();

    for link in links {
        if is_broken(source, link).await {
            issues.push(format!("Broken link found: {}", link));
        }
    }

    issues
}

async fn is_broken(source: &dyn PageSource, link: &str) -> bool {
    match source.head_status(link).await {
        Ok(status) => {
            debug!(link, status, "link checked");
            status >= StatusCode::BAD_REQUEST.as_u16()
        }
        Err(e) => {
            debug!(error = %e, "link check failed");
            true
        }
    }
}

fn is_checkable_link(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::fake::FakeWeb;

    #[test]
    fn test_page_links_resolve_against_page_url() {
        let document = Html::parse_document(
            r#"
            <a href="sibling">Sibling</a>
            <a href="/root">Root</a>
            <a href="https://other.org/x">Other</a>
            <a href="mailto:me@example.com">Mail</a>
            "#,
        );
        let page = Url::parse("https://example.com/blog/post").unwrap();

        assert_eq!(
            page_links(&document, &page),
            vec![
                "https://example.com/blog/sibling",
                "https://example.com/root",
                "https://other.org/x",
            ]
        );
    }

    #[tokio::test]
    async fn test_404_is_reported_with_resolved_url() {
        let web = FakeWeb::new()
            .status("https://example.com/missing", 404)
            .status("https://example.com/fine", 200);

        let issues = check_broken_links(
            &web,
            &[
                "https://example.com/missing".to_string(),
                "https://example.com/fine".to_string(),
            ],
        )
        .await;

        assert_eq!(issues, vec!["Broken link found: https://example.com/missing"]);
    }

    #[tokio::test]
    async fn test_network_failure_counts_as_broken() {
        let web = FakeWeb::new();
        let issues = check_broken_links(&web, &["https://down.example/".to_string()]).await;
        assert_eq!(issues, vec!["Broken link found: https://down.example/"]);
    }

    #[tokio::test]
    async fn test_redirects_and_server_errors() {
        let web = FakeWeb::new()
            .status("https://example.com/moved", 301)
            .status("https://example.com/error", 500);

        let issues = check_broken_links(
            &web,
            &[
                "https://example.com/moved".to_string(),
                "https://example.com/error".to_string(),
            ],
        )
        .await;

        assert_eq!(issues, vec!["Broken link found: https://example.com/error"]);
    }
}
