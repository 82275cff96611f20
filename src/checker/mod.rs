// src/checker/mod.rs
// =============================================================================
// The page auditor: runs every SEO heuristic against one page.
//
// Submodules:
// - html: title, description, header and image checks
// - http: broken link checks (HEAD requests)
// - keywords: raw keyword counter
//
// Order of the issue list = order the checks run in:
//   title, description, headers, images, broken links
//
// The HTML is parsed and inspected first, then the document is dropped
// before any HEAD request is awaited. scraper's `Html` is not `Send`, so
// it must not live across an `.await`.
// =============================================================================

mod html;
mod http;
mod keywords;

pub use keywords::{merge_keywords, KeywordCount};

pub(crate) use http::check_broken_links;

use crate::fetch::{FetchError, PageSource};
use scraper::Html;
use serde::Serialize;
use tracing::info;
use url::Url;

/// Everything the auditor learned about one page.
#[derive(Debug, Clone, Serialize)]
pub struct PageAudit {
    pub url: String,
    /// Human-readable issues, in check order
    pub issues: Vec<String>,
    /// Keyword counts, most frequent first
    pub keywords: Vec<KeywordCount>,
}

// The parts of a page that can be computed without the network
struct PageFacts {
    issues: Vec<String>,
    links: Vec<String>,
    keywords: Vec<KeywordCount>,
}

// Fetches and audits one page
//
// If the page itself cannot be fetched no check runs and the error is
// returned. Broken links on the page are issues, not errors.
pub async fn audit_page(source: &dyn PageSource, url: &str) -> Result<PageAudit, FetchError> {
    let page_url = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    info!(url, "auditing");
    let body = source.fetch_html(url).await?;

    let PageFacts {
        mut issues,
        links,
        keywords,
    } = inspect(&body, &page_url);

    issues.extend(check_broken_links(source, &links).await);

    Ok(PageAudit {
        url: url.to_string(),
        issues,
        keywords,
    })
}

fn inspect(body: &str, page_url: &Url) -> PageFacts {
    let document = Html::parse_document(body);

    PageFacts {
        issues: html::on_page_issues(&document),
        links: http::page_links(&document, page_url),
        keywords: keywords::count_keywords(&document),
    }
}
