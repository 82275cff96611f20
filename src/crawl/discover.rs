// src/crawl/discover.rs
// =============================================================================
// The link discoverer: finds the internal links on one page.
//
// How it works:
// 1. Fetch the page through a PageSource
// 2. Parse it with scraper and select every <a href="...">
// 3. Resolve relative hrefs against the base URL
// 4. Keep the link only if it lives on the same site as the base URL
//
// "Same site" means same network location: scheme + host + port. This is
// what `Url::origin()` compares, so http://example.com and
// https://example.com are different sites.
//
// Absolute http(s) hrefs are kept exactly as written. Two hrefs that only
// differ by a trailing slash or a query string are two different links.
// =============================================================================

use crate::fetch::{FetchError, PageSource};
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use url::Url;

/// A set of absolute, same-site URLs. Ordered so output is stable.
pub type LinkSet = BTreeSet<String>;

// Fetches `page_url` and returns every internal link found on it
//
// Parameters:
//   source: where pages come from (real HTTP or a test fake)
//   page_url: the page to read
//   base_url: the site root; relative links resolve against it and only
//             links on its network location are kept
//
// A fetch failure is returned to the caller. It is not an empty set.
pub async fn discover_links(
    source: &dyn PageSource,
    page_url: &str,
    base_url: &str,
) -> Result<LinkSet, FetchError> {
    parse_base(base_url)?;
    let html = source.fetch_html(page_url).await?;
    extract_internal_links(&html, base_url)
}

// Same as discover_links, for HTML that is already in memory
pub fn extract_internal_links(html: &str, base_url: &str) -> Result<LinkSet, FetchError> {
    let base = parse_base(base_url)?;
    Ok(internal_links(html, &base))
}

fn internal_links(html: &str, base: &Url) -> LinkSet {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").expect("'a[href]' is a valid selector");

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_href(base, href))
        .filter(|link| same_network_location(base, link))
        .collect()
}

fn parse_base(base_url: &str) -> Result<Url, FetchError> {
    Url::parse(base_url).map_err(|e| FetchError::InvalidUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

// Resolves an href the way a browser would, with one twist: hrefs that are
// already absolute http(s) URLs are returned untouched.
//
// Examples (base = "https://example.com/page"):
//   "/docs"                 -> Some("https://example.com/docs")
//   "../other"              -> Some("https://example.com/other")
//   "https://other.com"     -> Some("https://other.com")
//   "mailto:me@example.com" -> Some("mailto:me@example.com")
pub(crate) fn resolve_href(base: &Url, href: &str) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }

    base.join(href).ok().map(|url| url.to_string())
}

// True when `link` parses and shares the base URL's scheme, host and port
fn same_network_location(base: &Url, link: &str) -> bool {
    match Url::parse(link) {
        Ok(url) => url.origin() == base.origin(),
        Err(_) => false,
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why BTreeSet instead of HashSet?
//    - Both remove duplicates
//    - BTreeSet keeps its items sorted, so the links print in the same
//      order every run (handy for diffs and tests)
//
// 2. What is `&dyn PageSource`?
//    - A reference to "some type that implements PageSource"
//    - The exact type is decided at runtime (HttpSource or a test fake)
//
// 3. What does filter_map do?
//    - It runs a closure returning Option and keeps only the Some values
//    - Here it drops anchors without href and hrefs that fail to resolve
// -----------------------------------------------------------------------------
