// src/crawl/queue.rs
// =============================================================================
// This module collects the set of internal pages to audit.
//
// Default behaviour (max_depth = 1):
// - Discover the links on the seed page and stop there
// - Pages found on those links are NOT crawled further
//
// With max_depth > 1 the crawl goes breadth-first:
// 1. Put the seed's links in a queue at depth 1
// 2. Pop a page; if it is shallower than max_depth, discover its links
// 3. Links never seen before join the result and the back of the queue
// 4. Repeat until the queue is empty
//
// Every page is fetched at most once, so cycles between pages terminate.
// Requests are made one after another, never in parallel.
// =============================================================================

use super::discover::{discover_links, LinkSet};
use crate::fetch::{FetchError, PageSource};
use std::collections::{HashSet, VecDeque};
use tracing::{info, warn};
use url::Url;

// Represents a page in the crawl queue
#[derive(Debug, Clone)]
struct CrawlItem {
    url: String,
    depth: usize, // How many link hops from the seed page
}

// Crawls a website starting from `seed`
//
// Parameters:
//   source: where pages come from
//   seed: the target URL; also the base for the seed's relative links
//   max_depth: how many link hops to follow (0 and 1 both mean one hop)
//
// Returns: every internal link found, or the error if the seed page itself
// could not be read. Failures on deeper pages are logged and skipped.
pub async fn crawl_site(
    source: &dyn PageSource,
    seed: &str,
    max_depth: usize,
) -> Result<LinkSet, FetchError> {
    info!(url = seed, "discovering links");
    let mut links = discover_links(source, seed, seed).await?;

    if max_depth <= 1 {
        return Ok(links);
    }

    // Track fetched pages so nothing is read twice. The seed goes in both as
    // typed and as parsed: "https://x.com" comes back from links as "https://x.com/".
    let mut visited = HashSet::new();
    visited.insert(seed.to_string());
    if let Ok(url) = Url::parse(seed) {
        visited.insert(url.to_string());
    }

    let mut queue: VecDeque<CrawlItem> = links
        .iter()
        .map(|url| CrawlItem {
            url: url.clone(),
            depth: 1,
        })
        .collect();

    while let Some(item) = queue.pop_front() {
        if item.depth >= max_depth || !visited.insert(item.url.clone()) {
            continue;
        }

        info!(url = %item.url, depth = item.depth, "crawling");

        // Inner pages share the seed's network location, so they can act as
        // their own base: relative links resolve against the page itself.
        match discover_links(source, &item.url, &item.url).await {
            Ok(found) => {
                for link in found {
                    if links.insert(link.clone()) {
                        queue.push_back(CrawlItem {
                            url: link,
                            depth: item.depth + 1,
                        });
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "skipping page during crawl");
            }
        }
    }

    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::fake::FakeWeb;

    fn site_with_cycle() -> FakeWeb {
        FakeWeb::new()
            .page("https://example.com/", r#"<a href="/a">A</a>"#)
            .page(
                "https://example.com/a",
                r#"<a href="/b">B</a><a href="/">Home</a>"#,
            )
            .page(
                "https://example.com/b",
                r#"<a href="/a">A</a><a href="/c">C</a>"#,
            )
            .page("https://example.com/c", "<p>leaf</p>")
    }

    #[tokio::test]
    async fn test_depth_one_only_reads_the_seed() {
        let web = site_with_cycle();
        let links = crawl_site(&web, "https://example.com/", 1).await.unwrap();

        assert_eq!(links, LinkSet::from(["https://example.com/a".to_string()]));
        assert_eq!(web.fetched(), vec!["https://example.com/"]);
    }

    #[tokio::test]
    async fn test_depth_two_follows_one_more_hop() {
        let web = site_with_cycle();
        let links = crawl_site(&web, "https://example.com/", 2).await.unwrap();

        assert!(links.contains("https://example.com/a"));
        assert!(links.contains("https://example.com/b"));
        assert!(links.contains("https://example.com/"));
        assert!(!links.contains("https://example.com/c"));
    }

    #[tokio::test]
    async fn test_cycles_terminate_and_pages_are_fetched_once() {
        let web = site_with_cycle();
        let links = crawl_site(&web, "https://example.com/", 10).await.unwrap();

        assert!(links.contains("https://example.com/c"));

        let fetched = web.fetched();
        let unique: HashSet<_> = fetched.iter().collect();
        assert_eq!(fetched.len(), unique.len());
    }

    #[tokio::test]
    async fn test_seed_without_trailing_slash_is_not_fetched_again() {
        let web = FakeWeb::new()
            .page("https://example.com", r#"<a href="/a">A</a>"#)
            .page("https://example.com/", r#"<a href="/a">A</a>"#)
            .page("https://example.com/a", r#"<a href="/">Home</a>"#);

        let links = crawl_site(&web, "https://example.com", 3).await.unwrap();

        assert!(links.contains("https://example.com/"));
        assert_eq!(web.fetched(), vec!["https://example.com", "https://example.com/a"]);
    }

    #[tokio::test]
    async fn test_unreachable_seed_is_an_error() {
        let web = FakeWeb::new();
        let result = crawl_site(&web, "https://example.com/", 1).await;
        assert!(matches!(result, Err(FetchError::Network { .. })));
    }

    #[tokio::test]
    async fn test_broken_inner_page_is_skipped() {
        let web = FakeWeb::new()
            .page(
                "https://example.com/",
                r#"<a href="/gone">Gone</a><a href="/ok">Ok</a>"#,
            )
            .status("https://example.com/gone", 404)
            .page("https://example.com/ok", r#"<a href="/deeper">Deeper</a>"#);

        let links = crawl_site(&web, "https://example.com/", 2).await.unwrap();

        assert!(links.contains("https://example.com/gone"));
        assert!(links.contains("https://example.com/deeper"));
    }
}
