// src/crawl/mod.rs
// =============================================================================
// This module finds the pages of the target site.
//
// Submodules:
// - discover: reads one page and returns its same-site links
// - queue: builds the full link set (one hop by default, more on request)
//
// Why only same-site links?
// - The audit is about one website; external pages are not ours to fix
// - Broken external links are still reported by the page auditor
// =============================================================================

mod discover;
mod queue;

// Re-export the public API
pub use discover::LinkSet;
pub use queue::crawl_site;

pub(crate) use discover::resolve_href;
