// src/site.rs
// =============================================================================
// Ties the crawler and the auditor together for one website.
//
// Steps:
// 1. Collect the internal links of the target (see crawl/)
// 2. Audit every link, one at a time (see checker/)
// 3. Keep the issues of pages that have any, and remember pages that
//    could not be read at all
//
// The result is a plain data structure that can be printed as a table,
// serialized to JSON, or turned into a prompt for the report writer.
// =============================================================================

use crate::checker::{audit_page, merge_keywords, KeywordCount};
use crate::crawl::{crawl_site, LinkSet};
use crate::fetch::{FetchError, PageSource};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

/// URL -> issues. Only pages with at least one issue appear here.
pub type IssueReport = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Copy)]
pub struct AuditOptions {
    /// 1 = only the target's direct links
    pub max_depth: usize,
    /// How many site-wide keywords to keep
    pub top_keywords: usize,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            max_depth: 1,
            top_keywords: 20,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteAudit {
    pub target: String,
    pub links: LinkSet,
    pub issues: IssueReport,
    /// Pages that could not be fetched, with the reason
    pub unreachable: BTreeMap<String, String>,
    /// Site-wide keyword totals, most frequent first
    pub keywords: Vec<KeywordCount>,
}

impl SiteAudit {
    /// Number of issues across all pages
    pub fn issue_count(&self) -> usize {
        self.issues.values().map(Vec::len).sum()
    }

    /// True when every page was reachable and had no issues
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty() && self.unreachable.is_empty()
    }
}

// Audits the target site
//
// Only a failure to read the target itself is an error. Individual pages
// that fail end up in `unreachable`.
pub async fn audit_site(
    source: &dyn PageSource,
    target: &str,
    options: AuditOptions,
) -> Result<SiteAudit, FetchError> {
    let links = crawl_site(source, target, options.max_depth).await?;

    let mut issues = IssueReport::new();
    let mut unreachable = BTreeMap::new();
    let mut page_keywords = Vec::new();

    for link in &links {
        match audit_page(source, link).await {
            Ok(audit) => {
                if !audit.issues.is_empty() {
                    issues.insert(audit.url, audit.issues);
                }
                page_keywords.push(audit.keywords);
            }
            Err(e) => {
                warn!(error = %e, "failed to perform SEO checks");
                unreachable.insert(link.clone(), e.to_string());
            }
        }
    }

    let mut keywords = merge_keywords(page_keywords.iter().map(Vec::as_slice));
    keywords.truncate(options.top_keywords);

    Ok(SiteAudit {
        target: target.to_string(),
        links,
        issues,
        unreachable,
        keywords,
    })
}
