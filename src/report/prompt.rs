// src/report/prompt.rs
//
// Builds the task text handed to the report writer.

use super::AgentBrief;
use crate::site::SiteAudit;
use std::fmt::Write;

pub fn compose_task_prompt(audit: &SiteAudit, brief: &AgentBrief) -> String {
    let mut prompt = String::new();

    // Writing into a String cannot fail, so the fmt::Results are ignored
    let _ = writeln!(
        prompt,
        "Crawl the target website {} and all its internal links to analyze content and \
         identify high-impact keywords that can improve search engine rankings. Additionally, \
         identify elements that might be decreasing SEO rankings and provide content replacements.",
        audit.target
    );
    let _ = writeln!(
        prompt,
        "Write a detailed report listing the most effective keywords, actionable recommendations \
         for SEO improvements, and content replacement suggestions."
    );

    let links: Vec<&str> = audit.links.iter().map(String::as_str).collect();
    let _ = writeln!(prompt, "The following internal links were crawled:");
    let _ = writeln!(prompt, "{}", links.join(", "));

    if !audit.issues.is_empty() {
        let _ = writeln!(prompt, "\nThe following on-page SEO issues were detected:");
        for (url, issues) in &audit.issues {
            let _ = writeln!(prompt, "- {}", url);
            for issue in issues {
                let _ = writeln!(prompt, "  - {}", issue);
            }
        }
    }

    if !audit.unreachable.is_empty() {
        let _ = writeln!(prompt, "\nThese pages could not be fetched:");
        for (url, reason) in &audit.unreachable {
            let _ = writeln!(prompt, "- {} ({})", url, reason);
        }
    }

    if !audit.keywords.is_empty() {
        let words: Vec<String> = audit
            .keywords
            .iter()
            .map(|k| format!("{} ({})", k.word, k.count))
            .collect();
        let _ = writeln!(prompt, "\nMost frequent words across the site:");
        let _ = writeln!(prompt, "{}", words.join(", "));
    }

    let _ = write!(prompt, "\nExpected output: {}", brief.expected_output);

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::KeywordCount;
    use crate::crawl::LinkSet;
    use crate::report::SEO_EXPERT;
    use crate::site::IssueReport;
    use std::collections::BTreeMap;

    fn sample_audit() -> SiteAudit {
        let mut issues = IssueReport::new();
        issues.insert(
            "https://example.com/b".to_string(),
            vec!["Broken link found: https://example.com/gone".to_string()],
        );

        SiteAudit {
            target: "https://example.com/".to_string(),
            links: LinkSet::from([
                "https://example.com/a".to_string(),
                "https://example.com/b".to_string(),
            ]),
            issues,
            unreachable: BTreeMap::new(),
            keywords: vec![KeywordCount {
                word: "coffee".to_string(),
                count: 7,
            }],
        }
    }

    #[test]
    fn test_prompt_contains_target_links_and_issues() {
        let prompt = compose_task_prompt(&sample_audit(), &SEO_EXPERT);

        assert!(prompt.starts_with("Crawl the target website https://example.com/ "));
        assert!(prompt.contains("https://example.com/a, https://example.com/b"));
        assert!(prompt.contains("- https://example.com/b\n  - Broken link found: https://example.com/gone"));
        assert!(prompt.contains("coffee (7)"));
        assert!(prompt.ends_with(SEO_EXPERT.expected_output));
    }

    #[test]
    fn test_empty_sections_are_left_out() {
        let mut audit = sample_audit();
        audit.issues.clear();
        audit.keywords.clear();

        let prompt = compose_task_prompt(&audit, &SEO_EXPERT);

        assert!(!prompt.contains("issues were detected"));
        assert!(!prompt.contains("could not be fetched"));
        assert!(!prompt.contains("Most frequent words"));
    }
}
