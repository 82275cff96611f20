// src/checker/html.rs
// =============================================================================
// On-page SEO checks that only need the parsed HTML.
//
// Checks (each one is independent and always runs):
// - Title: present and 10-60 characters long
// - Meta description: present and 50-160 characters long
// - Headers: at least one h1/h2/h3, none longer than 70 characters
// - Images: every <img> has a non-empty alt attribute
//
// Lengths are counted in characters, not bytes, so "café" is 4 long.
// =============================================================================

use scraper::{ElementRef, Html, Selector};

pub const TITLE_ISSUE: &str =
    "Meta title is missing or not optimized. Suggested length: 10-60 characters.";
pub const DESCRIPTION_ISSUE: &str =
    "Meta description is missing or not optimized. Suggested length: 50-160 characters.";
pub const NO_HEADERS_ISSUE: &str =
    "No header tags found. Consider adding H1, H2, and H3 tags for better content structure.";
pub const IMAGE_ALT_ISSUE: &str =
    "Some images are missing alt attributes. Add descriptive alt text for better accessibility and SEO.";

const TITLE_LEN: (usize, usize) = (10, 60);
const DESCRIPTION_LEN: (usize, usize) = (50, 160);
const MAX_HEADER_LEN: usize = 70;
const HEADER_PREVIEW_LEN: usize = 50;

// Runs every HTML check and returns the issues in check order
pub fn on_page_issues(document: &Html) -> Vec<String> {
    let mut issues = Vec::new();

    issues.extend(check_title(document));
    issues.extend(check_description(document));
    issues.extend(check_headers(document));
    issues.extend(check_images(document));

    issues
}

pub fn check_title(document: &Html) -> Option<String> {
    let title = document
        .select(&selector("title"))
        .next()
        .map(|element| element_text(&element));

    match title {
        Some(text) if within(&text, TITLE_LEN) => None,
        _ => Some(TITLE_ISSUE.to_string()),
    }
}

// A description tag without a content attribute counts as missing
pub fn check_description(document: &Html) -> Option<String> {
    let content = document
        .select(&selector(r#"meta[name="description"]"#))
        .next()
        .and_then(|element| element.value().attr("content"));

    match content {
        Some(text) if within(text, DESCRIPTION_LEN) => None,
        _ => Some(DESCRIPTION_ISSUE.to_string()),
    }
}

// Either the single "no headers" issue, or one issue per over-long header
pub fn check_headers(document: &Html) -> Vec<String> {
    let headers: Vec<String> = document
        .select(&selector("h1, h2, h3"))
        .map(|element| element_text(&element))
        .collect();

    if headers.is_empty() {
        return vec![NO_HEADERS_ISSUE.to_string()];
    }

    headers
        .iter()
        .filter(|text| text.chars().count() > MAX_HEADER_LEN)
        .map(|text| {
            let preview: String = text.chars().take(HEADER_PREVIEW_LEN).collect();
            format!(
                "Header '{}...' is too long. Suggested length: <{} characters.",
                preview, MAX_HEADER_LEN
            )
        })
        .collect()
}

// One generic issue per image whose alt is missing or empty
pub fn check_images(document: &Html) -> Vec<String> {
    document
        .select(&selector("img"))
        .filter(|img| img.value().attr("alt").map_or(true, str::is_empty))
        .map(|_| IMAGE_ALT_ISSUE.to_string())
        .collect()
}

// Parses a CSS selector that is written in this file
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("selectors in the checker are valid CSS")
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect()
}

fn within(text: &str, (min, max): (usize, usize)) -> bool {
    let len = text.chars().count();
    len >= min && len <= max
}
