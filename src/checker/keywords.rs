// src/checker/keywords.rs
// =============================================================================
// A raw keyword counter.
//
// The page text is lower-cased and split on whitespace. A token counts only
// if every character in it is alphabetic, so "rust" counts but "rust," and
// "2024" do not. There is no stemming and no stop-word list.
// =============================================================================

use scraper::Html;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub word: String,
    pub count: usize,
}

// Counts the keywords in a parsed page, most frequent first
pub fn count_keywords(document: &Html) -> Vec<KeywordCount> {
    // Text nodes are joined with a space so "<p>a</p><p>b</p>" is two words
    let text = document
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in text.split_whitespace() {
        if word.chars().all(char::is_alphabetic) {
            *counts.entry(word).or_insert(0) += 1;
        }
    }

    rank(counts.into_iter().map(|(word, count)| KeywordCount {
        word: word.to_string(),
        count,
    }))
}

// Adds several keyword lists together (used for site-wide totals)
pub fn merge_keywords<'a>(lists: impl IntoIterator<Item = &'a [KeywordCount]>) -> Vec<KeywordCount> {
    let mut totals: HashMap<&str, usize> = HashMap::new();
    for list in lists {
        for keyword in list {
            *totals.entry(keyword.word.as_str()).or_insert(0) += keyword.count;
        }
    }

    rank(totals.into_iter().map(|(word, count)| KeywordCount {
        word: word.to_string(),
        count,
    }))
}

// Highest count first; ties broken alphabetically so output is stable
fn rank(keywords: impl Iterator<Item = KeywordCount>) -> Vec<KeywordCount> {
    let mut ranked: Vec<KeywordCount> = keywords.collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(word: &str, count: usize) -> KeywordCount {
        KeywordCount {
            word: word.to_string(),
            count,
        }
    }

    #[test]
    fn test_counts_lowercased_alphabetic_words() {
        let document = Html::parse_document(
            "<title>Rust Guide</title><p>rust is fast. Rust 2024 rust-lang</p>",
        );
        let keywords = count_keywords(&document);

        assert_eq!(keywords[0], kw("rust", 3));
        assert!(keywords.contains(&kw("guide", 1)));
        assert!(keywords.contains(&kw("is", 1)));
        // "fast." has punctuation, "2024" is a number, "rust-lang" has a dash
        assert!(!keywords.iter().any(|k| k.word.starts_with("fast")));
        assert!(!keywords.iter().any(|k| k.word == "2024"));
    }

    #[test]
    fn test_adjacent_elements_do_not_merge_words() {
        let document = Html::parse_document("<p>alpha</p><p>beta</p>");
        let keywords = count_keywords(&document);
        assert_eq!(keywords, vec![kw("alpha", 1), kw("beta", 1)]);
    }

    #[test]
    fn test_merge_sums_and_ranks() {
        let first = vec![kw("seo", 2), kw("rust", 1)];
        let second = vec![kw("rust", 4), kw("audit", 1)];

        let merged = merge_keywords([first.as_slice(), second.as_slice()]);

        assert_eq!(merged, vec![kw("rust", 5), kw("seo", 2), kw("audit", 1)]);
    }
}
