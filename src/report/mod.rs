// src/report/mod.rs
// =============================================================================
// This module turns a finished site audit into a written SEO report.
//
// Submodules:
// - prompt: builds the task text from the audit results
// - gemini: sends the text to Google's Gemini API
//
// The report writer is treated as a black box: it gets one prompt and
// returns free text. Nothing here interprets the answer.
// =============================================================================

mod gemini;
mod prompt;

pub use gemini::{GeminiClient, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
pub use prompt::compose_task_prompt;

use async_trait::async_trait;
use thiserror::Error;

/// Printed on its own line right before the report.
pub const BANNER: &str = "######################";

/// Errors from the report writer.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Missing API key or invalid settings
    #[error("configuration error: {0}")]
    Config(String),

    /// Connection failed or timed out
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response, or a response with no text in it
    #[error("API error: {0}")]
    Api(String),

    /// The response body was not the JSON we expected
    #[error("parse error: {0}")]
    Parse(String),
}

/// Anything that can write a report from a prompt.
#[async_trait]
pub trait ReportRequester: Send + Sync {
    async fn request_report(&self, prompt: &str) -> Result<String, ReportError>;
}

/// The persona the report writer is asked to play.
#[derive(Debug, Clone, Copy)]
pub struct AgentBrief {
    pub role: &'static str,
    pub goal: &'static str,
    pub backstory: &'static str,
    pub expected_output: &'static str,
}

impl AgentBrief {
    /// Instructions sent ahead of the task prompt
    pub fn system_instruction(&self) -> String {
        format!(
            "You are an {}.\n\nYour goal: {}\n\n{}",
            self.role, self.goal, self.backstory
        )
    }
}

pub const SEO_EXPERT: AgentBrief = AgentBrief {
    role: "SEO Expert",
    goal: "Crawl the target website and its internal links to suggest the most effective \
           keywords and provide suggestions for improving SEO.",
    backstory: "You are a highly skilled SEO professional with a deep understanding of search \
                engine algorithms, keyword research, and on-page optimization techniques. Your \
                expertise lies in analyzing website content, crawling through web pages and \
                internal links, and identifying high-impact keywords that can significantly boost \
                a website's visibility in search engine results. Your suggestions are backed by \
                advanced SEO techniques and tools, ensuring that the keywords recommended are not \
                only relevant but also competitive and effective in driving organic traffic. \
                Additionally, you provide content replacements for elements that might be \
                decreasing SEO rankings.",
    expected_output: "A detailed SEO report with at least 10 bullet points on high-impact \
                      keywords, actionable SEO recommendations, and content replacement \
                      suggestions.",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_instruction_mentions_persona() {
        let text = SEO_EXPERT.system_instruction();
        assert!(text.starts_with("You are an SEO Expert."));
        assert!(text.contains("Your goal: Crawl the target website"));
        assert!(text.contains("content replacements"));
    }
}
