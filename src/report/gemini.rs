// src/report/gemini.rs
// =============================================================================
// A small client for Google's Gemini `generateContent` REST endpoint.
//
// Request shape:
//   POST {base_url}/models/{model}:generateContent
//   x-goog-api-key: <key>
//   { "systemInstruction": {...}, "contents": [...], "generationConfig": {...} }
//
// The reply's first candidate holds the report as one or more text parts.
// They are joined in order.
// =============================================================================

use super::{AgentBrief, ReportError, ReportRequester};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    brief: AgentBrief,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, brief: AgentBrief) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            brief,
        }
    }

    /// Point the client at a proxy or a different API version.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Reuse a configured client (timeout, user agent) instead of the default one.
    pub fn with_http_client(mut self, http_client: Client) -> Self {
        self.http_client = http_client;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn build_request(&self, prompt: &str) -> GenerateRequest {
        GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part::text(self.brief.system_instruction())],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::text(prompt)],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        }
    }
}

#[async_trait]
impl ReportRequester for GeminiClient {
    async fn request_report(&self, prompt: &str) -> Result<String, ReportError> {
        if self.api_key.is_empty() {
            return Err(ReportError::Config("Gemini API key is empty".into()));
        }

        let start = Instant::now();

        let response = self
            .http_client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&self.build_request(prompt))
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Gemini request failed");
                ReportError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Gemini API error");
            return Err(ReportError::Api(format!("HTTP {}: {}", status, error_text)));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ReportError::Parse(e.to_string()))?;

        debug!(
            model = %self.model,
            duration_ms = start.elapsed().as_millis(),
            "Gemini report generated"
        );

        first_candidate_text(body)
    }
}

fn first_candidate_text(body: GenerateResponse) -> Result<String, ReportError> {
    let candidate = body
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ReportError::Api("no candidates in Gemini response".into()))?;

    let text: String = candidate
        .content
        .map(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    if text.is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".into());
        return Err(ReportError::Api(format!(
            "Gemini returned no text (finish reason: {})",
            reason
        )));
    }

    Ok(text)
}

// -----------------------------------------------------------------------------
// Wire types
// -----------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    text: Option<String>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::SEO_EXPERT;

    #[test]
    fn test_client_builder() {
        let client = GeminiClient::new("key", "gemini-test", SEO_EXPERT)
            .with_base_url("https://proxy.example.com/v1/")
            .with_temperature(0.5);

        assert_eq!(
            client.endpoint(),
            "https://proxy.example.com/v1/models/gemini-test:generateContent"
        );
        assert_eq!(client.temperature, 0.5);
    }

    #[test]
    fn test_request_body_shape() {
        let client = GeminiClient::new("key", DEFAULT_MODEL, SEO_EXPERT);
        let body = serde_json::to_value(client.build_request("audit this")).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "audit this");
        assert!(body["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .starts_with("You are an SEO Expert."));
        assert!(body["systemInstruction"].get("role").is_none());
        assert!((body["generationConfig"]["temperature"].as_f64().unwrap() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_text_parts_are_joined() {
        let body: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Part one. "},{"text":"Part two."}]},"finishReason":"STOP"}]}"#,
        )
        .unwrap();

        assert_eq!(first_candidate_text(body).unwrap(), "Part one. Part two.");
    }

    #[test]
    fn test_empty_or_blocked_responses_are_errors() {
        let none: GenerateResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(matches!(first_candidate_text(none), Err(ReportError::Api(_))));

        let blocked: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        let err = first_candidate_text(blocked).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[tokio::test]
    async fn test_shared_client_timeout_applies_to_the_report() {
        use crate::fetch::HttpSource;
        use std::time::Duration;
        use tokio::net::TcpListener;

        // Accepts connections and never answers
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            let mut open = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                open.push(socket);
            }
        });

        let source = HttpSource::new(Some(Duration::from_millis(200))).unwrap();
        let client = GeminiClient::new("key", DEFAULT_MODEL, SEO_EXPERT)
            .with_base_url(base)
            .with_http_client(source.client());

        let result = tokio::time::timeout(Duration::from_secs(5), client.request_report("prompt"))
            .await
            .expect("the request should time out on its own");

        assert!(matches!(result, Err(ReportError::Network(_))));
    }

    #[tokio::test]
    async fn test_empty_key_fails_before_any_request() {
        let client = GeminiClient::new("", DEFAULT_MODEL, SEO_EXPERT)
            .with_base_url("http://127.0.0.1:9");
        let result = client.request_report("prompt").await;
        assert!(matches!(result, Err(ReportError::Config(_))));
    }
}
