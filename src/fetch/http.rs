// src/fetch/http.rs
// =============================================================================
// The real PageSource, backed by reqwest.
//
// Key functionality:
// - GET a page and hand back its body (non-2xx is an error)
// - HEAD a link and hand back its status code
// - Turn reqwest errors into short, readable FetchError messages
//
// Two clients share the same settings. Page fetches (and the Gemini
// report) follow redirects; HEAD checks do not, so a 301 is reported as a
// 301 and not as whatever the chain ends in. Requests are made one at a
// time by the callers.
// =============================================================================

use super::{FetchError, PageSource};
use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    head_client: Client,
}

impl HttpSource {
    // Builds the clients.
    //
    // timeout: None keeps reqwest's defaults (no overall request timeout)
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: builder(timeout).build()?,
            head_client: builder(timeout).redirect(Policy::none()).build()?,
        })
    }

    /// The redirect-following client, for other requests in the same run
    pub fn client(&self) -> Client {
        self.client.clone()
    }
}

fn builder(timeout: Option<Duration>) -> ClientBuilder {
    let builder = Client::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));

    match timeout {
        Some(timeout) => builder.timeout(timeout),
        None => builder,
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        debug!(url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| categorize_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| categorize_error(url, e))
    }

    async fn head_status(&self, url: &str) -> Result<u16, FetchError> {
        debug!(url, "HEAD");

        let response = self
            .head_client
            .head(url)
            .send()
            .await
            .map_err(|e| categorize_error(url, e))?;

        Ok(response.status().as_u16())
    }
}

// Categorizes the different ways a reqwest call can fail
//
// The message ends up in logs and in the JSON "unreachable" map, so it
// should be short enough to read at a glance.
fn categorize_error(url: &str, error: reqwest::Error) -> FetchError {
    let error_string = error.to_string();

    if error.is_builder() {
        return FetchError::InvalidUrl {
            url: url.to_string(),
            reason: error_string,
        };
    }

    let message = if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_redirect() {
        "too many redirects".to_string()
    } else if error.is_connect() {
        if error_string.contains("dns") {
            "could not resolve hostname".to_string()
        } else {
            "connection failed".to_string()
        }
    } else if error_string.contains("certificate") || error_string.contains("ssl") {
        "SSL certificate error".to_string()
    } else {
        error_string
    };

    FetchError::Network {
        url: url.to_string(),
        message,
    }
}
