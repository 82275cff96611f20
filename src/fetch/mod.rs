// src/fetch/mod.rs
// =============================================================================
// This module is the only place that talks to the network on behalf of the
// crawler and the auditor.
//
// Everything else asks a `PageSource` for two things:
// - the HTML body of a page (GET)
// - the status code of a link (HEAD)
//
// The real implementation uses reqwest (see http.rs). Tests plug in an
// in-memory fake so no test needs an internet connection.
//
// Rust concepts:
// - Traits: A shared interface that several types can implement
// - thiserror: Derive macro that turns an enum into a proper error type
// =============================================================================

mod http;

pub use http::HttpSource;

use async_trait::async_trait;
use thiserror::Error;

// Why a page (or link) could not be fetched
//
// Callers get this back instead of an empty result, so they can tell
// "no issues found" apart from "page unreachable".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The URL could not be parsed or resolved
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Connection, DNS, TLS or timeout failure
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    /// The server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Where pages come from.
///
/// Both methods are async because the real source does network I/O.
/// `Send + Sync` lets the source be shared behind a reference across awaits.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches a page and returns its body. Non-2xx answers are errors.
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError>;

    /// Sends a HEAD request and returns the status code, whatever it is.
    async fn head_status(&self, url: &str) -> Result<u16, FetchError>;
}
