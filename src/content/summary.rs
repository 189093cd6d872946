use super::{read_limited_bytes, LimitedReadError};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Wikipedia REST API root; summaries live under `/page/summary/<title>`.
pub const DEFAULT_SUMMARY_BASE_URL: &str = "https://en.wikipedia.org/api/rest_v1";

/// Client identifier sent with every summary request.
pub const DEFAULT_CLIENT_ID: &str = "AstroBlog/1.0";

/// Wikimedia asks browser-style clients to identify themselves with this header.
const CLIENT_ID_HEADER: &str = "Api-User-Agent";

const MAX_SUMMARY_SIZE: usize = 1024 * 1024; // 1MB

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    #[error("Malformed summary payload: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid summary URL: {0}")]
    InvalidUrl(String),
    #[error("Insecure base URL: HTTPS required (except localhost for testing)")]
    InsecureBaseUrl,
    #[error("Empty subject title")]
    EmptyTitle,
    #[error("Background task failed: {0}")]
    Interrupted(String),
}

impl From<LimitedReadError> for SummaryError {
    fn from(e: LimitedReadError) -> Self {
        match e {
            LimitedReadError::Network(e) => SummaryError::Network(e),
            LimitedReadError::TooLarge(limit) => SummaryError::ResponseTooLarge(limit),
        }
    }
}

/// Short encyclopedia synopsis for one subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// HTML-formatted extract.
    pub extract_html: String,
    /// Canonical desktop page for the "full article" link.
    pub page_url: String,
}

#[derive(Deserialize)]
struct SummaryPayload {
    #[serde(default)]
    extract_html: String,
    content_urls: ContentUrls,
}

#[derive(Deserialize)]
struct ContentUrls {
    desktop: PageUrls,
}

#[derive(Deserialize)]
struct PageUrls {
    page: String,
}

impl From<SummaryPayload> for Summary {
    fn from(payload: SummaryPayload) -> Self {
        Self {
            extract_html: payload.extract_html,
            page_url: payload.content_urls.desktop.page,
        }
    }
}

/// Client for the summary endpoint.
///
/// Cheap to clone: the inner `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct SummaryClient {
    http: reqwest::Client,
    base_url: Url,
    client_id: String,
}

impl SummaryClient {
    /// Build a client against `base_url`.
    ///
    /// HTTPS is required, except for `http://localhost` and
    /// `http://127.0.0.1` which are allowed for testing.
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        client_id: impl Into<String>,
    ) -> Result<Self, SummaryError> {
        let base = Url::parse(base_url)
            .map_err(|e| SummaryError::InvalidUrl(format!("{base_url}: {e}")))?;

        if base.scheme() != "https" {
            let is_localhost = base.scheme() == "http"
                && matches!(base.host_str(), Some("localhost" | "127.0.0.1" | "[::1]"));
            if !is_localhost {
                tracing::error!(base_url = %base, "Rejecting non-HTTPS summary base URL");
                return Err(SummaryError::InsecureBaseUrl);
            }
            tracing::warn!(base_url = %base, "Using non-HTTPS summary base URL (localhost only)");
        }

        Ok(Self {
            http,
            base_url: base,
            client_id: client_id.into(),
        })
    }

    /// Endpoint for one subject. The title becomes a single percent-encoded
    /// path segment, so `/`, `?` and `#` inside it cannot escape.
    pub fn summary_url(&self, title: &str) -> Result<Url, SummaryError> {
        if title.is_empty() {
            return Err(SummaryError::EmptyTitle);
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SummaryError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("page")
            .push("summary")
            .push(title);
        Ok(url)
    }

    /// Fetch the summary for `title`. One request, no retry.
    pub async fn fetch(&self, title: &str) -> Result<Summary, SummaryError> {
        let url = self.summary_url(title)?;
        tracing::debug!(title, url = %url, "Fetching summary");

        let response = self
            .http
            .get(url)
            .header(CLIENT_ID_HEADER, &self.client_id)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SummaryError::HttpStatus(response.status().as_u16()));
        }

        let bytes = read_limited_bytes(response, MAX_SUMMARY_SIZE).await?;
        let payload: SummaryPayload = serde_json::from_slice(&bytes)?;
        Ok(payload.into())
    }
}
