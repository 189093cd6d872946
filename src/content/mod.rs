//! Network collaborators for the slideshow.
//!
//! - `summary` - Wikipedia REST summary client
//! - `preload` - fetch and decode slide images

mod preload;
mod summary;

pub use preload::{decode_image, preload_image, ImageError, PreloadedImage, MAX_IMAGE_SIZE};
pub use summary::{
    Summary, SummaryClient, SummaryError, DEFAULT_CLIENT_ID, DEFAULT_SUMMARY_BASE_URL,
};

use futures::StreamExt;
use thiserror::Error;

/// Failure while streaming a response body under a size cap.
#[derive(Debug, Error)]
pub enum LimitedReadError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Response too large (exceeds {0} bytes)")]
    TooLarge(usize),
}

/// Read a response body, failing as soon as it exceeds `limit` bytes.
pub async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, LimitedReadError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len > limit as u64 {
            return Err(LimitedReadError::TooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(LimitedReadError::TooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
