use super::types::Catalog;
use crate::content::{read_limited_bytes, LimitedReadError};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

/// Catalog location used when neither the CLI nor the config file names one.
pub const DEFAULT_CATALOG_SOURCE: &str = "assets/data.json";

const MAX_CATALOG_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Errors that can occur while loading the slide catalog.
///
/// The UI folds every variant into one fixed message; the variants exist
/// for logging and tests.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("Catalog too large (exceeds {0} bytes)")]
    TooLarge(usize),
    #[error("Malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid catalog source: {0}")]
    InvalidSource(String),
    #[error("Background task failed: {0}")]
    Interrupted(String),
}

impl From<LimitedReadError> for CatalogError {
    fn from(e: LimitedReadError) -> Self {
        match e {
            LimitedReadError::Network(e) => CatalogError::Network(e),
            LimitedReadError::TooLarge(limit) => CatalogError::TooLarge(limit),
        }
    }
}

// ============================================================================
// Catalog Source
// ============================================================================

/// Where the catalog (and any relative reference inside it) lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Local file, relative paths resolve against the working directory.
    File(PathBuf),
    /// Remote http(s) resource.
    Remote(Url),
}

impl CatalogSource {
    /// Parse a user-supplied location.
    ///
    /// `http://` and `https://` become [`CatalogSource::Remote`], `file://`
    /// URLs and bare paths become [`CatalogSource::File`]. Any other scheme
    /// is rejected.
    pub fn parse(location: &str) -> Result<Self, CatalogError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(CatalogError::InvalidSource("empty location".to_string()));
        }

        let Some((scheme, _)) = location.split_once("://") else {
            return Ok(Self::File(PathBuf::from(location)));
        };

        match scheme.to_ascii_lowercase().as_str() {
            "http" | "https" => Url::parse(location)
                .map(Self::Remote)
                .map_err(|e| CatalogError::InvalidSource(format!("{location}: {e}"))),
            "file" => Url::parse(location)
                .ok()
                .and_then(|u| u.to_file_path().ok())
                .map(Self::File)
                .ok_or_else(|| CatalogError::InvalidSource(location.to_string())),
            other => Err(CatalogError::InvalidSource(format!(
                "unsupported scheme '{other}' (only http, https and file are allowed)"
            ))),
        }
    }

    /// Resolve a reference found inside the catalog, such as a slide's image
    /// location, against this source.
    ///
    /// Absolute URLs stand on their own. Relative references join onto a
    /// remote catalog's URL, or stay relative to the working directory for a
    /// local catalog (the site-root layout of `assets/data.json`).
    pub fn resolve(&self, reference: &str) -> Result<Self, CatalogError> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(CatalogError::InvalidSource("empty reference".to_string()));
        }
        if reference.contains("://") {
            return Self::parse(reference);
        }
        match self {
            Self::Remote(base) => base
                .join(reference)
                .map(Self::Remote)
                .map_err(|e| CatalogError::InvalidSource(format!("{reference}: {e}"))),
            Self::File(_) => Ok(Self::File(PathBuf::from(reference))),
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => write!(f, "{url}"),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Load the slide catalog once.
///
/// Issues a single GET (or a single file read). A non-2xx status, transport
/// failure, oversized body or anything that is not a JSON array of slides is
/// an error. There is no retry.
pub async fn load_catalog(
    client: &reqwest::Client,
    source: &CatalogSource,
) -> Result<Catalog, CatalogError> {
    let bytes = match source {
        CatalogSource::File(path) => {
            let meta = tokio::fs::metadata(path).await?;
            if meta.len() > MAX_CATALOG_SIZE as u64 {
                return Err(CatalogError::TooLarge(MAX_CATALOG_SIZE));
            }
            tokio::fs::read(path).await?
        }
        CatalogSource::Remote(url) => {
            let response = client.get(url.clone()).send().await?;
            if !response.status().is_success() {
                return Err(CatalogError::HttpStatus(response.status().as_u16()));
            }
            read_limited_bytes(response, MAX_CATALOG_SIZE).await?
        }
    };

    let catalog: Catalog = serde_json::from_slice(&bytes)?;
    tracing::info!(source = %source, slides = catalog.len(), "Loaded slide catalog");
    Ok(catalog)
}
