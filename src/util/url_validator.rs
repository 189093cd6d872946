use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum UrlValidationError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    #[error("URL has no host")]
    MissingHost,
}

/// Check a URL before handing it to the system browser.
///
/// Article links come from a remote API, so anything other than an
/// absolute http(s) URL with a host (`javascript:`, `file:`, custom
/// handlers) is refused.
///
/// ```
/// use astroslide::util::validate_url_for_open;
///
/// assert!(validate_url_for_open("https://en.wikipedia.org/wiki/Orion_Nebula").is_ok());
/// assert!(validate_url_for_open("file:///etc/passwd").is_err());
/// ```
pub fn validate_url_for_open(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }

    if !matches!(url.host_str(), Some(host) if !host.is_empty()) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(url)
}
