use super::{read_limited_bytes, LimitedReadError};
use crate::catalog::CatalogSource;
use image::{GenericImageView, ImageFormat, ImageReader};
use std::io::Cursor;
use thiserror::Error;

/// Largest image body accepted by a preload.
pub const MAX_IMAGE_SIZE: usize = 50 * 1024 * 1024; // 50MB

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Failed to read image file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("Image too large (exceeds {0} bytes)")]
    TooLarge(usize),
    #[error("Not a recognized image format")]
    NotAnImage,
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Invalid image location: {0}")]
    InvalidSource(String),
    #[error("Background task failed: {0}")]
    Interrupted(String),
}

impl From<LimitedReadError> for ImageError {
    fn from(e: LimitedReadError) -> Self {
        match e {
            LimitedReadError::Network(e) => ImageError::Network(e),
            LimitedReadError::TooLarge(limit) => ImageError::TooLarge(limit),
        }
    }
}

/// A slide image that was fetched and decoded successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreloadedImage {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

/// Fetch an image fully and decode it.
///
/// A preload either resolves to `Ok` (the image can be shown) or to exactly
/// one `ImageError`. Decoding runs on the blocking pool.
pub async fn preload_image(
    client: &reqwest::Client,
    source: &CatalogSource,
) -> Result<PreloadedImage, ImageError> {
    let bytes = match source {
        CatalogSource::File(path) => {
            let meta = tokio::fs::metadata(path).await?;
            if !meta.is_file() {
                return Err(ImageError::InvalidSource(path.display().to_string()));
            }
            if meta.len() > MAX_IMAGE_SIZE as u64 {
                return Err(ImageError::TooLarge(MAX_IMAGE_SIZE));
            }
            tokio::fs::read(path).await?
        }
        CatalogSource::Remote(url) => {
            let response = client.get(url.clone()).send().await?;
            if !response.status().is_success() {
                return Err(ImageError::HttpStatus(response.status().as_u16()));
            }
            read_limited_bytes(response, MAX_IMAGE_SIZE).await?
        }
    };

    let size = bytes.len();
    let image = tokio::task::spawn_blocking(move || decode_image(&bytes))
        .await
        .map_err(|e| ImageError::Interrupted(e.to_string()))??;

    tracing::debug!(
        source = %source,
        format = ?image.format,
        width = image.width,
        height = image.height,
        bytes = size,
        "Image preloaded"
    );
    Ok(image)
}

/// Decode an in-memory image, guessing its format from the content.
pub fn decode_image(bytes: &[u8]) -> Result<PreloadedImage, ImageError> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    let format = reader.format().ok_or(ImageError::NotAnImage)?;
    let (width, height) = reader.decode()?.dimensions();
    Ok(PreloadedImage {
        format,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([12, 18, 40]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_decode_png_and_jpeg() {
        let png = decode_image(&encoded(3, 2, ImageFormat::Png)).unwrap();
        assert_eq!(
            png,
            PreloadedImage {
                format: ImageFormat::Png,
                width: 3,
                height: 2
            }
        );

        let jpeg = decode_image(&encoded(8, 8, ImageFormat::Jpeg)).unwrap();
        assert_eq!(jpeg.format, ImageFormat::Jpeg);
        assert_eq!((jpeg.width, jpeg.height), (8, 8));
    }

    #[test]
    fn test_decode_rejects_text() {
        assert!(matches!(
            decode_image(b"<html><body>404</body></html>"),
            Err(ImageError::NotAnImage)
        ));
        assert!(matches!(decode_image(b""), Err(ImageError::NotAnImage)));
    }

    #[test]
    fn test_decode_rejects_signature_without_image_data() {
        let result = decode_image(b"\x89PNG\r\n\x1a\nthis is not image data at all");
        assert!(matches!(result, Err(ImageError::Decode(_))));
    }

    #[test]
    fn test_decode_rejects_truncated_png() {
        let png = encoded(16, 16, ImageFormat::Png);
        let result = decode_image(&png[..png.len() / 2]);
        assert!(matches!(result, Err(ImageError::Decode(_))));
    }

    #[tokio::test]
    async fn test_preload_remote_png() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/images/m31.png"))
            .respond_with(
                ResponseTemplate::new(200).set_body_bytes(encoded(4, 3, ImageFormat::Png)),
            )
            .mount(&mock_server)
            .await;

        let source =
            CatalogSource::parse(&format!("{}/images/m31.png", mock_server.uri())).unwrap();
        let image = preload_image(&reqwest::Client::new(), &source)
            .await
            .unwrap();
        assert_eq!(image.format, ImageFormat::Png);
        assert_eq!((image.width, image.height), (4, 3));
    }

    #[tokio::test]
    async fn test_preload_remote_404() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let source =
            CatalogSource::parse(&format!("{}/images/missing.png", mock_server.uri())).unwrap();
        let result = preload_image(&reqwest::Client::new(), &source).await;
        assert!(matches!(result, Err(ImageError::HttpStatus(404))));
    }

    #[tokio::test]
    async fn test_preload_remote_not_an_image() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let source =
            CatalogSource::parse(&format!("{}/images/m42.jpg", mock_server.uri())).unwrap();
        let result = preload_image(&reqwest::Client::new(), &source).await;
        assert!(matches!(result, Err(ImageError::NotAnImage)));
    }

    #[tokio::test]
    async fn test_preload_remote_corrupt_png() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(b"\x89PNG\r\n\x1a\nthis is not image data at all".to_vec()),
            )
            .mount(&mock_server)
            .await;

        let source =
            CatalogSource::parse(&format!("{}/images/m42.png", mock_server.uri())).unwrap();
        let result = preload_image(&reqwest::Client::new(), &source).await;
        assert!(matches!(result, Err(ImageError::Decode(_))));
    }

    #[tokio::test]
    async fn test_preload_missing_file() {
        let source = CatalogSource::parse("/tmp/astroslide_no_such_image.png").unwrap();
        let result = preload_image(&reqwest::Client::new(), &source).await;
        assert!(matches!(result, Err(ImageError::Io(_))));
    }

    #[tokio::test]
    async fn test_preload_file_png() {
        let dir = std::env::temp_dir().join("astroslide_image_test_png");
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("m45.png");
        std::fs::write(&file, encoded(2, 2, ImageFormat::Png)).unwrap();

        let source = CatalogSource::File(file);
        let image = preload_image(&reqwest::Client::new(), &source)
            .await
            .unwrap();
        assert_eq!(image.format, ImageFormat::Png);

        std::fs::remove_dir_all(&dir).ok();
    }
}
