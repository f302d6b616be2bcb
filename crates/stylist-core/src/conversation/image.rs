//! Inline image encoding for multi-modal requests.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;

use super::message::ImageRef;
use crate::constants::images;
use crate::error::{Result, StylistError};

/// Read the referenced image and return its bytes as standard base64, with no
/// data-URI prefix. An unreadable reference is an error, never an empty string.
pub async fn encode_image(image: &ImageRef) -> Result<String> {
    let path = image.to_path();
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| StylistError::image(image.as_str(), e))?;

    tracing::debug!(image = %image, bytes = bytes.len(), "Encoded image attachment");

    Ok(BASE64_STANDARD.encode(bytes))
}

/// `data:image/jpeg;base64,<encoded>`
pub fn jpeg_data_uri(encoded: &str) -> String {
    format!("data:{};base64,{}", images::JPEG_MIME, encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_encode_reads_raw_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shirt.jpg");
        std::fs::write(&path, [0xFFu8, 0xD8, 0xFF, 0xE0]).unwrap();

        let encoded = encode_image(&ImageRef::new(path.to_string_lossy()))
            .await
            .unwrap();
        assert_eq!(encoded, "/9j/4A==");
    }

    #[tokio::test]
    async fn test_encode_accepts_file_uri() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wool sweater.jpg");
        std::fs::write(&path, b"abc").unwrap();

        let uri = format!("file://{}", path.to_string_lossy().replace(' ', "%20"));
        assert_eq!(encode_image(&ImageRef::new(uri)).await.unwrap(), "YWJj");
    }

    #[tokio::test]
    async fn test_encode_accepts_localhost_file_uri() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("linen.jpg");
        std::fs::write(&path, b"abc").unwrap();

        let uri = format!("file://localhost{}", path.to_string_lossy());
        assert_eq!(encode_image(&ImageRef::new(uri)).await.unwrap(), "YWJj");
    }

    #[tokio::test]
    async fn test_missing_image_is_an_error() {
        let err = encode_image(&ImageRef::new("/definitely/not/here.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, StylistError::Image { .. }));
    }

    #[test]
    fn test_data_uri_prefix() {
        assert_eq!(jpeg_data_uri("YWJj"), "data:image/jpeg;base64,YWJj");
    }
}
