/// Image intake: reading a picked file and encoding it as a data URL
///
/// The analysis service only ever sees the base64 payload of a
/// `data:<mime>;base64,<payload>` URL, so everything the UI hands over
/// goes through `DataUrl`.
use base64::{engine::general_purpose::STANDARD, Engine};
use image::ImageFormat;
use std::fmt;
use std::path::{Path, PathBuf};

use super::error::AnalysisError;

/// Media type assumed when a data URL header does not name one
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// Extensions offered by the file picker
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// Formats the analysis service accepts as inline image data
const ACCEPTED_FORMATS: [ImageFormat; 3] = [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::WebP];

/// A user-selected image, held only for the duration of one analysis
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// File name only (e.g., "disc_result.png")
    pub file_name: String,
    /// Detected media type (e.g., "image/png")
    pub mime_type: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    /// Encode the image as an inline base64 data URL
    pub fn to_data_url(&self) -> DataUrl {
        DataUrl {
            mime_type: self.mime_type.clone(),
            payload: STANDARD.encode(&self.bytes),
        }
    }
}

/// A parsed `data:` URL carrying a base64 payload
#[derive(Debug, Clone, PartialEq)]
pub struct DataUrl {
    pub mime_type: String,
    /// Everything after the first comma, untouched
    pub payload: String,
}

impl DataUrl {
    /// Split a data URL into its media type and payload
    ///
    /// Only the scheme and the comma separator are required; a header
    /// without a media type (`data:;base64,...`) falls back to JPEG.
    pub fn parse(url: &str) -> Result<Self, AnalysisError> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| AnalysisError::InvalidDataUrl("missing data: scheme".to_string()))?;

        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| AnalysisError::InvalidDataUrl("missing comma separator".to_string()))?;

        let mime_type = header.split(';').next().unwrap_or_default().trim();
        let mime_type = if mime_type.is_empty() {
            DEFAULT_MIME_TYPE
        } else {
            mime_type
        };

        Ok(DataUrl {
            mime_type: mime_type.to_string(),
            payload: payload.to_string(),
        })
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.payload)
    }
}

/// Read an image file from disk and detect its media type
///
/// The type comes from the magic bytes only; the extension is ignored.
pub async fn load_image(path: PathBuf) -> Result<UploadedImage, AnalysisError> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| AnalysisError::FileRead(format!("{}: {}", path.display(), e)))?;

    if bytes.is_empty() {
        return Err(AnalysisError::UnsupportedImage(format!(
            "{} is empty",
            path.display()
        )));
    }

    let mime_type = detect_mime_type(&path, &bytes)?;

    let file_name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    tracing::info!(
        file = %file_name,
        mime = mime_type,
        size = bytes.len(),
        "loaded image"
    );

    Ok(UploadedImage {
        file_name,
        mime_type: mime_type.to_string(),
        bytes,
    })
}

/// Media type from content; only PNG, JPEG and WEBP are accepted
fn detect_mime_type(path: &Path, bytes: &[u8]) -> Result<&'static str, AnalysisError> {
    let format = image::guess_format(bytes).map_err(|_| {
        AnalysisError::UnsupportedImage(format!("{} is not a recognized image", path.display()))
    })?;

    if !ACCEPTED_FORMATS.contains(&format) {
        return Err(AnalysisError::UnsupportedImage(format!(
            "{} is {}, expected PNG, JPEG or WEBP",
            path.display(),
            format.to_mime_type()
        )));
    }

    Ok(format.to_mime_type())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_parse_data_url() {
        let url = DataUrl::parse("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(url.mime_type, "image/png");
        assert_eq!(url.payload, "iVBORw0KGgo=");
    }

    #[test]
    fn test_parse_keeps_everything_after_first_comma() {
        let url = DataUrl::parse("data:image/jpeg;base64,abc,def").unwrap();
        assert_eq!(url.payload, "abc,def");
    }

    #[test]
    fn test_parse_defaults_mime_type() {
        let url = DataUrl::parse("data:;base64,AAAA").unwrap();
        assert_eq!(url.mime_type, DEFAULT_MIME_TYPE);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(
            DataUrl::parse("iVBORw0KGgo="),
            Err(AnalysisError::InvalidDataUrl(_))
        ));
        assert!(matches!(
            DataUrl::parse("data:image/png;base64"),
            Err(AnalysisError::InvalidDataUrl(_))
        ));
    }

    #[test]
    fn test_uploaded_image_to_data_url() {
        let image = UploadedImage {
            file_name: "a.png".to_string(),
            mime_type: "image/png".to_string(),
            bytes: b"hello".to_vec(),
        };
        assert_eq!(image.to_data_url().to_string(), "data:image/png;base64,aGVsbG8=");
    }

    #[tokio::test]
    async fn test_load_image_sniffs_content() {
        // Misleading extension: content decides
        let mut file = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
        file.write_all(&PNG_MAGIC).unwrap();
        file.write_all(&[0u8; 16]).unwrap();

        let image = load_image(file.path().to_path_buf()).await.unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.bytes.len(), 24);
    }

    async fn load_named(suffix: &str, contents: &[u8]) -> Result<UploadedImage, AnalysisError> {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents).unwrap();
        load_image(file.path().to_path_buf()).await
    }

    #[tokio::test]
    async fn test_load_image_accepts_webp() {
        let mut webp = b"RIFF\x24\x00\x00\x00WEBPVP8 ".to_vec();
        webp.extend_from_slice(&[0u8; 16]);

        let image = load_named(".webp", &webp).await.unwrap();
        assert_eq!(image.mime_type, "image/webp");
    }

    #[tokio::test]
    async fn test_load_image_ignores_image_extension_on_text() {
        for suffix in [".png", ".webp", ".jpg"] {
            let result = load_named(suffix, b"not really an image").await;
            assert!(
                matches!(result, Err(AnalysisError::UnsupportedImage(_))),
                "{} accepted",
                suffix
            );
        }
    }

    #[tokio::test]
    async fn test_load_image_rejects_formats_the_service_cannot_take() {
        let mut bmp = b"BM".to_vec();
        bmp.extend_from_slice(&[0u8; 32]);
        let mut gif = b"GIF89a".to_vec();
        gif.extend_from_slice(&[0u8; 16]);
        let mut tiff = vec![0x49, 0x49, 0x2A, 0x00];
        tiff.extend_from_slice(&[0u8; 16]);

        for (suffix, contents) in [(".bmp", bmp), (".gif", gif), (".png", tiff)] {
            let result = load_named(suffix, &contents).await;
            assert!(
                matches!(result, Err(AnalysisError::UnsupportedImage(_))),
                "{} accepted",
                suffix
            );
        }
    }

    #[tokio::test]
    async fn test_rejected_format_maps_to_reselect_message() {
        let err = load_named(".bmp", b"BM\0\0\0\0\0\0\0\0").await.unwrap_err();
        assert_eq!(crate::state::UserError::from(&err), crate::state::UserError::FileUnreadable);
    }

    #[tokio::test]
    async fn test_load_image_rejects_unknown_content() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"plain text").unwrap();

        let result = load_image(file.path().to_path_buf()).await;
        assert!(matches!(result, Err(AnalysisError::UnsupportedImage(_))));
    }

    #[tokio::test]
    async fn test_load_image_rejects_empty_file() {
        let file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        let result = load_image(file.path().to_path_buf()).await;
        assert!(matches!(result, Err(AnalysisError::UnsupportedImage(_))));
    }

    #[tokio::test]
    async fn test_load_image_missing_file() {
        let result = load_image(PathBuf::from("/nonexistent/path.png")).await;
        assert!(matches!(result, Err(AnalysisError::FileRead(_))));
    }
}
