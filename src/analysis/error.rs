/// Errors produced while turning a picked file into an analysis report
///
/// Every variant is terminal for the current attempt. The controller maps
/// them onto user-facing messages in `state::machine`.
use thiserror::Error;

/// Failure of one analysis attempt
///
/// `Clone` so the result can travel inside iced messages; source errors
/// that are not clonable are captured as strings.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalysisError {
    /// The selected file could not be read from disk
    #[error("failed to read image file: {0}")]
    FileRead(String),

    /// The file was read but is not an image format we can send
    #[error("unsupported image format: {0}")]
    UnsupportedImage(String),

    /// The encoded image is not a `data:<mime>;base64,<payload>` URL
    #[error("invalid data URL: {0}")]
    InvalidDataUrl(String),

    /// The request never produced an HTTP response
    #[error("request to analysis service failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("analysis service returned {status}: {body}")]
    Service { status: u16, body: String },

    /// The service answered, but not with a parseable report
    #[error("malformed analysis response: {0}")]
    MalformedResponse(String),
}

impl AnalysisError {
    /// Whether this failure happened before anything was sent
    /// (the user should pick a different file rather than retry)
    pub fn is_local_input(&self) -> bool {
        matches!(
            self,
            AnalysisError::FileRead(_)
                | AnalysisError::UnsupportedImage(_)
                | AnalysisError::InvalidDataUrl(_)
        )
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        AnalysisError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::MalformedResponse(err.to_string())
    }
}
