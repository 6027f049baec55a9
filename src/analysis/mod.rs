/// Image analysis module
///
/// This module handles:
/// - Reading a picked file and encoding it as a data URL (encode.rs)
/// - The instruction prompt and response schema (prompt.rs)
/// - The Gemini generateContent client (gemini.rs)
///
/// The UI only talks to the `Analyzer` trait, so the state machine can be
/// driven by a fake in tests.

pub mod encode;
pub mod error;
pub mod gemini;
pub mod prompt;

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

pub use error::AnalysisError;
pub use gemini::GeminiClient;

use crate::state::AnalysisReport;

/// Anything that can turn an encoded image into a report
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// `data_url` is a `data:<mime>;base64,<payload>` URL
    async fn analyze(&self, data_url: &str) -> Result<AnalysisReport, AnalysisError>;
}

/// Read `path`, encode it and run it through `analyzer`
///
/// The read and the analysis run one after the other; nothing is sent if
/// the file cannot be read.
pub async fn analyze_file(
    analyzer: Arc<dyn Analyzer>,
    path: PathBuf,
) -> Result<AnalysisReport, AnalysisError> {
    let image = encode::load_image(path).await?;
    let data_url = image.to_data_url().to_string();

    tracing::info!(file = %image.file_name, "analyzing image");

    analyzer.analyze(&data_url).await
}
