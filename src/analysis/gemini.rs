/// Google Gemini `generateContent` client
///
/// One request per picked image: the instruction prompt, the inline image
/// payload and a strict response schema. The model's JSON text is parsed
/// straight into an `AnalysisReport`; no retries, no client-side timeout.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::encode::DataUrl;
use super::error::AnalysisError;
use super::prompt;
use super::Analyzer;
use crate::config::Settings;
use crate::state::AnalysisReport;

/// Response media type that switches Gemini into structured output
const JSON_MIME_TYPE: &str = "application/json";

/// Longest slice of an error body kept in `AnalysisError::Service`
const MAX_ERROR_BODY: usize = 500;

pub struct GeminiClient {
    http: reqwest::Client,
    settings: Settings,
}

impl GeminiClient {
    pub fn new(settings: Settings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }

    /// Full URL of the generateContent method for the configured model
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }

    /// Assemble the request body for one image
    pub fn build_request(&self, image: &DataUrl) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: prompt::instruction(&self.settings.language),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type.clone(),
                            data: image.payload.clone(),
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                temperature: self.settings.temperature,
                response_mime_type: JSON_MIME_TYPE.to_string(),
                response_schema: prompt::response_schema(),
                thinking_config: self
                    .settings
                    .thinking_budget
                    .map(|thinking_budget| ThinkingConfig { thinking_budget }),
            },
        }
    }
}

#[async_trait]
impl Analyzer for GeminiClient {
    async fn analyze(&self, data_url: &str) -> Result<AnalysisReport, AnalysisError> {
        let image = DataUrl::parse(data_url)?;
        let request = self.build_request(&image);

        tracing::debug!(
            endpoint = %self.endpoint(),
            mime = %image.mime_type,
            payload_len = image.payload.len(),
            "sending analysis request"
        );

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.settings.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AnalysisError::Service {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        let text = parsed.into_text()?;

        tracing::debug!(len = text.len(), "received structured response");

        Ok(AnalysisReport::from_json(&text)?)
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    response_mime_type: String,
    response_schema: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
    /// Thought summaries are not part of the answer
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Answer text of the first candidate, or why there is none
    fn into_text(self) -> Result<String, AnalysisError> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            let reason = self
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "no candidates".to_string());
            return Err(AnalysisError::MalformedResponse(reason));
        };

        let text: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter(|part| !part.thought)
            .filter_map(|part| part.text)
            .collect();

        if text.trim().is_empty() {
            let reason = candidate
                .finish_reason
                .unwrap_or_else(|| "empty".to_string());
            return Err(AnalysisError::MalformedResponse(format!(
                "no text in response ({})",
                reason
            )));
        }

        Ok(text)
    }
}
