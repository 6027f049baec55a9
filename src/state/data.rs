/// Shared data structures for the application state
///
/// `AnalysisReport` is exactly what the analysis service returns; it flows
/// from the client into the state machine and on to the report view.
use serde::{Deserialize, Serialize};

/// A structured psychological report produced by one analysis call
///
/// Immutable once received and discarded on reset.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Whether the image was recognized as a personality-test result.
    /// Earlier DISC-only responses call this `isDiscImage`.
    #[serde(alias = "isDiscImage")]
    pub is_personality_test: bool,
    /// Test system the screenshot belongs to (e.g., "DISC", "MBTI")
    #[serde(default)]
    pub test_type: String,
    /// Short evocative label (e.g., "睿智的战略家")
    pub overall_title: String,
    /// Long-form narrative portrait
    pub summary: String,
    /// Behavioral traits, in the order the model listed them
    pub traits: Vec<String>,
    pub strengths: Vec<String>,
    pub growth_areas: Vec<String>,
    pub interpersonal_advice: String,
    pub career_advice: String,
}

impl AnalysisReport {
    /// Parse the model's JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json.trim())
    }

    /// Whether the report may be shown to the user
    pub fn is_valid(&self) -> bool {
        self.is_personality_test
    }

    /// Label for the report badge, falling back when the model left it blank
    pub fn test_label(&self) -> &str {
        let label = self.test_type.trim();
        if label.is_empty() {
            "性格测评"
        } else {
            label
        }
    }
}
