use serde::Serialize;

use crate::rubric::domain::parameter_registry::ParameterRegistry;
use crate::rubric::domain::score_card::ScoreCard;

pub const TRANSCRIPTION_FAILED_FEEDBACK: &str = "Analysis failed due to transcription error.";
pub const TRANSCRIPTION_FAILED_OBSERVATION: &str =
    "Analysis could not be completed because transcription failed.";
pub const DEFAULT_SCORING_FEEDBACK: &str =
    "कॉल विश्लेषण डिफ़ॉल्ट स्कोरिंग पैरामीटर का उपयोग करके पूरा किया गया।";
pub const DEFAULT_SCORING_OBSERVATION: &str =
    "विस्तृत विश्लेषण करने में असमर्थ। डिफ़ॉल्ट स्कोरिंग लागू की गई।";

/// Everything the caller gets back for one call. Failures are encoded here
/// rather than returned as errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub scores: ScoreCard,
    pub overall_feedback: String,
    pub observation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,
}

impl EvaluationResult {
    /// All-zero result for a call whose transcript could not be obtained.
    pub fn transcription_failed(registry: &ParameterRegistry, reason: &str) -> Self {
        Self {
            scores: ScoreCard::zeroed(registry),
            overall_feedback: TRANSCRIPTION_FAILED_FEEDBACK.to_string(),
            observation: TRANSCRIPTION_FAILED_OBSERVATION.to_string(),
            transcription: Some(format!("Transcription failed: {reason}")),
        }
    }

    /// All-zero result for a transcript that could not be scored.
    pub fn default_scoring(registry: &ParameterRegistry, transcription: Option<String>) -> Self {
        Self {
            scores: ScoreCard::zeroed(registry),
            overall_feedback: DEFAULT_SCORING_FEEDBACK.to_string(),
            observation: DEFAULT_SCORING_OBSERVATION.to_string(),
            transcription,
        }
    }
}
