use serde::{Deserialize, Serialize};

use crate::shared::constants::DEFAULT_LANGUAGE;

/// Backend configuration for one transcription attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyOptions {
    pub model: String,
    /// Language hint; `None` leaves the choice to the backend.
    pub language: Option<String>,
    pub smart_format: bool,
    pub punctuate: bool,
    pub diarize: bool,
    pub utterances: bool,
    pub detect_language: bool,
}

impl Default for StrategyOptions {
    fn default() -> Self {
        Self {
            model: "nova-2".to_string(),
            language: Some(DEFAULT_LANGUAGE.to_string()),
            smart_format: false,
            punctuate: true,
            diarize: false,
            utterances: false,
            detect_language: false,
        }
    }
}

/// A named backend configuration, tried in priority order during acquisition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptionStrategy {
    pub name: String,
    pub options: StrategyOptions,
}

impl TranscriptionStrategy {
    pub fn new(name: impl Into<String>, options: StrategyOptions) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }

    /// Enhanced general model, base general model, simplified model,
    /// then auto-detected language.
    pub fn standard() -> Vec<TranscriptionStrategy> {
        vec![
            Self::new(
                "nova-2-general",
                StrategyOptions {
                    model: "nova-2".to_string(),
                    smart_format: true,
                    diarize: true,
                    utterances: true,
                    ..StrategyOptions::default()
                },
            ),
            Self::new(
                "base-general",
                StrategyOptions {
                    model: "base".to_string(),
                    diarize: true,
                    utterances: true,
                    ..StrategyOptions::default()
                },
            ),
            Self::new(
                "simplified",
                StrategyOptions {
                    model: "base".to_string(),
                    ..StrategyOptions::default()
                },
            ),
            Self::new(
                "auto-detect-language",
                StrategyOptions {
                    model: "nova-2".to_string(),
                    language: None,
                    diarize: true,
                    utterances: true,
                    detect_language: true,
                    ..StrategyOptions::default()
                },
            ),
        ]
    }
}
