use serde::{Deserialize, Serialize};

/// A speaker-attributed stretch of speech returned by a diarizing backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub speaker_id: u32,
    pub text: String,
    pub confidence: f32,
}

impl Utterance {
    pub fn new(speaker_id: u32, text: impl Into<String>, confidence: f32) -> Self {
        Self {
            speaker_id,
            text: text.into(),
            confidence,
        }
    }
}

/// One recognized word with timing, as some backend configurations return
/// tokens without an aggregate transcript.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TranscriptWord {
    pub word: String,
    pub start_time: f64,
    pub end_time: f64,
    pub confidence: f32,
}
