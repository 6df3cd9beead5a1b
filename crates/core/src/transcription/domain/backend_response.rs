use super::utterance::{TranscriptWord, Utterance};

/// What one backend call produced, before any usability judgement.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BackendResponse {
    /// Aggregate transcript of the primary channel, if the backend sent one.
    pub transcript: Option<String>,
    pub words: Vec<TranscriptWord>,
    pub utterances: Vec<Utterance>,
    pub detected_language: Option<String>,
}

impl BackendResponse {
    pub fn with_transcript(transcript: impl Into<String>) -> Self {
        Self {
            transcript: Some(transcript.into()),
            ..Self::default()
        }
    }

    /// The primary transcript, or the words joined in order when the primary
    /// is missing or blank. Trimmed; empty when neither yields text.
    pub fn usable_text(&self) -> String {
        let primary = self.transcript.as_deref().map(str::trim).unwrap_or("");
        if !primary.is_empty() {
            return primary.to_string();
        }
        self.words
            .iter()
            .map(|w| w.word.trim())
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
