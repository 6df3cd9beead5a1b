use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;

use crate::transcription::domain::backend_response::BackendResponse;
use crate::transcription::domain::transcription_backend::{
    AudioPayload, BackendError, TranscriptionBackend,
};
use crate::transcription::domain::transcription_strategy::StrategyOptions;
use crate::transcription::domain::utterance::{TranscriptWord, Utterance};

/// Transcription backend for Deepgram's prerecorded-audio endpoint.
///
/// Sends the raw audio body with the strategy encoded as query parameters.
pub struct DeepgramBackend {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
}

impl std::fmt::Debug for DeepgramBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeepgramBackend")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl DeepgramBackend {
    pub fn new(api_key: &str, endpoint: &str, timeout: Duration) -> Result<Self, BackendError> {
        if api_key.trim().is_empty() {
            return Err(BackendError::Unauthorized { status: 401 });
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Network(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl TranscriptionBackend for DeepgramBackend {
    fn transcribe(
        &self,
        audio: &AudioPayload,
        options: &StrategyOptions,
    ) -> Result<BackendResponse, BackendError> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&query_params(options))
            .header(AUTHORIZATION, format!("Token {}", self.api_key))
            .header(CONTENT_TYPE, audio.mime_type())
            .body(audio.bytes().to_vec())
            .send()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        classify(status, body)
    }
}

/// 401 is the only status that stops acquisition; other failures are recoverable.
pub(crate) fn classify(
    status: reqwest::StatusCode,
    body: String,
) -> Result<BackendResponse, BackendError> {
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(BackendError::Unauthorized {
            status: status.as_u16(),
        });
    }
    if !status.is_success() {
        return Err(BackendError::Http {
            status: status.as_u16(),
            body,
        });
    }
    parse_response(&body)
}

pub(crate) fn query_params(options: &StrategyOptions) -> Vec<(&'static str, String)> {
    let mut params = vec![("model", options.model.clone())];
    if let Some(ref language) = options.language {
        params.push(("language", language.clone()));
    }
    params.push(("smart_format", options.smart_format.to_string()));
    params.push(("punctuate", options.punctuate.to_string()));
    params.push(("diarize", options.diarize.to_string()));
    params.push(("utterances", options.utterances.to_string()));
    params.push(("detect_language", options.detect_language.to_string()));
    params
}

// ─── Wire format ───

#[derive(Deserialize)]
struct ListenResponse {
    results: Option<ListenResults>,
}

#[derive(Deserialize)]
struct ListenResults {
    #[serde(default)]
    channels: Vec<Channel>,
    #[serde(default)]
    utterances: Option<Vec<WireUtterance>>,
}

#[derive(Deserialize)]
struct Channel {
    #[serde(default)]
    alternatives: Vec<Alternative>,
    detected_language: Option<String>,
}

#[derive(Deserialize)]
struct Alternative {
    transcript: Option<String>,
    #[serde(default)]
    words: Vec<WireWord>,
}

#[derive(Deserialize)]
struct WireWord {
    word: String,
    punctuated_word: Option<String>,
    #[serde(default)]
    start: f64,
    #[serde(default)]
    end: f64,
    #[serde(default)]
    confidence: f32,
}

#[derive(Deserialize)]
struct WireUtterance {
    #[serde(default)]
    speaker: u32,
    #[serde(default)]
    transcript: String,
    #[serde(default)]
    confidence: f32,
}

pub(crate) fn parse_response(body: &str) -> Result<BackendResponse, BackendError> {
    let parsed: ListenResponse =
        serde_json::from_str(body).map_err(|e| BackendError::Malformed(e.to_string()))?;
    let results = parsed
        .results
        .ok_or_else(|| BackendError::Malformed("response has no results".to_string()))?;

    let channel = results.channels.into_iter().next();
    let detected_language = channel.as_ref().and_then(|c| c.detected_language.clone());
    let alternative = channel.and_then(|c| c.alternatives.into_iter().next());

    let (transcript, words) = match alternative {
        Some(alt) => {
            let words = alt
                .words
                .into_iter()
                .map(|w| TranscriptWord {
                    word: w.punctuated_word.unwrap_or(w.word),
                    start_time: w.start,
                    end_time: w.end,
                    confidence: w.confidence,
                })
                .collect();
            (alt.transcript, words)
        }
        None => (None, Vec::new()),
    };

    let utterances = results
        .utterances
        .unwrap_or_default()
        .into_iter()
        .map(|u| Utterance::new(u.speaker, u.transcript, u.confidence))
        .collect();

    Ok(BackendResponse {
        transcript,
        words,
        utterances,
        detected_language,
    })
}
