use thiserror::Error;

use super::backend_response::BackendResponse;
use super::transcription_strategy::StrategyOptions;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("unauthorized (HTTP {status})")]
    Unauthorized { status: u16 },
    #[error("backend returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed backend response: {0}")]
    Malformed(String),
}

impl BackendError {
    /// Credential failures cannot be fixed by trying another configuration.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, BackendError::Unauthorized { .. })
    }
}

/// Recorded call audio as handed over by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AudioPayload {
    bytes: Vec<u8>,
    mime_type: String,
}

impl AudioPayload {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Domain interface for an external speech-to-text provider.
///
/// One call per strategy attempt. Implementations block until the provider
/// answers or fails.
pub trait TranscriptionBackend: Send + Sync {
    fn transcribe(
        &self,
        audio: &AudioPayload,
        options: &StrategyOptions,
    ) -> Result<BackendResponse, BackendError>;
}
