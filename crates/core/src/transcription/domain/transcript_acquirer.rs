use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

use super::transcription_backend::{AudioPayload, BackendError, TranscriptionBackend};
use super::transcription_strategy::TranscriptionStrategy;
use super::utterance::Utterance;

#[derive(Error, Debug)]
pub enum TranscriptionError {
    #[error("transcription backend rejected credentials during strategy '{strategy}': {source}")]
    Unauthorized {
        strategy: String,
        #[source]
        source: BackendError,
    },
    #[error("strategy '{strategy}' returned no usable transcript")]
    EmptyResult { strategy: String },
    #[error("all {attempts} transcription strategies failed{}", last_error_suffix(.last_error))]
    Exhausted {
        attempts: usize,
        last_error: Option<String>,
    },
    #[error("transcription cancelled")]
    Cancelled,
    #[error("no transcription strategies configured")]
    NoStrategies,
}

fn last_error_suffix(last_error: &Option<String>) -> String {
    match last_error {
        Some(e) => format!(" (last error: {e})"),
        None => String::new(),
    }
}

impl TranscriptionError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, TranscriptionError::Unauthorized { .. })
    }
}

/// The transcript accepted by acquisition, with whatever speaker data came with it.
#[derive(Clone, Debug, PartialEq)]
pub struct AcquiredTranscript {
    pub strategy: String,
    /// Primary or word-reconstructed transcript, trimmed and non-empty.
    pub text: String,
    pub utterances: Vec<Utterance>,
    pub detected_language: Option<String>,
}

/// Drives a transcription backend through an ordered list of strategies until
/// one yields text.
///
/// Strategies run strictly one after another. An authorization failure stops
/// the loop immediately; any other failure moves on to the next strategy.
pub struct TranscriptAcquirer {
    backend: Box<dyn TranscriptionBackend>,
    strategies: Vec<TranscriptionStrategy>,
    cancelled: Arc<AtomicBool>,
}

impl TranscriptAcquirer {
    pub fn new(backend: Box<dyn TranscriptionBackend>, strategies: Vec<TranscriptionStrategy>) -> Self {
        Self {
            backend,
            strategies,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Share a cancellation flag with the caller. Checked before each strategy.
    pub fn with_cancellation(mut self, cancelled: Arc<AtomicBool>) -> Self {
        self.cancelled = cancelled;
        self
    }

    pub fn strategies(&self) -> &[TranscriptionStrategy] {
        &self.strategies
    }

    pub fn acquire(&self, audio: &AudioPayload) -> Result<AcquiredTranscript, TranscriptionError> {
        if self.strategies.is_empty() {
            return Err(TranscriptionError::NoStrategies);
        }

        let mut last_error: Option<String> = None;

        for (index, strategy) in self.strategies.iter().enumerate() {
            if self.cancelled.load(Ordering::Relaxed) {
                log::warn!("Transcription cancelled before strategy '{}'", strategy.name);
                return Err(TranscriptionError::Cancelled);
            }

            log::info!(
                "Transcription attempt {}/{}: strategy '{}' (model {}, {} bytes)",
                index + 1,
                self.strategies.len(),
                strategy.name,
                strategy.options.model,
                audio.len()
            );

            let outcome = self.backend.transcribe(audio, &strategy.options);
            if self.cancelled.load(Ordering::Relaxed) {
                log::warn!("Transcription cancelled during strategy '{}'", strategy.name);
                return Err(TranscriptionError::Cancelled);
            }

            let response = match outcome {
                Ok(r) => r,
                Err(e) if e.is_unauthorized() => {
                    log::error!("Strategy '{}' unauthorized; aborting", strategy.name);
                    return Err(TranscriptionError::Unauthorized {
                        strategy: strategy.name.clone(),
                        source: e,
                    });
                }
                Err(e) => {
                    log::warn!("Strategy '{}' failed: {e}", strategy.name);
                    last_error = Some(e.to_string());
                    continue;
                }
            };

            let text = response.usable_text();
            if text.is_empty() {
                let empty = TranscriptionError::EmptyResult {
                    strategy: strategy.name.clone(),
                };
                log::warn!("{empty}");
                last_error = Some(empty.to_string());
                continue;
            }

            log::info!(
                "Strategy '{}' produced {} characters ({} utterances)",
                strategy.name,
                text.chars().count(),
                response.utterances.len()
            );
            return Ok(AcquiredTranscript {
                strategy: strategy.name.clone(),
                text,
                utterances: response.utterances,
                detected_language: response.detected_language,
            });
        }

        Err(TranscriptionError::Exhausted {
            attempts: self.strategies.len(),
            last_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcription::domain::backend_response::BackendResponse;
    use crate::transcription::domain::transcription_strategy::StrategyOptions;
    use crate::transcription::domain::utterance::TranscriptWord;
    use std::sync::Mutex;

    // ─── Stubs ───

    enum Scripted {
        Respond(BackendResponse),
        Fail(fn() -> BackendError),
    }

    struct StubBackend {
        script: Vec<Scripted>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl TranscriptionBackend for StubBackend {
        fn transcribe(
            &self,
            _: &AudioPayload,
            options: &StrategyOptions,
        ) -> Result<BackendResponse, BackendError> {
            let mut calls = self.calls.lock().unwrap();
            let index = calls.len();
            calls.push(options.model.clone());
            match &self.script[index] {
                Scripted::Respond(r) => Ok(r.clone()),
                Scripted::Fail(make) => Err(make()),
            }
        }
    }

    fn strategies(n: usize) -> Vec<TranscriptionStrategy> {
        (0..n)
            .map(|i| {
                TranscriptionStrategy::new(
                    format!("s{i}"),
                    StrategyOptions {
                        model: format!("m{i}"),
                        ..StrategyOptions::default()
                    },
                )
            })
            .collect()
    }

    fn acquirer(script: Vec<Scripted>) -> (TranscriptAcquirer, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let n = script.len();
        let backend = StubBackend {
            script,
            calls: calls.clone(),
        };
        (TranscriptAcquirer::new(Box::new(backend), strategies(n)), calls)
    }

    fn audio() -> AudioPayload {
        AudioPayload::new(vec![0u8; 64], "audio/wav")
    }

    fn unauthorized() -> BackendError {
        BackendError::Unauthorized { status: 401 }
    }

    fn server_error() -> BackendError {
        BackendError::Http {
            status: 503,
            body: "busy".to_string(),
        }
    }

    fn malformed() -> BackendError {
        BackendError::Malformed("missing results".to_string())
    }

    #[test]
    fn test_unauthorized_stops_immediately() {
        let (acq, calls) = acquirer(vec![
            Scripted::Fail(unauthorized),
            Scripted::Respond(BackendResponse::with_transcript("ok")),
        ]);
        let err = acq.acquire(&audio()).unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(*calls.lock().unwrap(), vec!["m0"]);
    }

    #[test]
    fn test_empty_then_success_stops_at_success() {
        let (acq, calls) = acquirer(vec![
            Scripted::Respond(BackendResponse::with_transcript("")),
            Scripted::Respond(BackendResponse::with_transcript("ok")),
            Scripted::Respond(BackendResponse::with_transcript("never")),
        ]);
        let got = acq.acquire(&audio()).unwrap();
        assert_eq!(got.text, "ok");
        assert_eq!(got.strategy, "s1");
        assert_eq!(*calls.lock().unwrap(), vec!["m0", "m1"]);
    }

    #[test]
    fn test_reconstructed_words_count_as_success() {
        let response = BackendResponse {
            transcript: None,
            words: vec![TranscriptWord {
                word: "namaste".to_string(),
                start_time: 0.0,
                end_time: 0.4,
                confidence: 0.9,
            }],
            ..BackendResponse::default()
        };
        let (acq, calls) = acquirer(vec![Scripted::Respond(response)]);
        assert_eq!(acq.acquire(&audio()).unwrap().text, "namaste");
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_recoverable_errors_fall_through_in_order() {
        let (acq, calls) = acquirer(vec![
            Scripted::Fail(server_error),
            Scripted::Fail(malformed),
            Scripted::Respond(BackendResponse::with_transcript("  final text ")),
        ]);
        assert_eq!(acq.acquire(&audio()).unwrap().text, "final text");
        assert_eq!(*calls.lock().unwrap(), vec!["m0", "m1", "m2"]);
    }

    #[test]
    fn test_auth_after_recoverable_failure_still_aborts() {
        let (acq, calls) = acquirer(vec![
            Scripted::Fail(server_error),
            Scripted::Fail(unauthorized),
            Scripted::Respond(BackendResponse::with_transcript("ok")),
        ]);
        let err = acq.acquire(&audio()).unwrap_err();
        match err {
            TranscriptionError::Unauthorized { strategy, .. } => assert_eq!(strategy, "s1"),
            other => panic!("expected Unauthorized, got {other:?}"),
        }
        assert_eq!(calls.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_all_empty_is_exhausted() {
        let (acq, _) = acquirer(vec![
            Scripted::Respond(BackendResponse::default()),
            Scripted::Fail(server_error),
        ]);
        match acq.acquire(&audio()).unwrap_err() {
            TranscriptionError::Exhausted {
                attempts,
                last_error,
            } => {
                assert_eq!(attempts, 2);
                assert!(last_error.unwrap().contains("503"));
            }
            other => panic!("expected Exhausted, got {other:?}"),
        }
    }

    #[test]
    fn test_no_strategies() {
        let (acq, _) = acquirer(vec![]);
        assert!(matches!(
            acq.acquire(&audio()),
            Err(TranscriptionError::NoStrategies)
        ));
    }

    #[test]
    fn test_cancelled_before_first_attempt() {
        let (acq, calls) = acquirer(vec![Scripted::Respond(BackendResponse::with_transcript(
            "ok",
        ))]);
        let flag = Arc::new(AtomicBool::new(true));
        let acq = acq.with_cancellation(flag);
        assert!(matches!(
            acq.acquire(&audio()),
            Err(TranscriptionError::Cancelled)
        ));
        assert!(calls.lock().unwrap().is_empty());
    }

    /// Raises the shared flag mid-request, as a deadline firing during a slow upload would.
    struct CancelDuringCall {
        flag: Arc<AtomicBool>,
    }

    impl TranscriptionBackend for CancelDuringCall {
        fn transcribe(
            &self,
            _: &AudioPayload,
            _: &StrategyOptions,
        ) -> Result<BackendResponse, BackendError> {
            self.flag.store(true, Ordering::Relaxed);
            Ok(BackendResponse::with_transcript("ok"))
        }
    }

    #[test]
    fn test_cancelled_during_attempt_discards_result() {
        let flag = Arc::new(AtomicBool::new(false));
        let acq = TranscriptAcquirer::new(
            Box::new(CancelDuringCall { flag: flag.clone() }),
            strategies(2),
        )
        .with_cancellation(flag.clone());
        assert!(matches!(
            acq.acquire(&audio()),
            Err(TranscriptionError::Cancelled)
        ));
        assert!(flag.load(Ordering::Relaxed));
    }

    #[test]
    fn test_utterances_carried_through() {
        let response = BackendResponse {
            transcript: Some("Hello. Hi there.".to_string()),
            utterances: vec![Utterance::new(0, "Hello", 0.9)],
            detected_language: Some("hi".to_string()),
            ..BackendResponse::default()
        };
        let (acq, _) = acquirer(vec![Scripted::Respond(response)]);
        let got = acq.acquire(&audio()).unwrap();
        assert_eq!(got.utterances.len(), 1);
        assert_eq!(got.detected_language.as_deref(), Some("hi"));
    }

    #[test]
    fn test_exhausted_message_mentions_last_error() {
        let err = TranscriptionError::Exhausted {
            attempts: 4,
            last_error: Some("network error: reset".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "all 4 transcription strategies failed (last error: network error: reset)"
        );
    }
}
