use std::time::Instant;

use crate::feedback::domain::feedback_synthesizer::FeedbackSynthesizer;
use crate::feedback::domain::observation_synthesizer::ObservationSynthesizer;
use crate::pipeline::evaluation_result::EvaluationResult;
use crate::rubric::domain::parameter_registry::ParameterRegistry;
use crate::scoring::domain::call_scorer::CallScorer;
use crate::transcription::domain::transcript_acquirer::TranscriptAcquirer;
use crate::transcription::domain::transcript_formatter::TranscriptFormatter;
use crate::transcription::domain::transcription_backend::AudioPayload;

/// Acquire → format → score → synthesize, for one recorded call.
///
/// Holds no per-call state, so one instance can serve many concurrent
/// evaluations.
pub struct EvaluateCallUseCase {
    acquirer: TranscriptAcquirer,
    scorer: CallScorer,
}

impl EvaluateCallUseCase {
    pub fn new(acquirer: TranscriptAcquirer, scorer: CallScorer) -> Self {
        Self { acquirer, scorer }
    }

    pub fn registry(&self) -> &ParameterRegistry {
        self.scorer.registry()
    }

    /// Never fails: transcription and scoring failures come back as zeroed results.
    pub fn evaluate_call(&self, audio_bytes: &[u8], mime_type: &str) -> EvaluationResult {
        self.evaluate_audio(&AudioPayload::new(audio_bytes.to_vec(), mime_type))
    }

    pub fn evaluate_audio(&self, audio: &AudioPayload) -> EvaluationResult {
        let started = Instant::now();
        let acquired = match self.acquirer.acquire(audio) {
            Ok(a) => a,
            Err(e) => {
                log::error!("Transcription failed: {e}");
                return EvaluationResult::transcription_failed(self.registry(), &e.to_string());
            }
        };
        log::debug!(
            "acquire: {:.0}ms via '{}' (language {})",
            started.elapsed().as_secs_f64() * 1000.0,
            acquired.strategy,
            acquired.detected_language.as_deref().unwrap_or("as requested")
        );

        let formatted = TranscriptFormatter::format(&acquired.text, &acquired.utterances);
        self.evaluate_formatted(formatted)
    }

    /// Score a transcript the caller already has; sentence alternation supplies
    /// the speaker labels.
    pub fn evaluate_transcript(&self, raw_transcript: &str) -> EvaluationResult {
        let formatted = TranscriptFormatter::format(raw_transcript, &[]);
        self.evaluate_formatted(formatted)
    }

    fn evaluate_formatted(&self, formatted: String) -> EvaluationResult {
        let started = Instant::now();
        let scores = match self.scorer.score(&formatted) {
            Ok(s) => s,
            Err(e) => {
                log::error!("Scoring failed, using default scoring: {e}");
                return EvaluationResult::default_scoring(self.registry(), Some(formatted));
            }
        };

        let overall_feedback = FeedbackSynthesizer::synthesize(&scores, self.registry());
        let observation = ObservationSynthesizer::synthesize(&formatted);
        log::info!(
            "Call scored {}/{} ({:.1}%)",
            scores.total(),
            self.registry().total_weight(),
            scores.percentage(self.registry())
        );
        log::debug!(
            "score+synthesize: {:.1}ms",
            started.elapsed().as_secs_f64() * 1000.0
        );

        EvaluationResult {
            scores,
            overall_feedback,
            observation,
            transcription: Some(formatted),
        }
    }
}
