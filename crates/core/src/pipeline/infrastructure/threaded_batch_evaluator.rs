use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::pipeline::evaluate_call_use_case::EvaluateCallUseCase;
use crate::pipeline::evaluation_result::EvaluationResult;
use crate::transcription::domain::transcript_acquirer::TranscriptionError;
use crate::transcription::domain::transcription_backend::AudioPayload;

const DEFAULT_CHANNEL_CAPACITY: usize = 8;

pub type ProgressFn = Box<dyn Fn(usize, usize) + Send + Sync>;

/// What a batch job evaluates.
#[derive(Debug, Clone, PartialEq)]
pub enum CallInput {
    Audio(AudioPayload),
    Transcript(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchJob {
    pub name: String,
    pub input: CallInput,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub name: String,
    pub result: EvaluationResult,
}

/// Evaluates many calls at once, one independent evaluation per job.
///
/// Layout: `main [feed jobs] → N workers [evaluate] → main [collect]`
///
/// Results come back in job order. Once `cancelled` is set, jobs that have not
/// started resolve to a cancellation failure result.
pub struct ThreadedBatchEvaluator {
    workers: usize,
    channel_capacity: usize,
}

impl ThreadedBatchEvaluator {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn run(
        &self,
        use_case: Arc<EvaluateCallUseCase>,
        jobs: Vec<BatchJob>,
        cancelled: Arc<AtomicBool>,
        on_progress: Option<ProgressFn>,
    ) -> Vec<BatchOutcome> {
        let total = jobs.len();
        let names: Vec<String> = jobs.iter().map(|j| j.name.clone()).collect();

        let (job_tx, job_rx) = crossbeam_channel::bounded::<(usize, BatchJob)>(self.channel_capacity);
        let (result_tx, result_rx) = crossbeam_channel::unbounded::<(usize, BatchOutcome)>();

        let handles: Vec<_> = (0..self.workers.min(total.max(1)))
            .map(|_| {
                spawn_worker(
                    use_case.clone(),
                    job_rx.clone(),
                    result_tx.clone(),
                    cancelled.clone(),
                )
            })
            .collect();
        drop(job_rx);
        drop(result_tx);

        for (index, job) in jobs.into_iter().enumerate() {
            if job_tx.send((index, job)).is_err() {
                log::error!("All batch workers exited early");
                break;
            }
        }
        drop(job_tx);

        let mut slots: Vec<Option<BatchOutcome>> = vec![None; total];
        let mut done = 0;
        for (index, outcome) in result_rx {
            slots[index] = Some(outcome);
            done += 1;
            if let Some(ref cb) = on_progress {
                cb(done, total);
            }
        }

        for handle in handles {
            if handle.join().is_err() {
                log::error!("Batch worker panicked");
            }
        }

        slots
            .into_iter()
            .zip(names)
            .map(|(slot, name)| {
                slot.unwrap_or_else(|| BatchOutcome {
                    result: EvaluationResult::default_scoring(use_case.registry(), None),
                    name,
                })
            })
            .collect()
    }
}

impl Default for ThreadedBatchEvaluator {
    fn default() -> Self {
        Self::new(crate::shared::constants::DEFAULT_BATCH_WORKERS)
    }
}

fn spawn_worker(
    use_case: Arc<EvaluateCallUseCase>,
    job_rx: crossbeam_channel::Receiver<(usize, BatchJob)>,
    result_tx: crossbeam_channel::Sender<(usize, BatchOutcome)>,
    cancelled: Arc<AtomicBool>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        for (index, job) in job_rx {
            let result = if cancelled.load(Ordering::Relaxed) {
                EvaluationResult::transcription_failed(
                    use_case.registry(),
                    &TranscriptionError::Cancelled.to_string(),
                )
            } else {
                match job.input {
                    CallInput::Audio(ref audio) => use_case.evaluate_audio(audio),
                    CallInput::Transcript(ref text) => use_case.evaluate_transcript(text),
                }
            };
            let outcome = BatchOutcome {
                name: job.name,
                result,
            };
            if result_tx.send((index, outcome)).is_err() {
                break;
            }
        }
    })
}
