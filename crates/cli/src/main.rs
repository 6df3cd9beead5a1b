use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use callscore_core::pipeline::evaluate_call_use_case::EvaluateCallUseCase;
use callscore_core::pipeline::evaluation_report::render_text;
use callscore_core::pipeline::infrastructure::threaded_batch_evaluator::{
    BatchJob, BatchOutcome, CallInput, ThreadedBatchEvaluator,
};
use callscore_core::rubric::domain::parameter_registry::ParameterRegistry;
use callscore_core::scoring::domain::call_scorer::CallScorer;
use callscore_core::scoring::domain::rulebook::Rulebook;
use callscore_core::shared::constants::{AUDIO_EXTENSIONS, DEEPGRAM_API_KEY_ENV};
use callscore_core::shared::settings::EngineSettings;
use callscore_core::transcription::domain::backend_response::BackendResponse;
use callscore_core::transcription::domain::transcript_acquirer::TranscriptAcquirer;
use callscore_core::transcription::domain::transcription_backend::{
    AudioPayload, BackendError, TranscriptionBackend,
};
use callscore_core::transcription::domain::transcription_strategy::StrategyOptions;
use callscore_core::transcription::infrastructure::deepgram_backend::DeepgramBackend;

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Quality scoring for recorded collections calls.
#[derive(Parser)]
#[command(name = "callscore")]
struct Cli {
    /// Audio recordings (mp3 or wav), or text files with --transcript.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Treat inputs as plain-text transcripts and skip transcription.
    #[arg(long)]
    transcript: bool,

    /// Settings file (defaults to the user config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Deepgram API key (falls back to the DEEPGRAM_API_KEY variable).
    #[arg(long)]
    api_key: Option<String>,

    /// Calls evaluated in parallel (overrides settings).
    #[arg(long)]
    workers: Option<usize>,

    /// Cancel calls not yet transcribed after this many seconds.
    #[arg(long)]
    deadline_secs: Option<u64>,

    /// Output format: json or text.
    #[arg(long, default_value = "json")]
    format: String,
}

/// Stands in for the transcription service when no credentials are available.
/// Every attempt is rejected, so audio calls resolve to failure results.
struct MissingCredentials;

impl TranscriptionBackend for MissingCredentials {
    fn transcribe(
        &self,
        _: &AudioPayload,
        _: &StrategyOptions,
    ) -> Result<BackendResponse, BackendError> {
        Err(BackendError::Unauthorized { status: 401 })
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let settings = match cli.config {
        Some(ref path) => EngineSettings::load_from(path)?,
        None => EngineSettings::load(),
    };
    let workers = cli.workers.unwrap_or(settings.workers);

    let cancelled = Arc::new(AtomicBool::new(false));
    let backend = build_backend(&cli, &settings);
    let acquirer = TranscriptAcquirer::new(backend, settings.strategies.clone())
        .with_cancellation(cancelled.clone());
    let strategy_names: Vec<&str> = acquirer.strategies().iter().map(|s| s.name.as_str()).collect();
    log::debug!("Transcription strategies: {}", strategy_names.join(", "));
    let scorer = CallScorer::new(
        ParameterRegistry::standard(),
        Rulebook::standard(settings.scoring.clone()),
    );
    let use_case = Arc::new(EvaluateCallUseCase::new(acquirer, scorer));

    let jobs = load_jobs(&cli.inputs, cli.transcript)?;
    if let Some(secs) = cli.deadline_secs {
        spawn_deadline(Duration::from_secs(secs), cancelled.clone());
    }

    let total = jobs.len();
    let progress: Box<dyn Fn(usize, usize) + Send + Sync> = Box::new(move |current, _| {
        eprint!("\rEvaluated {current}/{total}");
    });
    let evaluator = ThreadedBatchEvaluator::new(workers);
    log::info!("Evaluating {total} call(s) with {} worker(s)", evaluator.workers());
    let outcomes = evaluator.run(use_case.clone(), jobs, cancelled, Some(progress));
    eprintln!();

    if cli.format == "text" {
        print_text(&outcomes, use_case.registry());
    } else {
        print_json(&outcomes)?;
    }
    Ok(())
}

fn build_backend(cli: &Cli, settings: &EngineSettings) -> Box<dyn TranscriptionBackend> {
    let api_key = cli
        .api_key
        .clone()
        .or_else(|| std::env::var(DEEPGRAM_API_KEY_ENV).ok())
        .unwrap_or_default();
    let timeout = Duration::from_secs(settings.request_timeout_secs);

    match DeepgramBackend::new(&api_key, &settings.endpoint, timeout) {
        Ok(backend) => {
            log::debug!("Transcribing via {}", backend.endpoint());
            Box::new(backend)
        }
        Err(e) => {
            if !cli.transcript {
                log::warn!("No usable {DEEPGRAM_API_KEY_ENV}: {e}");
            }
            Box::new(MissingCredentials)
        }
    }
}

fn load_jobs(inputs: &[PathBuf], transcript: bool) -> Result<Vec<BatchJob>, std::io::Error> {
    inputs
        .iter()
        .map(|path| {
            let input = if transcript {
                CallInput::Transcript(std::fs::read_to_string(path)?)
            } else {
                CallInput::Audio(AudioPayload::new(std::fs::read(path)?, mime_type_for(path)))
            };
            Ok::<_, std::io::Error>(BatchJob {
                name: path.display().to_string(),
                input,
            })
        })
        .collect()
}

fn spawn_deadline(deadline: Duration, cancelled: Arc<AtomicBool>) {
    std::thread::spawn(move || {
        std::thread::sleep(deadline);
        if !cancelled.swap(true, Ordering::Relaxed) {
            log::warn!("Deadline of {}s reached, cancelling remaining calls", deadline.as_secs());
        }
    });
}

fn print_json(outcomes: &[BatchOutcome]) -> Result<(), serde_json::Error> {
    let json = match outcomes {
        [single] => serde_json::to_string_pretty(&single.result)?,
        many => {
            let entries: Vec<serde_json::Value> = many
                .iter()
                .map(|o| serde_json::json!({ "name": o.name, "result": o.result }))
                .collect();
            serde_json::to_string_pretty(&entries)?
        }
    };
    println!("{json}");
    Ok(())
}

fn print_text(outcomes: &[BatchOutcome], registry: &ParameterRegistry) {
    for (i, outcome) in outcomes.iter().enumerate() {
        if i > 0 {
            println!();
        }
        if outcomes.len() > 1 {
            println!("== {} ==", outcome.name);
        }
        println!("{}", render_text(&outcome.result, registry));
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    for input in &cli.inputs {
        if !input.exists() {
            return Err(format!("Input file not found: {}", input.display()).into());
        }
        if !cli.transcript && mime_type_for(input) == FALLBACK_MIME_TYPE {
            log::warn!(
                "Unrecognised audio extension for {}, sending as {FALLBACK_MIME_TYPE}",
                input.display()
            );
        }
    }
    if cli.format != "json" && cli.format != "text" {
        return Err(format!("Format must be 'json' or 'text', got '{}'", cli.format).into());
    }
    if cli.workers == Some(0) {
        return Err("Workers must be at least 1".into());
    }
    if let Some(ref path) = cli.config {
        if !path.exists() {
            return Err(format!("Settings file not found: {}", path.display()).into());
        }
    }
    Ok(())
}

fn mime_type_for(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .and_then(|ext| {
            AUDIO_EXTENSIONS
                .iter()
                .find(|(known, _)| *known == ext)
                .map(|(_, mime)| *mime)
        })
        .unwrap_or(FALLBACK_MIME_TYPE)
}
