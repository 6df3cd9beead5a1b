use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::constants::{
    DEEPGRAM_LISTEN_URL, DEFAULT_BATCH_WORKERS, DEFAULT_REQUEST_TIMEOUT_SECS, SETTINGS_DIR_NAME,
    SETTINGS_FILE_NAME,
};
use crate::scoring::domain::rulebook::ScoringTuning;
use crate::transcription::domain::transcription_strategy::TranscriptionStrategy;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Engine configuration. Credentials are never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub endpoint: String,
    pub request_timeout_secs: u64,
    /// Attempted in this order.
    pub strategies: Vec<TranscriptionStrategy>,
    pub scoring: ScoringTuning,
    pub workers: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            endpoint: DEEPGRAM_LISTEN_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            strategies: TranscriptionStrategy::standard(),
            scoring: ScoringTuning::default(),
            workers: DEFAULT_BATCH_WORKERS,
        }
    }
}

impl EngineSettings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
    }

    /// Settings from the user config directory, or defaults if absent or unreadable.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|e| SettingsError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
