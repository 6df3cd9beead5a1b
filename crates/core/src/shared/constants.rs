pub const DEEPGRAM_LISTEN_URL: &str = "https://api.deepgram.com/v1/listen";
pub const DEEPGRAM_API_KEY_ENV: &str = "DEEPGRAM_API_KEY";

/// Language hint for the standard strategies (Hindi).
pub const DEFAULT_LANGUAGE: &str = "hi";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_BATCH_WORKERS: usize = 4;

pub const SETTINGS_DIR_NAME: &str = "CallScore";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

pub const AUDIO_EXTENSIONS: &[(&str, &str)] = &[
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
];
