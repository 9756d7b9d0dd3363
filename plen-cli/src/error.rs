use playlist_length::extractor::error::PlaylistError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Playlist(#[from] PlaylistError),

    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No API key configured; pass --api-key, set YOUTUBE_API_KEY or add api_key to the config file")]
    MissingApiKey,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Input cancelled by user")]
    Cancelled,
}

impl CliError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn user_cancelled() -> Self {
        Self::Cancelled
    }

    /// Stable machine-readable name, used in JSON error output.
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::Playlist(e) => e.kind(),
            CliError::Config(_) => "config",
            CliError::Io(_) => "io",
            CliError::Json(_) => "json",
            CliError::MissingApiKey => "missing_api_key",
            CliError::InvalidInput(_) => "invalid_input",
            CliError::Cancelled => "cancelled",
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
