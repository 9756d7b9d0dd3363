use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlaylistError {
    #[error("Invalid Playlist Link: {0}")]
    InvalidLink(String),
    #[error("no playlist id found in link: {0}")]
    MissingPlaylistId(String),
    #[error("invalid range: start {start}, end {end}")]
    InvalidRange { start: usize, end: usize },
    #[error("Videos not found, Range is incorrect: requested {requested}, playlist has {available}")]
    RangeExceeded { requested: usize, available: usize },
    #[error("playlist is empty or unavailable: {0}")]
    EmptyPlaylist(String),
    #[error("Failed to fetch playlist data (page {page}): {source}")]
    Fetch {
        page: usize,
        #[source]
        source: Box<PlaylistError>,
    },
    #[error("invalid speed multiplier: {0}")]
    InvalidMultiplier(f64),
    #[error("invalid duration string: {0}")]
    InvalidDuration(String),
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("http error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("json error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("run superseded by a newer request")]
    Superseded,
    #[error("other error: {0}")]
    Other(String),
}

impl PlaylistError {
    pub fn fetch(page: usize, source: PlaylistError) -> Self {
        Self::Fetch {
            page,
            source: Box::new(source),
        }
    }

    /// Stable machine-readable name of the failure, used by presentation layers.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidLink(_) => "invalid_link",
            Self::MissingPlaylistId(_) => "missing_playlist_id",
            Self::InvalidRange { .. } => "invalid_range",
            Self::RangeExceeded { .. } => "range_exceeded",
            Self::EmptyPlaylist(_) => "empty_playlist",
            Self::Fetch { .. } => "fetch",
            Self::InvalidMultiplier(_) => "invalid_multiplier",
            Self::InvalidDuration(_) => "invalid_duration",
            Self::Api { .. } => "api",
            Self::HttpError(_) => "http",
            Self::JsonError(_) => "json",
            Self::Superseded => "superseded",
            Self::Other(_) => "other",
        }
    }
}

/// Structured failure handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunFailure {
    pub kind: &'static str,
    pub message: String,
}

impl From<&PlaylistError> for RunFailure {
    fn from(error: &PlaylistError) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}
