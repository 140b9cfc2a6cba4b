//! Error types for Tekst.

use serde::Serialize;
use thiserror::Error;

/// Library-level error type for Tekst operations.
#[derive(Error, Debug)]
pub enum TekstError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Caption source error: {0}")]
    CaptionSource(String),

    #[error("No caption tracks available: {0}")]
    NoCaptions(String),

    #[error("Caption payload could not be parsed: {0}")]
    CaptionParse(String),

    #[error("Upstream returned a malformed response: {0}")]
    UpstreamResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Tekst operations.
pub type Result<T> = std::result::Result<T, TekstError>;

/// Machine-checkable classification of an acquisition failure.
///
/// All variants are expected, recoverable outcomes; none are process-fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCode {
    /// The input string did not match any known video URL shape.
    InvalidInput,
    /// Every acquisition strategy declined.
    NoCaptionsAvailable,
    /// The strategy chain exceeded the configured time limit.
    Timeout,
    /// A payload was obtained but no parser produced any segments.
    ParseFailure,
    /// A strategy's own validation rejected an upstream response.
    UpstreamRequestError,
}

impl std::fmt::Display for FailureCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FailureCode::InvalidInput => "invalid_input",
            FailureCode::NoCaptionsAvailable => "no_captions_available",
            FailureCode::Timeout => "timeout",
            FailureCode::ParseFailure => "parse_failure",
            FailureCode::UpstreamRequestError => "upstream_request_error",
        };
        write!(f, "{}", s)
    }
}

/// Classified acquisition failure returned by the orchestrator.
///
/// Carries a human-actionable `suggestion` distinct from the machine code so
/// callers can render locale-appropriate messaging without the core knowing
/// about locales.
#[derive(Debug, Clone, Serialize)]
pub struct AcquisitionFailure {
    pub code: FailureCode,
    pub message: String,
    pub suggestion: String,
}

impl AcquisitionFailure {
    pub fn new(code: FailureCode, message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    pub fn invalid_input(input: &str) -> Self {
        Self::new(
            FailureCode::InvalidInput,
            format!("Could not find a video ID in '{}'", input),
            "Paste a full YouTube URL, e.g. https://www.youtube.com/watch?v=...",
        )
    }

    pub fn no_captions(video_id: &str) -> Self {
        Self::new(
            FailureCode::NoCaptionsAvailable,
            format!("No captions could be fetched for video '{}'", video_id),
            "The video may have captions disabled. Try another video or retry later.",
        )
    }

    pub fn timeout(video_id: &str, limit_seconds: u64) -> Self {
        Self::new(
            FailureCode::Timeout,
            format!(
                "Fetching captions for '{}' exceeded the {}s time limit",
                video_id, limit_seconds
            ),
            "Check your connection, or raise acquisition.timeout_seconds in the config.",
        )
    }
}

impl std::fmt::Display for AcquisitionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AcquisitionFailure {}
