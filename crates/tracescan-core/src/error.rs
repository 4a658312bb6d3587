//! Centralized error types for Tracescan.

use thiserror::Error;

/// Failure talking to the grounded-search provider.
///
/// These carry the diagnostic detail that gets logged. Callers of the
/// analyzer never see them: they are collapsed into [`AnalysisError`].
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Upstream API error (HTTP {status}): {body}")]
    Status { status: u16, body: String },

    #[error("Malformed upstream response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Upstream response contained no candidates")]
    NoCandidates,
}

/// The single, generic failure surfaced by an analysis.
///
/// The message is human readable and already localized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct AnalysisError {
    message: String,
}

impl AnalysisError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Invalid image input supplied by the caller.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Invalid base64 image data: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Failed to read image file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("API key not set. Export {0}=your-key")]
    MissingApiKey(String),

    #[error("Temperature must be between 0.0 and 2.0, got {0}")]
    InvalidTemperature(f32),

    #[error("Unknown locale '{0}' (expected 'ar' or 'en')")]
    UnknownLocale(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
