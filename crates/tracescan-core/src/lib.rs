//! Tracescan Core Library
//!
//! Finds public traces of a photo on social platforms by sending it to a
//! hosted multimodal model with web grounding enabled, then keeping only the
//! citations that point at known social-media domains.

pub mod analyzer;
pub mod config;
pub mod domains;
pub mod error;
pub mod gemini;
pub mod locale;
pub mod model;
pub mod prompt;
pub mod search;

pub use analyzer::PresenceAnalyzer;
pub use config::CoreConfig;
pub use error::{AnalysisError, ConfigError, InputError, UpstreamError};
pub use locale::Locale;
pub use model::{AnalysisResult, ImageInput, MatchRecord, Platform};
pub use search::{Citation, GroundedRequest, GroundedResponse, GroundedSearch, WebSource};
