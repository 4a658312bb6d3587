//! Presence analysis: one grounded request, then domain filtering.

use std::sync::Arc;

use tracing::{debug, error};

use crate::config::{CoreConfig, DEFAULT_TEMPERATURE};
use crate::domains::is_social_url;
use crate::error::AnalysisError;
use crate::gemini::GeminiClient;
use crate::locale::Locale;
use crate::model::{AnalysisResult, ImageInput, MatchRecord};
use crate::prompt::build_prompt;
use crate::search::{GroundedRequest, GroundedResponse, GroundedSearch};

/// Analyzes where a photo appears on social media.
///
/// Holds no per-request state, so a single instance can serve concurrent
/// calls.
#[derive(Clone)]
pub struct PresenceAnalyzer {
    search: Arc<dyn GroundedSearch>,
    locale: Locale,
    temperature: f32,
}

impl PresenceAnalyzer {
    pub fn new(search: Arc<dyn GroundedSearch>, locale: Locale) -> Self {
        Self {
            search,
            locale,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Build an analyzer backed by Gemini.
    pub fn from_config(config: &CoreConfig) -> Self {
        Self {
            search: Arc::new(GeminiClient::from_config(config)),
            locale: config.locale,
            temperature: config.temperature,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Run a single presence analysis for `image`.
    ///
    /// Every upstream failure is logged and reported as the same generic
    /// [`AnalysisError`]; nothing partial is returned.
    pub async fn analyze(&self, image: &ImageInput) -> Result<AnalysisResult, AnalysisError> {
        let prompt = build_prompt(self.locale);
        let request = GroundedRequest {
            prompt: &prompt,
            image,
            temperature: self.temperature,
        };

        debug!(
            provider = self.search.provider_name(),
            locale = %self.locale,
            "Starting presence analysis"
        );

        let response = self.search.generate(&request).await.map_err(|e| {
            error!(provider = self.search.provider_name(), error = %e, "Presence analysis failed");
            AnalysisError::new(self.locale.failure_message())
        })?;

        let result = reshape(response, self.locale);
        debug!(matches = result.matches.len(), "Presence analysis complete");
        Ok(result)
    }
}

/// Keep social-media citations and build the final result.
///
/// Order is the upstream order; duplicates are kept. When nothing survives
/// the description is replaced with the locale's fixed fallback.
pub fn reshape(response: GroundedResponse, locale: Locale) -> AnalysisResult {
    let matches: Vec<MatchRecord> = response
        .citations
        .into_iter()
        .filter_map(|citation| citation.web)
        .filter(|web| is_social_url(&web.uri))
        .map(|web| MatchRecord {
            title: web
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| locale.placeholder_title().to_string()),
            url: web.uri,
            snippet: web.snippet,
        })
        .collect();

    let description = if matches.is_empty() {
        locale.no_trace_fallback().to_string()
    } else {
        response
            .text
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| locale.no_data_description().to_string())
    };

    AnalysisResult {
        description,
        matches,
    }
}
