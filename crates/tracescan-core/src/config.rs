//! Environment-driven configuration.

use crate::error::{ConfigError, ConfigResult};
use crate::locale::Locale;

/// Primary API key variable.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Fallback API key variable.
pub const API_KEY_FALLBACK_ENV: &str = "API_KEY";

pub const MODEL_ENV: &str = "TRACESCAN_MODEL";
pub const BASE_URL_ENV: &str = "TRACESCAN_BASE_URL";
pub const LOCALE_ENV: &str = "TRACESCAN_LOCALE";

pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Low randomness: literal answers over creative ones.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Settings for building a [`crate::PresenceAnalyzer`] backed by Gemini.
#[derive(Clone, PartialEq)]
pub struct CoreConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub locale: Locale,
    pub temperature: f32,
}

impl std::fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("locale", &self.locale)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl CoreConfig {
    /// Create a config with defaults for everything but the key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            locale: Locale::default(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Load from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_blank(API_KEY_ENV)
            .or_else(|| non_blank(API_KEY_FALLBACK_ENV))
            .ok_or_else(|| ConfigError::MissingApiKey(API_KEY_ENV.to_string()))?;

        let mut config = Self::new(api_key.trim());
        if let Some(model) = non_blank(MODEL_ENV) {
            config.model = model;
        }
        if let Some(base_url) = non_blank(BASE_URL_ENV) {
            config.base_url = base_url;
        }
        if let Some(locale) = non_blank(LOCALE_ENV) {
            config.locale = locale.parse()?;
        }
        Ok(config)
    }

    pub fn with_temperature(mut self, temperature: f32) -> ConfigResult<Self> {
        validate_temperature(temperature)?;
        self.temperature = temperature;
        Ok(self)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey(API_KEY_ENV.to_string()));
        }
        validate_temperature(self.temperature)
    }
}

fn validate_temperature(temperature: f32) -> ConfigResult<()> {
    if (0.0..=2.0).contains(&temperature) {
        Ok(())
    } else {
        Err(ConfigError::InvalidTemperature(temperature))
    }
}
