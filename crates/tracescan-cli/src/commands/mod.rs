//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracescan_core::config::{BASE_URL_ENV, LOCALE_ENV, MODEL_ENV};
use tracescan_core::{CoreConfig, Locale};

pub mod scan;
pub mod serve;

/// Tracescan - find public traces of a photo on social media
#[derive(Parser)]
#[command(name = "tracescan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Model to run the grounded search with
    #[arg(long, global = true, env = MODEL_ENV)]
    pub model: Option<String>,

    /// Report language (ar, en)
    #[arg(long, global = true, env = LOCALE_ENV)]
    pub locale: Option<Locale>,

    /// Sampling temperature (0.0 - 2.0)
    #[arg(long, global = true)]
    pub temperature: Option<f32>,

    /// API base URL
    #[arg(long, global = true, env = BASE_URL_ENV)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan one or more photos for social-media traces
    Scan(scan::ScanArgs),

    /// Start the HTTP API server
    Serve(serve::ServeArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = self.core_config()?;

        match self.command {
            Commands::Scan(args) => scan::execute(args, &config).await,
            Commands::Serve(args) => serve::execute(args, &config).await,
        }
    }

    /// Environment config with command-line overrides applied.
    fn core_config(&self) -> Result<CoreConfig> {
        let mut config = CoreConfig::from_env().context("Failed to load configuration")?;

        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(locale) = self.locale {
            config.locale = locale;
        }
        if let Some(temperature) = self.temperature {
            config = config.with_temperature(temperature)?;
        }

        config.validate()?;
        tracing::debug!(?config, "Loaded configuration");
        Ok(config)
    }
}
