//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use tracescan_core::{CoreConfig, PresenceAnalyzer};
use tracescan_web::ServerConfig;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, default_value = "3030")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Maximum request body size in MiB
    #[arg(long, default_value = "20")]
    pub body_limit_mb: usize,

    /// Also write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

fn body_limit_bytes(mb: usize) -> Result<usize> {
    mb.checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("--body-limit-mb {} is too large", mb))
}

pub async fn execute(args: ServeArgs, config: &CoreConfig) -> Result<()> {
    let body_limit = body_limit_bytes(args.body_limit_mb)?;
    let analyzer = PresenceAnalyzer::from_config(config);

    eprintln!();
    eprintln!("  {} {}", "Tracescan".cyan().bold(), "API Server".bold());
    eprintln!();
    eprintln!("  {}      {}", "Model".green(), config.model);
    eprintln!("  {}     {}", "Locale".green(), config.locale);
    eprintln!(
        "  {}    POST http://{}:{}/api/analyze",
        "Analyze".green(),
        args.host,
        args.port
    );
    eprintln!(
        "  {}     GET  http://{}:{}/api/health",
        "Health".green(),
        args.host,
        args.port
    );
    eprintln!();
    eprintln!("  {}", "Ctrl+C to stop".dimmed());
    eprintln!();

    let server = ServerConfig {
        host: args.host,
        port: args.port,
        body_limit,
    };
    tracescan_web::run_server(analyzer, server).await?;

    Ok(())
}
