//! Scan command: analyze photos from disk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use tracescan_core::{AnalysisResult, CoreConfig, ImageInput, Platform, PresenceAnalyzer};

use crate::output;

#[derive(Args)]
pub struct ScanArgs {
    /// Image files to scan
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// MIME type for every file (detected from the extension by default)
    #[arg(long)]
    pub mime_type: Option<String>,

    /// Print results as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Only show matches on this platform (facebook, instagram, x, ...)
    #[arg(long, value_parser = parse_platform)]
    pub platform: Option<Platform>,
}

fn parse_platform(s: &str) -> Result<Platform, String> {
    Platform::parse(s).ok_or_else(|| format!("unknown platform '{}'", s))
}

/// Outcome for one file. Load failures and analysis failures are both
/// reported as a single message.
type FileOutcome = Result<AnalysisResult, String>;

pub async fn execute(args: ScanArgs, config: &CoreConfig) -> Result<()> {
    let analyzer = PresenceAnalyzer::from_config(config);
    run(&args, &analyzer).await
}

async fn run(args: &ScanArgs, analyzer: &PresenceAnalyzer) -> Result<()> {
    let spinner = (!args.json).then(|| spinner(args.files.len()));
    let outcomes = scan_all(analyzer, &args.files, args.mime_type.as_deref()).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    for (path, outcome) in args.files.iter().zip(&outcomes) {
        if args.json {
            print_json(path, outcome);
        } else {
            match outcome {
                Ok(result) => output::print_report(path, result, args.platform),
                Err(message) => output::print_failure(path, message),
            }
        }
    }

    let failures = outcomes.iter().filter(|o| o.is_err()).count();
    if failures > 0 {
        anyhow::bail!("{} of {} scan(s) failed", failures, outcomes.len());
    }
    Ok(())
}

/// Scan every file as an independent analysis, all at once. Outcomes come
/// back in input order.
async fn scan_all(
    analyzer: &PresenceAnalyzer,
    files: &[PathBuf],
    mime_type: Option<&str>,
) -> Vec<FileOutcome> {
    join_all(files.iter().map(|path| scan_file(analyzer, path, mime_type))).await
}

async fn scan_file(analyzer: &PresenceAnalyzer, path: &Path, mime_type: Option<&str>) -> FileOutcome {
    let image = ImageInput::from_path(path, mime_type).map_err(|e| e.to_string())?;
    tracing::debug!(file = %path.display(), mime_type = %image.mime_type, "Loaded image");
    analyzer
        .analyze(&image)
        .await
        .map_err(|e| e.message().to_string())
}

fn spinner(count: usize) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!(
        "{} {} photo(s) across social networks...",
        "Searching".bold(),
        count
    ));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn print_json(path: &Path, outcome: &FileOutcome) {
    let line = match outcome {
        Ok(result) => json!({ "file": path.display().to_string(), "result": result }),
        Err(message) => json!({ "file": path.display().to_string(), "error": message }),
    };
    println!("{}", line);
}
