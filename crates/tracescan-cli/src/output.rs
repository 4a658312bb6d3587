//! Terminal output formatting.

use std::path::Path;

use colored::{ColoredString, Colorize};
use tracescan_core::{AnalysisResult, MatchRecord, Platform};
use unicode_width::UnicodeWidthStr;

/// Print the report for one scanned file.
pub fn print_report(path: &Path, result: &AnalysisResult, only: Option<Platform>) {
    let width = term_width();

    println!("{} {}", "■".cyan(), path.display().to_string().bold());
    println!("{}", "─".repeat(width.min(80)).dimmed());
    println!("{}", result.description);
    println!();

    if result.matches.is_empty() {
        println!("{}", "No social-media matches.".dimmed());
        println!();
        return;
    }

    let platforms = visible_platforms(result, only);

    if platforms.is_empty() {
        if let Some(p) = only {
            println!("{}", format!("No matches on {}.", p).dimmed());
            println!();
        }
        return;
    }

    for platform in platforms {
        let matches = result.matches_for(platform);
        println!("  {} ({})", platform_label(platform), matches.len());
        for m in matches {
            print_match(m, width);
        }
        println!();
    }

    println!(
        " {} {} match(es) on {} platform(s)",
        "■".cyan(),
        result.matches.len().to_string().bold(),
        result.platforms().len()
    );
    println!();
}

/// Platforms to print, in first-seen order, narrowed to `only` if given.
fn visible_platforms(result: &AnalysisResult, only: Option<Platform>) -> Vec<Platform> {
    result
        .platforms()
        .into_iter()
        .filter(|p| only.map_or(true, |o| o == *p))
        .collect()
}

/// Print a failed scan.
pub fn print_failure(path: &Path, message: &str) {
    println!("{} {}", "✗".red().bold(), path.display().to_string().bold());
    println!("  {}", message.red());
    println!();
}

fn print_match(m: &MatchRecord, width: usize) {
    let budget = width.saturating_sub(6).max(20);
    println!("    {} {}", "•".dimmed(), truncate_visual(&m.title, budget).bold());
    println!("      {}", m.url.underline().blue());
    if let Some(snippet) = &m.snippet {
        println!("      {}", truncate_visual(snippet, budget).dimmed());
    }
}

fn platform_label(platform: Platform) -> ColoredString {
    let name = platform.display_name();
    match platform {
        Platform::Facebook | Platform::LinkedIn => name.blue().bold(),
        Platform::Instagram => name.magenta().bold(),
        Platform::X | Platform::Threads => name.white().bold(),
        Platform::TikTok => name.cyan().bold(),
        Platform::Reddit => name.red().bold(),
        Platform::Pinterest => name.red(),
        Platform::Snapchat => name.yellow().bold(),
        Platform::Other => name.normal(),
    }
}

/// Get terminal width, defaulting to 80.
fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}
