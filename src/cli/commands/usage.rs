use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::config::load_config;
use crate::usage::runner::{try_fetch_report, try_read_report, ReportKind};
use crate::usage::{aggregate, BlockUsage, UsageSnapshot};

const BAR_WIDTH: usize = 30;

/// Run the usage command: gather the three reports, aggregate, render
pub async fn run(from_dir: Option<PathBuf>, json: bool, limit: usize) -> Result<()> {
    let snapshot = match from_dir {
        Some(dir) => {
            let daily = try_read_report(&dir, ReportKind::Daily);
            let monthly = try_read_report(&dir, ReportKind::Monthly);
            let blocks = try_read_report(&dir, ReportKind::Blocks);
            aggregate(daily.as_ref(), monthly.as_ref(), blocks.as_ref())
        }
        None => {
            let config = load_config()?;
            let (daily, monthly, blocks) = tokio::join!(
                try_fetch_report(&config, ReportKind::Daily),
                try_fetch_report(&config, ReportKind::Monthly),
                try_fetch_report(&config, ReportKind::Blocks),
            );
            aggregate(daily.as_ref(), monthly.as_ref(), blocks.as_ref())
        }
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&snapshot).context("Failed to serialize snapshot")?
        );
        return Ok(());
    }

    print_dashboard(&snapshot, limit);
    Ok(())
}

fn print_dashboard(snapshot: &UsageSnapshot, limit: usize) {
    println!("\n{}", "  Usage Dashboard".bold().bright_yellow());
    println!("{}", "  ─────────────────────────────".dimmed());

    println!(
        "\n  {} {}",
        "Total cost:".bold(),
        format!("${:.2}", snapshot.total_cost).bright_green()
    );
    println!(
        "  {} {} in / {} out / {} cache write / {} cache read",
        "Tokens:".bold(),
        humanize_tokens(snapshot.input_tokens).bright_yellow(),
        humanize_tokens(snapshot.output_tokens).bright_yellow(),
        humanize_tokens(snapshot.cache_creation_tokens).dimmed(),
        humanize_tokens(snapshot.cache_read_tokens).dimmed()
    );

    if !snapshot.daily.is_empty() {
        println!("\n  {}", "Daily:".bold());
        // Most recent first is a display choice; the snapshot keeps
        // source order
        for day in snapshot.daily.iter().rev().take(limit) {
            println!(
                "  {} {} {} {}",
                day.date.dimmed(),
                cost_bar(day.cost, snapshot.max_daily_cost).bright_yellow(),
                format!("${:.2}", day.cost),
                humanize_tokens(day.total_tokens).dimmed()
            );
        }
    }

    if !snapshot.monthly.is_empty() {
        println!("\n  {}", "Monthly:".bold());
        for month in snapshot.monthly.iter().rev().take(limit) {
            println!(
                "  {} {} {} {}",
                format!("{:>10}", month.month).dimmed(),
                cost_bar(month.cost, snapshot.max_monthly_cost).bright_blue(),
                format!("${:.2}", month.cost),
                humanize_tokens(month.total_tokens).dimmed()
            );
        }
    }

    if !snapshot.blocks.is_empty() {
        println!("\n  {}", "Billing blocks (5h):".bold());
        for block in snapshot.blocks.iter().rev().take(limit) {
            let marker = if block.is_active {
                "●".green()
            } else {
                "○".dimmed()
            };
            println!(
                "  {} {} {} {} {}",
                marker,
                block_window(block).dimmed(),
                cost_bar(block.cost, snapshot.max_block_cost).bright_magenta(),
                format!("${:.2}", block.cost),
                humanize_tokens(block.total_tokens).dimmed()
            );
            if block.is_active {
                if let Some(remaining) = remaining_label(&block.end_time) {
                    println!("      {}", remaining.green());
                }
            }
        }
    }

    println!();
}

/// Bar scaled against the section max; the 1.0 floor on empty sections
/// keeps the ratio finite
fn cost_bar(cost: f64, max_cost: f64) -> String {
    let ratio = (cost / max_cost).clamp(0.0, 1.0);
    let filled = (ratio * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Compact token count: 1.2M, 530.4K, 999
fn humanize_tokens(tokens: u64) -> String {
    if tokens >= 1_000_000 {
        format!("{:.1}M", tokens as f64 / 1_000_000.0)
    } else if tokens >= 1_000 {
        format!("{:.1}K", tokens as f64 / 1_000.0)
    } else {
        tokens.to_string()
    }
}

/// "Feb 05 10:00–15:00" from the block's ISO timestamps, falling back to
/// the raw strings when they do not parse
fn block_window(block: &BlockUsage) -> String {
    let start = parse_timestamp(&block.start_time);
    let end = parse_timestamp(&block.end_time);
    match (start, end) {
        (Some(s), Some(e)) => format!(
            "{}\u{2013}{}",
            s.format("%b %d %H:%M"),
            e.format("%H:%M")
        ),
        _ => format!("{}\u{2013}{}", block.start_time, block.end_time),
    }
}

fn remaining_label(end_time: &str) -> Option<String> {
    let end = parse_timestamp(end_time)?;
    let left = end.signed_duration_since(Utc::now());
    if left.num_seconds() <= 0 {
        return None;
    }
    Some(format!(
        "{}h {:02}m remaining",
        left.num_hours(),
        left.num_minutes() % 60
    ))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_tokens() {
        assert_eq!(humanize_tokens(999), "999");
        assert_eq!(humanize_tokens(1_000), "1.0K");
        assert_eq!(humanize_tokens(530_400), "530.4K");
        assert_eq!(humanize_tokens(1_234_567), "1.2M");
    }

    #[test]
    fn test_cost_bar_bounds() {
        assert_eq!(cost_bar(0.0, 1.0).chars().filter(|&c| c == '█').count(), 0);
        assert_eq!(
            cost_bar(1.0, 1.0).chars().filter(|&c| c == '█').count(),
            BAR_WIDTH
        );
        // Over-max costs clamp rather than overflow the bar
        assert_eq!(
            cost_bar(5.0, 1.0).chars().filter(|&c| c == '█').count(),
            BAR_WIDTH
        );
    }

    #[test]
    fn test_block_window_falls_back_to_raw() {
        let block = BlockUsage {
            start_time: "not-a-time".to_string(),
            end_time: "also-not".to_string(),
            ..Default::default()
        };
        assert_eq!(block_window(&block), "not-a-time\u{2013}also-not");
    }

    #[test]
    fn test_block_window_formats_iso() {
        let block = BlockUsage {
            start_time: "2026-02-05T10:00:00Z".to_string(),
            end_time: "2026-02-05T15:00:00Z".to_string(),
            ..Default::default()
        };
        assert_eq!(block_window(&block), "Feb 05 10:00\u{2013}15:00");
    }

    #[test]
    fn test_remaining_label_past_end() {
        assert_eq!(remaining_label("2020-01-01T00:00:00Z"), None);
        assert_eq!(remaining_label("garbage"), None);
    }
}
