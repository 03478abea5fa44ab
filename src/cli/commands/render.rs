use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::markdown::{parse_blocks, Block};

/// Run the render command: parse a transcript and print styled blocks
pub async fn run(file: PathBuf, json: bool) -> Result<()> {
    let content = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let blocks = parse_blocks(&content);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&blocks).context("Failed to serialize blocks")?
        );
        return Ok(());
    }

    for block in &blocks {
        print_block(block);
    }
    Ok(())
}

fn print_block(block: &Block) {
    match block {
        Block::Text { content } => {
            println!("{}\n", content);
        }
        Block::Code { content, language } => {
            if !language.is_empty() {
                println!("{}", format!("  [{}]", language).dimmed());
            }
            for line in content.split('\n') {
                println!("  {}", line.bright_white().on_black());
            }
            println!();
        }
        Block::Heading { content, level } => {
            let styled = match level {
                1 => content.bold().bright_yellow(),
                2 => content.bold().bright_cyan(),
                _ => content.bold(),
            };
            println!("{} {}\n", "#".repeat(*level).dimmed(), styled);
        }
        Block::ListItem { content, indent } => {
            println!("{}{} {}", "  ".repeat(indent + 1), "•".bright_yellow(), content);
        }
        Block::Quote { content } => {
            println!("  {} {}", "│".dimmed(), content.italic().dimmed());
        }
        Block::Table { headers, rows } => {
            let widths = column_widths(headers, rows);
            println!("  {}", format_row(headers, &widths).bold());
            let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
            println!("  {}", rule.join("─┼─").dimmed());
            for row in rows {
                println!("  {}", format_row(row, &widths));
            }
            println!();
        }
    }
}

/// Widest cell per column, across header and data rows
fn column_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    let columns = headers
        .len()
        .max(rows.iter().map(|r| r.len()).max().unwrap_or(0));
    let mut widths = vec![0usize; columns];
    for (i, h) in headers.iter().enumerate() {
        widths[i] = widths[i].max(h.chars().count());
    }
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }
    widths
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, w)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            format!("{:<width$}", cell, width = w)
        })
        .collect();
    padded.join(" │ ")
}
