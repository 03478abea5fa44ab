pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ccdash")]
#[command(about = "Terminal usage dashboard and transcript renderer for Claude Code")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the usage dashboard (daily / monthly / billing blocks)
    Usage {
        /// Read daily.json / monthly.json / blocks.json from a directory
        /// instead of invoking the usage CLI
        #[arg(long, value_name = "DIR")]
        from_dir: Option<PathBuf>,

        /// Print the aggregated snapshot as JSON
        #[arg(long)]
        json: bool,

        /// Show at most this many rows per section
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Render a markdown transcript to the terminal
    Render {
        /// Path to the markdown file
        file: PathBuf,

        /// Print the parsed blocks as JSON
        #[arg(long)]
        json: bool,
    },
}
