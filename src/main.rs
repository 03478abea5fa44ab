mod cli;
mod config;
mod markdown;
mod usage;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Usage {
            from_dir,
            json,
            limit,
        } => cli::commands::usage::run(from_dir, json, limit).await,
        Commands::Render { file, json } => cli::commands::render::run(file, json).await,
    }
}
