mod catalog;
mod config;
mod fetch;
mod parser;
mod video;
mod writer;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::catalog::Catalog;
use crate::config::ApiConfig;

#[derive(Parser)]
#[command(name = "meetup-videos", version, about = "Fetch and catalog Go Meetup Prague YouTube videos")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch all channel videos and write the markdown catalog
    Fetch {
        /// Env file holding GOOGLE_API_KEY and CHANNEL_ID
        #[arg(long, default_value = ".env")]
        env_file: PathBuf,

        /// Markdown catalog to write
        #[arg(short, long, default_value = "data/videos.md")]
        output: PathBuf,
    },
    /// Convert the markdown catalog into JSON for the site data layer
    Convert {
        /// Markdown catalog to read
        #[arg(short, long, default_value = "data/videos.md")]
        input: PathBuf,

        /// JSON file to write
        #[arg(short, long, default_value = "data/videos.json")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Fetch { env_file, output } => run_fetch(&env_file, &output),
        Command::Convert { input, output } => run_convert(&input, &output),
    }
}

fn run_fetch(env_file: &Path, output: &Path) -> anyhow::Result<()> {
    // Credentials are resolved up front; no request is made without them.
    let config = ApiConfig::from_env(env_file)?;

    eprintln!("=== Stage 1: Fetching videos ===");
    let t = std::time::Instant::now();
    let videos = fetch::fetch_all(&config)?;
    eprintln!("Found {} videos", videos.len());
    eprintln!("  Fetch took {:.2}s", t.elapsed().as_secs_f64());

    eprintln!("=== Stage 2: Writing catalog ===");
    let t = std::time::Instant::now();
    let count = videos.len();
    let catalog = Catalog::from_videos(videos);
    writer::write_markdown(&catalog, output)?;
    eprintln!("  Write took {:.2}s", t.elapsed().as_secs_f64());

    eprintln!("Successfully wrote {} videos to {}", count, output.display());
    Ok(())
}

fn run_convert(input: &Path, output: &Path) -> anyhow::Result<()> {
    let text =
        fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))?;

    let parsed = parser::parse(&text);
    parser::write_json(&parsed, output)?;

    eprintln!(
        "Successfully converted {} to {}",
        input.display(),
        output.display()
    );
    Ok(())
}
