//! # GitHub Trending Digest
//!
//! Scrapes GitHub's trending pages for a list of languages and appends one
//! Markdown section per language to a dated digest file, keeping only the
//! newest digests on disk.
//!
//! ## Usage
//!
//! ```sh
//! github_trending_digest
//! ```
//!
//! ## Pipeline
//!
//! For each language, sequentially:
//! 1. **Scraping**: fetch the default and zh-locale trending pages and merge them
//! 2. **Output**: append a section to `./trending/YYYY-MM-DD.md`
//! 3. **Retention**: delete all but the 10 newest digest files

use clap::Parser;
use std::error::Error;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod driver;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use scrapers::github::TrendingClient;
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("github_trending_digest starting up");

    let config = Cli::parse().into_config();
    debug!(?config, "Parsed CLI arguments");

    ensure_writable_dir(&config.output_dir).await?;

    let client = TrendingClient::new(&config.base_url, config.timeout)?;
    let summary = driver::run(&client, &config).await?;
    drop(client);

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        sections = summary.sections.len(),
        entries = summary.total_entries(),
        removed = summary.removed.len(),
        "Execution complete"
    );

    Ok(())
}
