//! Command-line interface definitions.
//!
//! Every option has a default, so running the binary without arguments
//! performs the standard collection run.

use crate::driver::{DEFAULT_LANGUAGES, DEFAULT_OUTPUT_DIR, RunConfig};
use crate::outputs::retention::DEFAULT_RETENTION;
use crate::scrapers::github::{GITHUB_ORIGIN, REQUEST_TIMEOUT};
use clap::Parser;
use std::path::PathBuf;
use url::Url;

/// Command-line arguments for the trending digest collector.
///
/// # Examples
///
/// ```sh
/// # Default run: all languages into ./trending, keep 10 digests
/// github_trending_digest
///
/// # Only Rust and Go, keep a month of digests
/// github_trending_digest -l rust -l go -r 31 -o ./digests
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory for the dated Markdown digest files
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Number of digest files to keep
    #[arg(short, long, default_value_t = DEFAULT_RETENTION)]
    pub retain: usize,

    /// Language to scrape (repeatable); replaces the built-in list
    #[arg(short, long = "language")]
    pub languages: Vec<String>,

    /// Origin serving the trending pages
    #[arg(long, default_value = GITHUB_ORIGIN)]
    pub base_url: Url,
}

impl Cli {
    /// Convert parsed arguments into the driver configuration.
    pub fn into_config(self) -> RunConfig {
        let languages = if self.languages.is_empty() {
            DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect()
        } else {
            self.languages
        };
        RunConfig {
            base_url: self.base_url,
            output_dir: self.output_dir,
            languages,
            retention: self.retain,
            timeout: REQUEST_TIMEOUT,
        }
    }
}
