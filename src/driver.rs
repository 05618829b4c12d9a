//! The collection loop.
//!
//! For each configured language, in order: scrape both locale variants,
//! append the language's section to today's digest, then run a retention
//! pass over the digest directory.

use crate::outputs::{markdown, retention};
use crate::scrapers::github::{self, GITHUB_ORIGIN, REQUEST_TIMEOUT, TrendingClient};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, instrument};
use url::Url;

/// Languages scraped by a default run. `""` is the unfiltered trending page.
pub const DEFAULT_LANGUAGES: &[&str] = &[
    "",
    "python",
    "javascript",
    "typeScript",
    "go",
    "rust",
    "c++",
    "c",
    "html",
    "css",
    "unknown",
];

pub const DEFAULT_OUTPUT_DIR: &str = "./trending";

/// Everything a run needs besides the HTTP client.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Origin serving `/trending/<language>` and prefixed to repository links.
    pub base_url: Url,
    /// Directory holding the `YYYY-MM-DD.md` digests.
    pub output_dir: PathBuf,
    pub languages: Vec<String>,
    /// Number of digest files kept after each retention pass.
    pub retention: usize,
    pub timeout: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(GITHUB_ORIGIN).expect("valid GitHub origin"),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            languages: DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect(),
            retention: retention::DEFAULT_RETENTION,
            timeout: REQUEST_TIMEOUT,
        }
    }
}

#[derive(Error, Debug)]
pub enum RunError {
    #[error("failed to append digest section: {0}")]
    Write(#[from] io::Error),
    #[error("retention pass failed: {0}")]
    Prune(#[from] retention::PruneError),
}

/// What a completed run produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// `(language, entries written)` in the order sections were appended.
    pub sections: Vec<(String, usize)>,
    /// Digest files removed across all retention passes.
    pub removed: Vec<PathBuf>,
}

impl RunSummary {
    pub fn total_entries(&self) -> usize {
        self.sections.iter().map(|(_, n)| n).sum()
    }
}

/// Scrape, write and prune once per configured language.
///
/// Fetch failures only shrink a section; write and retention failures end
/// the run.
#[instrument(level = "info", skip_all, fields(languages = config.languages.len()))]
pub async fn run(client: &TrendingClient, config: &RunConfig) -> Result<RunSummary, RunError> {
    let mut summary = RunSummary::default();

    for language in &config.languages {
        let results = github::scrape_language(client, language).await;
        let path = markdown::write_language(&config.output_dir, language, &results).await?;
        info!(
            language = %language,
            count = results.len(),
            path = %path.display(),
            "Wrote language section"
        );
        summary.sections.push((language.clone(), results.len()));

        let removed = retention::prune_digests(&config.output_dir, config.retention).await?;
        summary.removed.extend(removed);
    }

    Ok(summary)
}
