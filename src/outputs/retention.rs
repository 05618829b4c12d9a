//! Digest retention.
//!
//! Keeps the newest `retain` digest files (by the date in the file name) and
//! deletes the rest. Only names shaped like `YYYY-MM-DD.md` are considered;
//! a name with that shape that is not a real calendar date aborts the pass.

use chrono::NaiveDate;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, instrument};

/// Number of digest files kept on disk.
pub const DEFAULT_RETENTION: usize = 10;

static DIGEST_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{4}-[0-9]{2}-[0-9]{2})\.md$").expect("valid digest name regex"));

#[derive(Error, Debug)]
pub enum PruneError {
    #[error("failed to access digest directory: {0}")]
    Io(#[from] io::Error),
    #[error("digest file {file_name} does not carry a valid date: {source}")]
    InvalidDate {
        file_name: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// A digest file on disk together with the date parsed from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestFile {
    pub date: NaiveDate,
    pub path: PathBuf,
}

/// List digest files in `dir`, newest first.
///
/// A missing directory yields an empty list.
pub async fn list_digests(dir: &Path) -> Result<Vec<DigestFile>, PruneError> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut digests = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        let Some(caps) = DIGEST_NAME.captures(name) else {
            debug!(name, "Ignoring non-digest file");
            continue;
        };
        let date = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").map_err(|source| {
            PruneError::InvalidDate {
                file_name: name.to_string(),
                source,
            }
        })?;
        digests.push(DigestFile {
            date,
            path: entry.path(),
        });
    }

    Ok(digests
        .into_iter()
        .sorted_by(|a, b| b.date.cmp(&a.date))
        .collect())
}

/// Everything past the first `retain` entries of a newest-first list.
pub fn expired(digests: Vec<DigestFile>, retain: usize) -> Vec<DigestFile> {
    digests.into_iter().skip(retain).collect()
}

/// Delete all but the newest `retain` digest files in `dir`.
///
/// Returns the paths that were removed.
#[instrument(level = "info", skip_all, fields(dir = %dir.display(), retain = retain))]
pub async fn prune_digests(dir: &Path, retain: usize) -> Result<Vec<PathBuf>, PruneError> {
    let digests = list_digests(dir).await?;
    let total = digests.len();

    let mut removed = Vec::new();
    for digest in expired(digests, retain) {
        fs::remove_file(&digest.path).await?;
        info!(path = %digest.path.display(), date = %digest.date, "Removed expired digest");
        removed.push(digest.path);
    }

    debug!(total, removed = removed.len(), "Retention pass complete");
    Ok(removed)
}
