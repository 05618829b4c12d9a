//! Markdown digest rendering and appending.
//!
//! Each language becomes one section of the day's digest file:
//!
//! ```text
//! ## Rust
//!
//! - [owner/name](https://github.com/owner/name) - description
//! ```
//!
//! Sections are only ever appended. Rows without a description render the
//! literal text `None`.

use crate::models::LanguageResult;
use crate::utils::capitalize;
use chrono::{Local, NaiveDate};
use std::fmt::Write;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument};

/// Heading used for the empty language, i.e. the unfiltered trending page.
pub const ALL_LANGUAGES_HEADING: &str = "All Languages";

/// Heading text for a language label.
pub fn section_heading(language: &str) -> String {
    if language.is_empty() {
        ALL_LANGUAGES_HEADING.to_string()
    } else {
        capitalize(language)
    }
}

/// Render one language section: heading, blank line, one bullet per entry.
pub fn render_section(language: &str, results: &LanguageResult) -> String {
    let mut md = String::new();
    writeln!(md, "## {}\n", section_heading(language)).unwrap();
    for entry in results.iter() {
        writeln!(
            md,
            "- [{}]({}) - {}",
            entry.title,
            entry.url,
            entry.description.as_deref().unwrap_or("None")
        )
        .unwrap();
    }
    md
}

/// Path of the digest file for `date` inside `output_dir`.
pub fn digest_path(output_dir: &Path, date: NaiveDate) -> PathBuf {
    output_dir.join(format!("{}.md", date.format("%Y-%m-%d")))
}

/// Append `content` to the digest for `date`, creating directories and file.
///
/// The handle is dropped (and closed) before returning on every path.
#[instrument(level = "info", skip_all, fields(%date, output_dir = %output_dir.display(), bytes = content.len()))]
pub async fn append_section(
    output_dir: &Path,
    date: NaiveDate,
    content: &str,
) -> io::Result<PathBuf> {
    fs::create_dir_all(output_dir).await?;
    let path = digest_path(output_dir, date);

    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .await?;
    file.write_all(content.as_bytes()).await?;
    file.flush().await?;

    info!(path = %path.display(), "Appended digest section");
    Ok(path)
}

/// Render `results` for `language` and append it to today's digest.
pub async fn write_language(
    output_dir: &Path,
    language: &str,
    results: &LanguageResult,
) -> io::Result<PathBuf> {
    let section = render_section(language, results);
    let today = Local::now().date_naive();
    append_section(output_dir, today, &section).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrendingEntry;

    fn sample() -> LanguageResult {
        vec![
            TrendingEntry {
                title: "foo/bar".to_string(),
                url: "https://github.com/foo/bar".to_string(),
                description: Some("desc".to_string()),
            },
            TrendingEntry {
                title: "baz/qux".to_string(),
                url: "https://github.com/baz/qux".to_string(),
                description: None,
            },
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_section_heading() {
        assert_eq!(section_heading(""), "All Languages");
        assert_eq!(section_heading("rust"), "Rust");
        assert_eq!(section_heading("typeScript"), "Typescript");
        assert_eq!(section_heading("unknown"), "Unknown");
    }

    #[test]
    fn test_render_empty_section() {
        assert_eq!(
            render_section("go", &LanguageResult::new()),
            "## Go\n\n"
        );
    }

    #[test]
    fn test_render_entries() {
        let md = render_section("", &sample());
        assert_eq!(
            md,
            "## All Languages\n\n\
             - [foo/bar](https://github.com/foo/bar) - desc\n\
             - [baz/qux](https://github.com/baz/qux) - None\n"
        );
    }

    #[test]
    fn test_render_single_entry() {
        let results: LanguageResult = vec![TrendingEntry {
            title: "foo/bar".to_string(),
            url: "https://github.com/foo/bar".to_string(),
            description: Some("desc".to_string()),
        }]
        .into_iter()
        .collect();
        assert_eq!(
            render_section("", &results),
            "## All Languages\n\n- [foo/bar](https://github.com/foo/bar) - desc\n"
        );
    }

    #[test]
    fn test_digest_path() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(
            digest_path(Path::new("./trending"), date),
            PathBuf::from("./trending/2024-03-07.md")
        );
    }

    #[tokio::test]
    async fn test_append_section_creates_and_appends() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("trending");
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();

        let path = append_section(&dir, date, "## Rust\n\n").await.unwrap();
        append_section(&dir, date, "## Go\n\n").await.unwrap();

        assert_eq!(path, dir.join("2024-03-07.md"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "## Rust\n\n## Go\n\n");
    }

    #[tokio::test]
    async fn test_write_language_uses_today() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_language(tmp.path(), "rust", &sample()).await.unwrap();

        let expected = digest_path(tmp.path(), Local::now().date_naive());
        assert_eq!(path, expected);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("## Rust\n\n- [foo/bar]"));
    }
}
