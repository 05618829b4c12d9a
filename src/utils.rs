//! Utility functions for string formatting and file system checks.
//!
//! - Label capitalization for digest section headings
//! - String truncation for bounded log fields
//! - File system validation for the digest directory

use std::io;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Truncate a string for logging purposes.
///
/// Long strings are cut at the last character boundary at or before `max`
/// bytes, with an ellipsis and the number of dropped bytes appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log("a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Capitalize a label: first character upper case, the rest lower case.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(capitalize("typeScript"), "Typescript");
/// assert_eq!(capitalize("c++"), "C++");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + &c.as_str().to_lowercase(),
    }
}

/// Create the digest directory if needed and prove it accepts new files.
///
/// A zero-length probe named after the current process is written and then
/// removed, so a read-only mount or a path occupied by a regular file fails
/// here, before any page is fetched.
#[instrument(level = "info", skip_all, fields(path = %dir.display()))]
pub async fn ensure_writable_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir).await?;
    let probe = dir.join(format!(".write-probe-{}", std::process::id()));
    fs::write(&probe, b"").await?;
    fs::remove_file(&probe).await?;
    info!("Digest directory is writable");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        // Each CJK char is 3 bytes; cutting at 4 must back off to 3.
        let result = truncate_for_log("中文描述", 4);
        assert_eq!(result, "中…(+9 bytes)");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("python"), "Python");
        assert_eq!(capitalize("typeScript"), "Typescript");
        assert_eq!(capitalize("c++"), "C++");
        assert_eq!(capitalize("HTML"), "Html");
        assert_eq!(capitalize(""), "");
    }

    #[tokio::test]
    async fn test_writable_dir_is_created_and_left_clean() {
        let tmp = tempfile::tempdir().unwrap();
        let digests = tmp.path().join("site").join("trending");

        ensure_writable_dir(&digests).await.unwrap();
        // Second call on an existing directory is fine too.
        ensure_writable_dir(&digests).await.unwrap();

        assert!(digests.is_dir());
        assert_eq!(std::fs::read_dir(&digests).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_writable_dir_rejects_regular_file() {
        let tmp = tempfile::tempdir().unwrap();
        let occupied = tmp.path().join("trending");
        std::fs::write(&occupied, "not a directory").unwrap();

        assert!(ensure_writable_dir(&occupied).await.is_err());
    }
}
