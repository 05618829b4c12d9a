//! Data models for scraped trending repositories.
//!
//! - [`TrendingEntry`]: one repository row scraped from a trending page
//! - [`LanguageResult`]: the ordered, title-keyed entries for one language

use std::collections::HashMap;

/// A single repository as listed on a GitHub trending page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingEntry {
    /// `owner/name`, with whitespace and newlines removed.
    pub title: String,
    /// Absolute URL of the repository.
    pub url: String,
    /// The repository description, `None` when the row has none.
    pub description: Option<String>,
}

/// Trending entries for one language, keyed by title.
///
/// Iteration follows insertion order. Inserting a title that is already
/// present replaces the entry but keeps its original position, so a merge
/// behaves like a right-biased map union.
#[derive(Debug, Default, Clone)]
pub struct LanguageResult {
    entries: Vec<TrendingEntry>,
    index: HashMap<String, usize>,
}

impl LanguageResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, replacing any existing entry with the same title.
    pub fn insert(&mut self, entry: TrendingEntry) {
        match self.index.get(&entry.title) {
            Some(&pos) => self.entries[pos] = entry,
            None => {
                self.index.insert(entry.title.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Merge `other` into `self`; entries from `other` win on title collision.
    pub fn merge(mut self, other: LanguageResult) -> Self {
        for entry in other.entries {
            self.insert(entry);
        }
        self
    }

    pub fn get(&self, title: &str) -> Option<&TrendingEntry> {
        self.index.get(title).map(|&pos| &self.entries[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrendingEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<TrendingEntry> for LanguageResult {
    fn from_iter<I: IntoIterator<Item = TrendingEntry>>(iter: I) -> Self {
        let mut result = LanguageResult::new();
        for entry in iter {
            result.insert(entry);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, description: Option<&str>) -> TrendingEntry {
        TrendingEntry {
            title: title.to_string(),
            url: format!("https://github.com/{title}"),
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut result = LanguageResult::new();
        result.insert(entry("a/one", Some("first")));
        result.insert(entry("b/two", None));
        result.insert(entry("a/one", Some("second")));

        assert_eq!(result.len(), 2);
        let titles: Vec<_> = result.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["a/one", "b/two"]);
        assert_eq!(
            result.get("a/one").unwrap().description.as_deref(),
            Some("second")
        );
    }

    #[test]
    fn test_merge_prefers_right_side() {
        let default_locale: LanguageResult =
            vec![entry("a/one", Some("english")), entry("b/two", Some("only here"))]
                .into_iter()
                .collect();
        let zh_locale: LanguageResult =
            vec![entry("a/one", Some("中文描述")), entry("c/three", None)]
                .into_iter()
                .collect();

        let merged = default_locale.merge(zh_locale);

        assert_eq!(merged.len(), 3);
        assert_eq!(
            merged.get("a/one").unwrap().description.as_deref(),
            Some("中文描述")
        );
        assert_eq!(
            merged.get("b/two").unwrap().description.as_deref(),
            Some("only here")
        );
        let titles: Vec<_> = merged.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["a/one", "b/two", "c/three"]);
    }

    #[test]
    fn test_merge_with_empty() {
        let left: LanguageResult = vec![entry("a/one", None)].into_iter().collect();
        let merged = left.merge(LanguageResult::new());
        assert_eq!(merged.len(), 1);
        assert!(LanguageResult::new().merge(LanguageResult::new()).is_empty());
    }
}
