//! Saved bibliography entries.

use serde::{Deserialize, Serialize};

use super::SearchResult;
use crate::formatters::format_summary;

/// A paper saved to the user's bibliography.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BibliographyEntry {
    /// Unique ADS bibcode.
    pub bibcode: String,

    /// Display title.
    #[serde(default)]
    pub title: String,

    /// Display author string.
    #[serde(default)]
    pub authors: String,

    /// Display year.
    #[serde(default)]
    pub year: String,

    /// When the entry was added, in milliseconds since the Unix epoch.
    #[serde(default)]
    pub added_at: i64,
}

impl BibliographyEntry {
    /// Build an entry from a record's display summary.
    #[must_use]
    pub fn from_result(doc: &SearchResult, added_at: i64) -> Self {
        let summary = format_summary(doc);
        Self {
            bibcode: doc.bibcode.clone(),
            title: summary.title,
            authors: summary.authors,
            year: summary.year,
            added_at,
        }
    }

    /// Build an entry stamped with the current wall-clock time.
    #[must_use]
    pub fn now(doc: &SearchResult) -> Self {
        Self::from_result(doc, chrono::Utc::now().timestamp_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_from_result_uses_summary() {
        let doc = SearchResult {
            bibcode: "2021A&A...1..1S".to_string(),
            title: vec!["Stellar Winds".to_string()],
            authors: vec!["Smith, J.".into(), "Doe, A.".into(), "Roe, B.".into()],
            year: Some("2021".to_string()),
            publication: None,
        };

        let entry = BibliographyEntry::from_result(&doc, 1_700_000_000_000);
        assert_eq!(entry.bibcode, "2021A&A...1..1S");
        assert_eq!(entry.title, "Stellar Winds");
        assert_eq!(entry.authors, "Smith, J. +2 more");
        assert_eq!(entry.year, "2021");
        assert_eq!(entry.added_at, 1_700_000_000_000);
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let entry = BibliographyEntry::from_result(&SearchResult::new("X"), 5);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["addedAt"], 5);
        assert_eq!(json["title"], "Untitled");
        assert_eq!(json["authors"], "Unknown");
        assert_eq!(json["year"], "n.d.");
    }
}
