//! Paper data model matching the ADS search API schema.

use serde::{Deserialize, Serialize};

/// Placeholder ADS uses for an author without a recorded affiliation.
const AFFILIATION_PLACEHOLDER: &str = "-";

/// A record from a search result page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Unique ADS bibcode.
    pub bibcode: String,

    /// Title strings (ADS returns a list; the first is the display title).
    #[serde(default)]
    pub title: Vec<String>,

    /// Author names in "Last, First" form.
    #[serde(default, rename = "author")]
    pub authors: Vec<String>,

    /// Publication year.
    #[serde(default)]
    pub year: Option<String>,

    /// Publication venue.
    #[serde(default, rename = "pub")]
    pub publication: Option<String>,
}

impl SearchResult {
    /// Create a record with just a bibcode.
    #[must_use]
    pub fn new(bibcode: impl Into<String>) -> Self {
        Self { bibcode: bibcode.into(), ..Default::default() }
    }

    /// Get the display title, falling back to "Untitled" if not available.
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        self.title.first().map(String::as_str).filter(|t| !t.is_empty()).unwrap_or("Untitled")
    }

    /// Get the year, falling back to "n.d." if not available.
    #[must_use]
    pub fn year_or_default(&self) -> &str {
        self.year.as_deref().filter(|y| !y.is_empty()).unwrap_or("n.d.")
    }

    /// Get the publication venue or an empty string.
    #[must_use]
    pub fn publication_or_default(&self) -> &str {
        self.publication.as_deref().unwrap_or("")
    }

    /// Get the first author's name if available.
    #[must_use]
    pub fn first_author(&self) -> Option<&str> {
        self.authors.first().map(String::as_str)
    }
}

/// A record fetched with the extended detail field set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperDetail {
    /// The base record.
    #[serde(flatten)]
    pub record: SearchResult,

    /// Paper abstract.
    #[serde(default)]
    pub r#abstract: Option<String>,

    /// Number of citations this paper has received.
    #[serde(default)]
    pub citation_count: Option<u64>,

    /// DOIs, primary first.
    #[serde(default)]
    pub doi: Vec<String>,

    /// Affiliations, one per author, "-" where unknown.
    #[serde(default, rename = "aff")]
    pub affiliations: Vec<String>,
}

impl PaperDetail {
    /// The bibcode of this paper.
    #[must_use]
    pub fn bibcode(&self) -> &str {
        &self.record.bibcode
    }

    /// Get citation count or 0 if not available.
    #[must_use]
    pub fn citations(&self) -> u64 {
        self.citation_count.unwrap_or(0)
    }

    /// Get the primary DOI if available.
    #[must_use]
    pub fn primary_doi(&self) -> Option<&str> {
        self.doi.first().map(String::as_str)
    }

    /// Resolver link for the primary DOI.
    #[must_use]
    pub fn doi_url(&self) -> Option<String> {
        self.primary_doi().map(|doi| format!("https://doi.org/{doi}"))
    }

    /// Distinct affiliations in first-seen order, without placeholders.
    #[must_use]
    pub fn unique_affiliations(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for aff in &self.affiliations {
            let aff = aff.as_str();
            if aff.is_empty() || aff == AFFILIATION_PLACEHOLDER || seen.contains(&aff) {
                continue;
            }
            seen.push(aff);
        }
        seen
    }

    /// Abstract cut to `max_chars` characters, with "..." when truncated.
    #[must_use]
    pub fn abstract_preview(&self, max_chars: usize) -> String {
        let text = self
            .r#abstract
            .as_deref()
            .filter(|a| !a.is_empty())
            .unwrap_or("No abstract available.");

        match text.char_indices().nth(max_chars) {
            Some((cut, _)) => format!("{}...", &text[..cut]),
            None => text.to_string(),
        }
    }
}

impl AsRef<SearchResult> for PaperDetail {
    fn as_ref(&self) -> &SearchResult {
        &self.record
    }
}

impl AsRef<Self> for SearchResult {
    fn as_ref(&self) -> &Self {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_result_deserialize_minimal() {
        let json = r#"{"bibcode": "2020ApJ...900..100S"}"#;
        let doc: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(doc.bibcode, "2020ApJ...900..100S");
        assert!(doc.title.is_empty());
        assert!(doc.authors.is_empty());
        assert_eq!(doc.title_or_default(), "Untitled");
        assert_eq!(doc.year_or_default(), "n.d.");
        assert_eq!(doc.publication_or_default(), "");
    }

    #[test]
    fn test_search_result_deserialize_full() {
        let json = r#"{
            "bibcode": "2020ApJ...900..100S",
            "title": ["Dark Matter Halos"],
            "author": ["Smith, J.", "Doe, A."],
            "year": "2020",
            "pub": "The Astrophysical Journal"
        }"#;

        let doc: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(doc.title_or_default(), "Dark Matter Halos");
        assert_eq!(doc.first_author(), Some("Smith, J."));
        assert_eq!(doc.year_or_default(), "2020");
        assert_eq!(doc.publication_or_default(), "The Astrophysical Journal");
    }

    #[test]
    fn test_detail_deserialize_flattens_record() {
        let json = r#"{
            "bibcode": "2019MNRAS.480.1X",
            "title": ["Galaxy Survey"],
            "author": ["Doe, A."],
            "year": "2019",
            "abstract": "We survey galaxies.",
            "citation_count": 12,
            "doi": ["10.1093/mnras/sty1", "10.48550/arXiv.1"],
            "aff": ["MIT", "-", "MIT", "", "Caltech"]
        }"#;

        let detail: PaperDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.bibcode(), "2019MNRAS.480.1X");
        assert_eq!(detail.citations(), 12);
        assert_eq!(detail.primary_doi(), Some("10.1093/mnras/sty1"));
        assert_eq!(detail.doi_url().as_deref(), Some("https://doi.org/10.1093/mnras/sty1"));
        assert_eq!(detail.unique_affiliations(), vec!["MIT", "Caltech"]);
    }

    #[test]
    fn test_detail_defaults_when_fields_absent() {
        let detail: PaperDetail = serde_json::from_str(r#"{"bibcode": "X"}"#).unwrap();
        assert_eq!(detail.citations(), 0);
        assert!(detail.primary_doi().is_none());
        assert!(detail.unique_affiliations().is_empty());
        assert_eq!(detail.abstract_preview(500), "No abstract available.");
    }

    #[test]
    fn test_abstract_preview_truncates_on_char_boundary() {
        let detail = PaperDetail {
            r#abstract: Some("αβγδε".to_string()),
            ..Default::default()
        };
        assert_eq!(detail.abstract_preview(3), "αβγ...");
        assert_eq!(detail.abstract_preview(5), "αβγδε");
        assert_eq!(detail.abstract_preview(10), "αβγδε");
    }
}
