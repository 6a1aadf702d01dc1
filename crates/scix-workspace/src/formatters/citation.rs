//! Inline citations and display summaries for search records.
//!
//! Everything here is pure string templating and never fails; missing data
//! degrades to placeholder text.

use serde::Serialize;

use crate::models::SearchResult;

/// Display fields for a result card or bibliography row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitationSummary {
    /// Author line ("Unknown", one name, two names, or first name "+N more").
    pub authors: String,
    /// Display title.
    pub title: String,
    /// Display year.
    pub year: String,
    /// Publication venue, possibly empty.
    pub publication: String,
}

/// Short parenthetical citation: "Smith (2020)", "Smith & Doe (2019)",
/// "Smith et al. (2021)", or "(year)" without authors.
#[must_use]
pub fn format_inline(doc: &SearchResult) -> String {
    let year = doc.year_or_default();

    match doc.authors.as_slice() {
        [] => format!("({year})"),
        [only] => format!("{} ({year})", last_name(only)),
        [first, second] => format!("{} & {} ({year})", last_name(first), last_name(second)),
        [first, ..] => format!("{} et al. ({year})", last_name(first)),
    }
}

/// Display summary of a record.
#[must_use]
pub fn format_summary(doc: &SearchResult) -> CitationSummary {
    let authors = match doc.authors.as_slice() {
        [] => "Unknown".to_string(),
        [only] => only.clone(),
        [first, second] => format!("{first}; {second}"),
        [first, rest @ ..] => format!("{first} +{} more", rest.len()),
    };

    CitationSummary {
        authors,
        title: doc.title_or_default().to_string(),
        year: doc.year_or_default().to_string(),
        publication: doc.publication_or_default().to_string(),
    }
}

/// Surname of an ADS author string.
///
/// ADS names are "Last, First Middle"; anything without a comma after the
/// first character falls back to its first word.
#[must_use]
pub fn last_name(author: &str) -> &str {
    match author.find(',') {
        Some(idx) if idx > 0 => &author[..idx],
        _ => author.split_whitespace().next().unwrap_or(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(authors: &[&str], year: Option<&str>) -> SearchResult {
        SearchResult {
            bibcode: "2020ApJ...1..1S".to_string(),
            title: vec!["A Title".to_string()],
            authors: authors.iter().map(ToString::to_string).collect(),
            year: year.map(String::from),
            publication: Some("ApJ".to_string()),
        }
    }

    #[test]
    fn test_inline_no_authors_no_year() {
        assert_eq!(format_inline(&doc(&[], None)), "(n.d.)");
    }

    #[test]
    fn test_inline_single_author() {
        assert_eq!(format_inline(&doc(&["Smith, J."], Some("2020"))), "Smith (2020)");
    }

    #[test]
    fn test_inline_two_authors() {
        assert_eq!(
            format_inline(&doc(&["Smith, J.", "Doe, A."], Some("2019"))),
            "Smith & Doe (2019)"
        );
    }

    #[test]
    fn test_inline_many_authors() {
        assert_eq!(
            format_inline(&doc(&["Smith, J.", "Doe, A.", "Roe, B."], Some("2021"))),
            "Smith et al. (2021)"
        );
    }

    #[test]
    fn test_inline_empty_year_is_undated() {
        assert_eq!(format_inline(&doc(&["Smith, J."], Some(""))), "Smith (n.d.)");
    }

    #[test]
    fn test_last_name_variants() {
        assert_eq!(last_name("van der Berg, Anna"), "van der Berg");
        assert_eq!(last_name("Planck Collaboration"), "Planck");
        assert_eq!(last_name(",Odd"), ",Odd");
        assert_eq!(last_name(""), "");
    }

    #[test]
    fn test_summary_author_lines() {
        assert_eq!(format_summary(&doc(&[], None)).authors, "Unknown");
        assert_eq!(format_summary(&doc(&["Smith, J."], None)).authors, "Smith, J.");
        assert_eq!(
            format_summary(&doc(&["Smith, J.", "Doe, A."], None)).authors,
            "Smith, J.; Doe, A."
        );
        assert_eq!(
            format_summary(&doc(&["Smith, J.", "Doe, A.", "Roe, B.", "Poe, C."], None)).authors,
            "Smith, J. +3 more"
        );
    }

    #[test]
    fn test_summary_defaults() {
        let summary = format_summary(&SearchResult::new("X"));
        assert_eq!(summary.title, "Untitled");
        assert_eq!(summary.year, "n.d.");
        assert_eq!(summary.publication, "");
    }
}
