//! Markdown output formatting.

use crate::export::FormatGroup;
use crate::models::{BibliographyEntry, Page, PaperDetail, SearchResult};

use super::{format_inline, format_summary};

/// Characters of abstract shown in the detail view.
pub const ABSTRACT_PREVIEW_CHARS: usize = 500;

/// Affiliations listed before collapsing the rest into a count.
const MAX_AFFILIATIONS: usize = 5;

/// Format a page of results as Markdown.
///
/// `start` is the 1-based position of the first record, so later pages keep
/// numbering where the previous page stopped.
#[must_use]
pub fn format_page_markdown(page: &Page, start: usize) -> String {
    if page.docs.is_empty() {
        return "No results found.".to_string();
    }

    let mut output = String::new();
    if start <= 1 {
        output.push_str(&format!("# Results ({} found)\n\n", page.num_found));
    }

    for (i, doc) in page.docs.iter().enumerate() {
        output.push_str(&format_result_markdown(doc, start.max(1) + i));
        output.push_str("\n---\n\n");
    }

    if page.has_more() {
        output.push_str("*More results available.*\n");
    }

    output
}

/// Format a single search record as Markdown.
#[must_use]
pub fn format_result_markdown(doc: &SearchResult, index: usize) -> String {
    let summary = format_summary(doc);
    let mut output = format!("## {}. {}\n\n", index, summary.title);

    output.push_str(&format!("**Authors**: {}\n\n", summary.authors));

    let meta = [summary.year.as_str(), summary.publication.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" · ");
    output.push_str(&format!("{meta}\n\n"));

    output.push_str(&format!("**Cite**: `{}`\n\n", format_inline(doc)));
    output.push_str(&format!("**Bibcode**: `{}`\n", doc.bibcode));

    output
}

/// Format the expanded detail view of a paper as Markdown.
#[must_use]
pub fn format_detail_markdown(detail: &PaperDetail) -> String {
    let summary = format_summary(&detail.record);
    let mut output = format!("# {}\n\n", summary.title);

    output.push_str(&format!("**Authors**: {}\n\n", summary.authors));
    output.push_str(&format!("**Year**: {}", summary.year));
    if !summary.publication.is_empty() {
        output.push_str(&format!(" | **Publication**: {}", summary.publication));
    }
    output.push_str(&format!(" | **Citations**: {}\n\n", detail.citations()));

    if let (Some(doi), Some(url)) = (detail.primary_doi(), detail.doi_url()) {
        output.push_str(&format!("**DOI**: [{doi}]({url})\n\n"));
    }

    output.push_str("## Abstract\n\n");
    output.push_str(&detail.abstract_preview(ABSTRACT_PREVIEW_CHARS));
    output.push_str("\n\n");

    let affiliations = detail.unique_affiliations();
    if !affiliations.is_empty() {
        output.push_str(&format!("## Affiliations ({})\n\n", affiliations.len()));
        for aff in affiliations.iter().take(MAX_AFFILIATIONS) {
            output.push_str(&format!("- {aff}\n"));
        }
        if affiliations.len() > MAX_AFFILIATIONS {
            output.push_str(&format!("- +{} more\n", affiliations.len() - MAX_AFFILIATIONS));
        }
        output.push('\n');
    }

    output.push_str(&format!("**Cite**: `{}`\n", format_inline(&detail.record)));

    output
}

/// Format bibliography entries (already in display order) as Markdown.
#[must_use]
pub fn format_bibliography_markdown(entries: &[BibliographyEntry]) -> String {
    if entries.is_empty() {
        return "Bibliography is empty.".to_string();
    }

    let mut output = format!("# Bibliography ({} papers)\n\n", entries.len());
    for entry in entries {
        output.push_str(&format!(
            "- **{}**  \n  {} ({}) `{}`\n",
            entry.title, entry.authors, entry.year, entry.bibcode
        ));
    }

    output
}

/// Format grouped export formats as Markdown, marking the default.
#[must_use]
pub fn format_groups_markdown(groups: &[FormatGroup], default_route: &str) -> String {
    if groups.is_empty() {
        return "No export formats available.".to_string();
    }

    let mut output = String::from("# Export formats\n\n");
    for group in groups {
        output.push_str(&format!("## {}\n\n", group.label));
        for option in &group.options {
            let marker = if option.value == default_route { " (default)" } else { "" };
            output.push_str(&format!("- `{}`: {}{marker}\n", option.value, option.name));
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Cursor;

    fn sample_doc(bibcode: &str) -> SearchResult {
        SearchResult {
            bibcode: bibcode.to_string(),
            title: vec!["Cosmic Rays".to_string()],
            authors: vec!["Smith, J.".to_string()],
            year: Some("2020".to_string()),
            publication: Some("ApJ".to_string()),
        }
    }

    #[test]
    fn test_page_markdown_lists_results() {
        let page = Page {
            docs: vec![sample_doc("A"), sample_doc("B")],
            next_cursor: Some(Cursor::new("next")),
            num_found: 42,
        };

        let md = format_page_markdown(&page, 1);
        assert!(md.contains("# Results (42 found)"));
        assert!(md.contains("## 1. Cosmic Rays"));
        assert!(md.contains("## 2. Cosmic Rays"));
        assert!(md.contains("`Smith (2020)`"));
        assert!(md.contains("2020 · ApJ"));
        assert!(md.contains("More results available"));
    }

    #[test]
    fn test_page_markdown_continues_numbering() {
        let page = Page { docs: vec![sample_doc("K")], next_cursor: None, num_found: 11 };
        let md = format_page_markdown(&page, 11);
        assert!(md.contains("## 11. Cosmic Rays"));
        assert!(!md.contains("# Results"));
        assert!(!md.contains("More results"));
    }

    #[test]
    fn test_empty_page() {
        assert_eq!(format_page_markdown(&Page::default(), 1), "No results found.");
    }

    #[test]
    fn test_detail_markdown_collapses_affiliations() {
        let detail = PaperDetail {
            record: sample_doc("A"),
            r#abstract: Some("Short abstract.".to_string()),
            citation_count: Some(7),
            doi: vec!["10.1/x".to_string()],
            affiliations: (0..7).map(|i| format!("Inst {i}")).chain(["-".to_string()]).collect(),
        };

        let md = format_detail_markdown(&detail);
        assert!(md.contains("**Citations**: 7"));
        assert!(md.contains("[10.1/x](https://doi.org/10.1/x)"));
        assert!(md.contains("## Affiliations (7)"));
        assert!(md.contains("- Inst 4\n"));
        assert!(!md.contains("- Inst 5\n"));
        assert!(md.contains("- +2 more"));
    }

    #[test]
    fn test_empty_bibliography() {
        assert_eq!(format_bibliography_markdown(&[]), "Bibliography is empty.");
    }
}
