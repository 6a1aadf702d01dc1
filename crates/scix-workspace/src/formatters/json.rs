//! JSON output formatting.

use serde_json::{Value, json};

use crate::models::{Page, PaperDetail, SearchResult};

use super::{format_inline, format_summary};

/// Create a compact record representation for JSON output.
#[must_use]
pub fn compact_result(doc: &SearchResult) -> Value {
    let summary = format_summary(doc);
    let mut obj = json!({
        "bibcode": doc.bibcode,
        "title": summary.title,
        "authors": doc.authors,
        "year": summary.year,
        "cite": format_inline(doc),
    });

    if !summary.publication.is_empty() {
        obj["pub"] = json!(summary.publication);
    }

    obj
}

/// Create a compact detail representation for JSON output.
#[must_use]
pub fn compact_detail(detail: &PaperDetail) -> Value {
    let mut obj = compact_result(&detail.record);
    obj["citations"] = json!(detail.citations());

    if let Some(abs) = &detail.r#abstract {
        obj["abstract"] = json!(abs);
    }

    if let Some(doi) = detail.primary_doi() {
        obj["doi"] = json!(doi);
    }

    let affiliations = detail.unique_affiliations();
    if !affiliations.is_empty() {
        obj["affiliations"] = json!(affiliations);
    }

    obj
}

/// JSON for one page of results.
#[must_use]
pub fn page_json(page: &Page) -> Value {
    json!({
        "numFound": page.num_found,
        "nextCursor": page.next_cursor,
        "docs": page.docs.iter().map(compact_result).collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Cursor;

    #[test]
    fn test_compact_result() {
        let doc = SearchResult {
            bibcode: "2020ApJ...1..1S".to_string(),
            title: vec!["Test Paper".to_string()],
            authors: vec!["Smith, J.".to_string(), "Doe, A.".to_string()],
            year: Some("2020".to_string()),
            publication: None,
        };

        let compact = compact_result(&doc);
        assert_eq!(compact["bibcode"], "2020ApJ...1..1S");
        assert_eq!(compact["title"], "Test Paper");
        assert_eq!(compact["cite"], "Smith & Doe (2020)");
        assert_eq!(compact["authors"], json!(["Smith, J.", "Doe, A."]));
        assert!(compact.get("pub").is_none());
    }

    #[test]
    fn test_compact_detail_filters_affiliations() {
        let detail = PaperDetail {
            record: SearchResult::new("X"),
            affiliations: vec!["-".into(), "ESO".into(), "ESO".into()],
            ..Default::default()
        };

        let compact = compact_detail(&detail);
        assert_eq!(compact["citations"], 0);
        assert_eq!(compact["affiliations"], json!(["ESO"]));
        assert!(compact.get("doi").is_none());
    }

    #[test]
    fn test_page_json_exhausted_cursor_is_null() {
        let page = Page { docs: vec![], next_cursor: None, num_found: 0 };
        assert_eq!(page_json(&page)["nextCursor"], Value::Null);

        let page = Page { docs: vec![], next_cursor: Some(Cursor::new("c")), num_found: 3 };
        assert_eq!(page_json(&page)["nextCursor"], "c");
    }
}
