//! Export manifest entries.

use serde::{Deserialize, Serialize};

/// One export format advertised by the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportFormatInfo {
    /// Human-readable name (e.g. "APS Journals").
    pub name: String,

    /// Format family (e.g. "HTML", "tagged", "LaTeX", "XML").
    #[serde(rename = "type")]
    pub kind: String,

    /// Endpoint route, with a leading slash (e.g. "/apsj").
    pub route: String,

    /// File extension for saved output.
    #[serde(default)]
    pub extension: String,
}

impl ExportFormatInfo {
    /// Route without the leading slash, as passed to the export endpoint.
    #[must_use]
    pub fn route_name(&self) -> &str {
        self.route.strip_prefix('/').unwrap_or(&self.route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_entry_deserialize() {
        let json = r#"{"name": "BibTeX", "type": "tagged", "route": "/bibtex", "extension": "bib"}"#;
        let info: ExportFormatInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.kind, "tagged");
        assert_eq!(info.route_name(), "bibtex");
    }

    #[test]
    fn test_route_name_without_slash() {
        let info = ExportFormatInfo {
            name: "x".into(),
            kind: "other".into(),
            route: "custom".into(),
            extension: String::new(),
        };
        assert_eq!(info.route_name(), "custom");
    }
}
