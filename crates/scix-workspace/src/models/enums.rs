//! Enumeration types for citation and output selection.

use serde::{Deserialize, Serialize};

/// Output format for rendered results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Human-readable Markdown format.
    #[default]
    Markdown,
    /// Machine-readable JSON format.
    Json,
}

impl ResponseFormat {
    /// Check if this is JSON format.
    #[must_use]
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Citation style selected for inserting a single result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitationFormat {
    /// Author/year parenthetical, rendered locally.
    #[default]
    Inline,
    /// Full reference, rendered by the export service.
    Full,
    /// BibTeX record, rendered by the export service.
    Bibtex,
}

impl CitationFormat {
    /// Export route that renders this format, or `None` for local rendering.
    #[must_use]
    pub const fn export_route(self) -> Option<&'static str> {
        match self {
            Self::Inline => None,
            Self::Full => Some("apsj"),
            Self::Bibtex => Some("bibtex"),
        }
    }

    /// Check if this format needs the export service (and hence a token).
    #[must_use]
    pub const fn is_remote(self) -> bool {
        self.export_route().is_some()
    }
}
