//! Export format catalogue and citation rendering.

use serde::Serialize;

use crate::backend::ExportGateway;
use crate::error::WorkspaceResult;
use crate::formatters::format_inline;
use crate::models::{CitationFormat, ExportFormatInfo, SearchResult};

/// Export route selected when the user has not picked one.
pub const DEFAULT_EXPORT_FORMAT: &str = "apsj";

/// Structural formats that are not useful as pasted citations.
const EXCLUDED_TYPES: &[&str] = &["XML", "CSL", "custom"];

/// Preferred group order; other types follow in manifest order.
const TYPE_ORDER: &[&str] = &["HTML", "tagged", "LaTeX", "other"];

/// One selectable export format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatOption {
    /// Route passed to the export endpoint (e.g. "apsj").
    pub value: String,
    /// Display name.
    pub name: String,
}

/// Export formats of one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatGroup {
    /// Display label for the group.
    pub label: String,
    /// Formats in manifest order.
    pub options: Vec<FormatOption>,
}

/// Filter the manifest to citation-like formats and group them by type.
#[must_use]
pub fn group_formats(manifest: &[ExportFormatInfo]) -> Vec<FormatGroup> {
    let mut by_type: Vec<(&str, Vec<&ExportFormatInfo>)> = Vec::new();
    for format in manifest.iter().filter(|f| !EXCLUDED_TYPES.contains(&f.kind.as_str())) {
        match by_type.iter_mut().find(|(kind, _)| *kind == format.kind) {
            Some((_, formats)) => formats.push(format),
            None => by_type.push((format.kind.as_str(), vec![format])),
        }
    }

    // Stable sort: preferred types first, the rest keep first-seen order.
    by_type.sort_by_key(|(kind, _)| {
        TYPE_ORDER.iter().position(|t| t == kind).unwrap_or(TYPE_ORDER.len())
    });

    by_type
        .into_iter()
        .map(|(kind, formats)| FormatGroup {
            label: group_label(kind).to_string(),
            options: formats
                .into_iter()
                .map(|f| FormatOption { value: f.route_name().to_string(), name: f.name.clone() })
                .collect(),
        })
        .collect()
}

fn group_label(kind: &str) -> &str {
    match kind {
        "HTML" => "Citations",
        "tagged" => "Tagged",
        other => other,
    }
}

/// Groups offered when the manifest cannot be fetched.
#[must_use]
pub fn fallback_groups() -> Vec<FormatGroup> {
    vec![
        FormatGroup {
            label: "Citations".to_string(),
            options: vec![FormatOption {
                value: DEFAULT_EXPORT_FORMAT.to_string(),
                name: "APS Journals".to_string(),
            }],
        },
        FormatGroup {
            label: "Tagged".to_string(),
            options: vec![FormatOption { value: "bibtex".to_string(), name: "BibTeX".to_string() }],
        },
    ]
}

/// The preselected route: `apsj` if offered, else the first option.
#[must_use]
pub fn default_format(groups: &[FormatGroup]) -> &str {
    let mut options = groups.iter().flat_map(|g| g.options.iter());
    if options.clone().any(|o| o.value == DEFAULT_EXPORT_FORMAT) {
        return DEFAULT_EXPORT_FORMAT;
    }
    options.next().map_or(DEFAULT_EXPORT_FORMAT, |o| o.value.as_str())
}

/// Render the citation for one record in the selected format.
///
/// Inline citations are built locally; other formats go to the export service.
pub async fn citation_text(
    doc: &SearchResult,
    format: CitationFormat,
    gateway: &dyn ExportGateway,
) -> WorkspaceResult<String> {
    match format.export_route() {
        None => Ok(format_inline(doc)),
        Some(route) => Ok(gateway.export(std::slice::from_ref(&doc.bibcode), route).await?),
    }
}
