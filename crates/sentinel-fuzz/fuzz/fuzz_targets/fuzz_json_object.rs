#![no_main]

use libfuzzer_sys::fuzz_target;
use scix_workspace::formatters::{format_inline, format_summary};
use scix_workspace::models::{BibliographyEntry, ExportFormatInfo, SearchResult};

fuzz_target!(|data: &[u8]| {
    // First try to parse as valid JSON
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(data) {
        // Then try each model type
        if let Ok(doc) = serde_json::from_value::<SearchResult>(json.clone()) {
            let _ = format_inline(&doc);
            let _ = format_summary(&doc);
        }
        let _ = serde_json::from_value::<BibliographyEntry>(json.clone());
        let _ = serde_json::from_value::<Vec<ExportFormatInfo>>(json);
    }
});
