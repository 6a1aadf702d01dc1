#![no_main]

use libfuzzer_sys::fuzz_target;
use scix_workspace::models::PaperDetail;

fuzz_target!(|data: &[u8]| {
    // Parsing may fail; rendering a parsed detail must not panic
    if let Ok(detail) = serde_json::from_slice::<PaperDetail>(data) {
        let _ = detail.abstract_preview(500);
        let _ = detail.unique_affiliations();
        let _ = scix_workspace::formatters::format_detail_markdown(&detail);
    }
});
