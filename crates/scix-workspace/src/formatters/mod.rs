//! Output formatters: inline citations, Markdown and JSON.

mod citation;
mod json;
mod markdown;

pub use citation::{CitationSummary, format_inline, format_summary, last_name};
pub use self::json::*;
pub use markdown::*;
