//! Data models for ADS API entities and workspace state.
//!
//! Optional API fields use `#[serde(default)]` so sparse records still parse.

mod bibliography;
mod enums;
mod export;
mod paper;
mod search;

pub use bibliography::BibliographyEntry;
pub use enums::{CitationFormat, ResponseFormat};
pub use export::ExportFormatInfo;
pub use paper::{PaperDetail, SearchResult};
pub use search::{Cursor, Page, SearchRequest, SearchResponse};
pub(crate) use search::SearchBody;
