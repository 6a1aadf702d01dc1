//! Stateful search session: cursor pagination and the paper-detail cache.

mod detail;
mod pagination;

pub use detail::DetailCache;
pub use pagination::{DetailTicket, PageRequest, PaginationController, SearchSession, continuation};
