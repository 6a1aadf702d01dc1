//! SciX Workspace
//!
//! A research workspace over the SciX/ADS astrophysics literature API:
//! cursor-paginated search, cached paper details, citation rendering and a
//! personal bibliography persisted between sessions.
//!
//! # Features
//!
//! - **Cursor pagination**: stale responses are discarded, exhaustion is detected
//!   even when the API echoes the cursor back
//! - **Cached details**: one fetch per bibcode, concurrent requests share it
//! - **Citations**: inline citations locally, full and BibTeX through the export API
//! - **Bibliography**: saved papers survive restarts and export in one call
//!
//! # Example
//!
//! ```no_run
//! use scix_workspace::{Config, Workspace};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let workspace = Workspace::connect(Config::from_env()?, None)?;
//!     let mut session = workspace.session();
//!
//!     let page = workspace.search(&mut session, "dark matter").await?;
//!     if let Some(doc) = page.docs.first() {
//!         println!("{}", workspace.cite(doc).await?);
//!     }
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod formatters;
pub mod models;
pub mod session;
pub mod storage;
pub mod workspace;

pub use client::AdsClient;
pub use config::Config;
pub use error::{ClientError, WorkspaceError};
pub use workspace::Workspace;
