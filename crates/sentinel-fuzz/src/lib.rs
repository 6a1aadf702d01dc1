//! Fuzzing library for scix-workspace.
//!
//! This crate provides fuzzing targets for the JSON the workspace reads:
//! ADS search records and the persisted bibliography.
//!
//! # Usage
//!
//! ```bash
//! cd crates/sentinel-fuzz
//! cargo +nightly fuzz run fuzz_record_parse -- -max_total_time=60
//! ```

pub use scix_workspace::models;
