//! logylyzer-core
//!
//! Pure domain types and bucket file naming conventions.
//! No filesystem or network access. This is the shared vocabulary of the
//! analyzer, the record store and the collector agent.

pub mod bucket_keys;
pub mod error;
pub mod models;
