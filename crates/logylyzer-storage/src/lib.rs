//! logylyzer-storage
//!
//! Append-only analysis history on the local filesystem. One JSON array file
//! per (service, UTC day) bucket, plus a background writer so request paths
//! never wait on disk.

pub mod error;
pub mod json_file;
pub mod store;
pub mod writer;
