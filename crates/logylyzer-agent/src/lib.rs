//! logylyzer-agent
//!
//! Host-side collector. Follows log files and service output, picks out
//! error-looking lines, and forwards them to the analyzer's
//! `POST /api/analyze` endpoint.

pub mod config;
pub mod discovery;
pub mod error;
pub mod filter;
pub mod follow;
pub mod forward;
pub mod paths;
pub mod runner;
