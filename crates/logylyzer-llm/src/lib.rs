//! logylyzer-llm
//!
//! Root-cause analysis through an external text-generation endpoint and
//! structured parsing of its reply.

pub mod client;
pub mod error;
pub mod parse;
pub mod prompt;
