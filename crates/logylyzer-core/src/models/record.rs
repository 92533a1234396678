use serde::{Deserialize, Serialize};

use super::analysis::AnalysisResult;

/// Service name recorded when the caller does not supply one.
pub const DEFAULT_SERVICE_NAME: &str = "unknown-service";

/// One persisted analysis outcome, stored in its (service, day) bucket.
///
/// Field names on disk are camelCase and must stay stable: existing bucket
/// files are read back with these exact names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub timestamp: jiff::Timestamp,
    pub service_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub analysis: AnalysisResult,
    pub original_logs: String,
}

impl AnalysisRecord {
    /// Build a record stamped with the current instant.
    pub fn new(
        service_name: impl Into<String>,
        source: Option<String>,
        analysis: AnalysisResult,
        original_logs: impl Into<String>,
    ) -> Self {
        Self::at(
            jiff::Timestamp::now(),
            service_name,
            source,
            analysis,
            original_logs,
        )
    }

    /// Build a record with an explicit timestamp.
    pub fn at(
        timestamp: jiff::Timestamp,
        service_name: impl Into<String>,
        source: Option<String>,
        analysis: AnalysisResult,
        original_logs: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            service_name: service_name.into(),
            source,
            analysis,
            original_logs: original_logs.into(),
        }
    }

    /// The UTC calendar day this record is bucketed under.
    pub fn bucket_date(&self) -> jiff::civil::Date {
        crate::bucket_keys::utc_date(self.timestamp)
    }
}

/// Resolve an optional caller-supplied service name to the stored value.
///
/// Blank names fall back to [`DEFAULT_SERVICE_NAME`] so a record never
/// carries an empty service.
pub fn resolve_service_name(name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => DEFAULT_SERVICE_NAME.to_string(),
    }
}
