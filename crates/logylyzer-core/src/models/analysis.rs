use serde::{Deserialize, Serialize};

/// Marker placed in `patterns_detected` when the model reply could not be
/// parsed and the raw text was kept instead.
pub const RAW_RESPONSE_PATTERN: &str = "Raw AI response";

/// Root cause used for degraded results built from an unparseable reply.
pub const FALLBACK_ROOT_CAUSE: &str = "Analysis completed";

/// The structured verdict produced for one batch of log text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub root_cause: String,
    pub severity: Severity,
    pub suggested_fix: String,
    pub patterns_detected: Vec<String>,
}

impl AnalysisResult {
    /// Degraded result that keeps the raw model reply as the suggested fix.
    pub fn fallback(raw_reply: impl Into<String>) -> Self {
        Self {
            root_cause: FALLBACK_ROOT_CAUSE.to_string(),
            severity: Severity::Medium,
            suggested_fix: raw_reply.into(),
            patterns_detected: vec![RAW_RESPONSE_PATTERN.to_string()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
