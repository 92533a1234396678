use serde::{Deserialize, Serialize};

/// Body of `POST /api/analyze`.
///
/// `logs` is optional on the wire so a missing field reaches validation
/// instead of failing JSON extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    /// Origin tag, e.g. `nginx`, `docker`, `systemd`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Accepted for compatibility with older agents; the server stamps its own time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}
