use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::AgentError;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/logylyzer/config.yaml";

/// Lines matching any of these (case-insensitive) are forwarded.
pub const DEFAULT_ERROR_PATTERNS: [&str; 6] =
    ["error", "fatal", "exception", "failed", "timeout", "refused"];

#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    pub analyzer: AnalyzerConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
    #[serde(default)]
    pub services: ServicesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerConfig {
    /// Base URL of the analyzer, e.g. `http://localhost:2576`.
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryConfig {
    /// Re-run discovery every `scan_interval` when set.
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_scan_interval")]
    pub scan_interval: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonitoringConfig {
    #[serde(default)]
    pub log_paths: Vec<String>,
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
    /// Overrides [`DEFAULT_ERROR_PATTERNS`] when non-empty.
    #[serde(default)]
    pub error_patterns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServicesConfig {
    #[serde(default = "default_true")]
    pub auto_detect: bool,
    #[serde(default)]
    pub docker: bool,
    #[serde(default)]
    pub systemd: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            scan_interval: default_scan_interval(),
        }
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            auto_detect: true,
            docker: false,
            systemd: false,
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_scan_interval() -> String {
    "60s".to_string()
}

fn default_true() -> bool {
    true
}

impl AgentConfig {
    pub fn load(path: &Path) -> Result<Self, AgentError> {
        let contents = std::fs::read_to_string(path).map_err(|source| AgentError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, AgentError> {
        let config: AgentConfig = serde_yaml::from_str(contents)?;
        if config.analyzer.endpoint.trim().is_empty() {
            return Err(AgentError::ConfigValue {
                field: "analyzer.endpoint",
                message: "must not be empty".to_string(),
            });
        }
        // Fail at startup rather than on the first rescan.
        config.discovery.interval()?;
        Ok(config)
    }

    pub fn error_patterns(&self) -> Vec<String> {
        if self.monitoring.error_patterns.is_empty() {
            DEFAULT_ERROR_PATTERNS.iter().map(|p| p.to_string()).collect()
        } else {
            self.monitoring.error_patterns.clone()
        }
    }
}

impl DiscoveryConfig {
    pub fn interval(&self) -> Result<Duration, AgentError> {
        parse_interval(&self.scan_interval).ok_or_else(|| AgentError::ConfigValue {
            field: "discovery.scan_interval",
            message: format!("{:?} is not a positive duration like 30s, 5m or 1h", self.scan_interval),
        })
    }
}

/// Parse `500ms`, `30s`, `5m`, `1h`, or a bare number of seconds.
pub fn parse_interval(s: &str) -> Option<Duration> {
    let s = s.trim();
    let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (digits, unit) = s.split_at(split);
    let n: u64 = digits.parse().ok()?;

    let duration = match unit.trim() {
        "ms" => Duration::from_millis(n),
        "" | "s" => Duration::from_secs(n),
        "m" => Duration::from_secs(n.checked_mul(60)?),
        "h" => Duration::from_secs(n.checked_mul(3600)?),
        _ => return None,
    };
    (!duration.is_zero()).then_some(duration)
}
