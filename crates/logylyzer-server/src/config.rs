//! Process configuration from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use logylyzer_llm::client::{DEFAULT_TIMEOUT, GeminiConfig};

pub const DEFAULT_PORT: u16 = 2576;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_DATA_DIR: &str = "./analysis-logs";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn from_env() -> Self {
        Self::parse(std::env::var("LOGYLYZER_LOG_FORMAT").ok().as_deref())
    }

    fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Storage root for bucket files.
    pub data_dir: PathBuf,
    pub llm: GeminiConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from any variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let port = match get("PORT") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: v,
            })?,
            None => DEFAULT_PORT,
        };

        let timeout = match get("LLM_TIMEOUT_SECS") {
            Some(v) => v
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::Invalid {
                    name: "LLM_TIMEOUT_SECS",
                    value: v,
                })?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            host: get("LOGYLYZER_BIND").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            data_dir: get("LOGYLYZER_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            llm: GeminiConfig {
                base_url: require("LLM_API_URL")?,
                api_key: require("LLM_API_KEY")?,
                model: require("LLM_MODEL")?,
                timeout,
            },
        })
    }
}
