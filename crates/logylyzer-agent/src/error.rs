use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("failed to read config at {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("invalid config value for {field}: {message}")]
    ConfigValue { field: &'static str, message: String },

    #[error("invalid pattern: {0}")]
    Pattern(String),

    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("forwarding failed: {0}")]
    Forward(String),
}
