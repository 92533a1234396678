use std::time::Duration;

use logylyzer_core::models::request::AnalyzeRequest;

use crate::error::AgentError;

/// Posts matched log lines to the analyzer.
#[derive(Debug, Clone)]
pub struct Forwarder {
    http: reqwest::Client,
    url: String,
}

impl Forwarder {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, AgentError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AgentError::Forward(format!("failed to build http client: {e}")))?;
        Ok(Self {
            http,
            url: format!("{}/api/analyze", endpoint.trim_end_matches('/')),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn send(&self, logs: &str, service_name: &str, source: &str) -> Result<(), AgentError> {
        let body = AnalyzeRequest {
            logs: Some(logs.to_string()),
            service_name: Some(service_name.to_string()),
            source: Some(source.to_string()),
            timestamp: None,
        };

        let resp = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AgentError::Forward(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(AgentError::Forward(format!(
                "analyzer returned {}",
                resp.status()
            )));
        }
        Ok(())
    }
}
