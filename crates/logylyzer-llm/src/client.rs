use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use logylyzer_core::models::analysis::AnalysisResult;

use crate::error::InferenceError;
use crate::parse::parse_analysis;
use crate::prompt::build_analysis_prompt;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Anything that can turn raw log text into an `AnalysisResult`.
///
/// Implementations make exactly one upstream call per `infer` and do not
/// retry. A reply that cannot be parsed still yields a well-formed result;
/// only transport or upstream status failures are errors.
#[async_trait]
pub trait AnalysisClient: Send + Sync {
    async fn infer(&self, logs: &str) -> Result<AnalysisResult, InferenceError>;
}

/// Connection settings for a `generateContent`-style endpoint.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// e.g. `https://generativelanguage.googleapis.com`
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

/// `AnalysisClient` backed by the `v1beta/models/{model}:generateContent` API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

// ── Wire types ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────────────

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, InferenceError> {
        if config.base_url.trim().is_empty() {
            return Err(InferenceError::Config("base URL is empty".to_string()));
        }
        if config.model.trim().is_empty() {
            return Err(InferenceError::Config("model is empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| InferenceError::Config(format!("failed to build http client: {e}")))?;

        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Send one prompt and return the concatenated reply text.
    async fn generate(&self, prompt: &str) -> Result<String, InferenceError> {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let resp = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| InferenceError::Request(e.without_url().to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| InferenceError::ResponseParse(e.without_url().to_string()))?;

        extract_reply_text(payload)
    }
}

fn extract_reply_text(payload: GenerateContentResponse) -> Result<String, InferenceError> {
    let content = payload
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .ok_or_else(|| InferenceError::ResponseParse("no candidate in response".to_string()))?;

    let text = content
        .parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect::<Vec<_>>()
        .join("");

    if text.is_empty() {
        return Err(InferenceError::ResponseParse(
            "candidate has no text parts".to_string(),
        ));
    }
    Ok(text)
}

#[async_trait]
impl AnalysisClient for GeminiClient {
    async fn infer(&self, logs: &str) -> Result<AnalysisResult, InferenceError> {
        let analysis_id = Uuid::new_v4();
        info!(analysis_id = %analysis_id, model = %self.config.model, logs_len = logs.len(), "starting log analysis");

        let reply = self
            .generate(&build_analysis_prompt(logs))
            .await
            .inspect_err(|e| error!(analysis_id = %analysis_id, error = %e, "inference call failed"))?;

        let result = parse_analysis(&reply);
        info!(analysis_id = %analysis_id, severity = %result.severity, "log analysis complete");
        Ok(result)
    }
}
