//! End-to-end handling of one analyze request.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use logylyzer_core::bucket_keys;
use logylyzer_core::models::analysis::AnalysisResult;
use logylyzer_core::models::record::{AnalysisRecord, resolve_service_name};
use logylyzer_llm::client::AnalysisClient;
use logylyzer_llm::error::InferenceError;
use logylyzer_storage::writer::{AppendHandle, RecordWriter};

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

/// What the caller gets back as soon as the analysis is done.
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub analysis: AnalysisResult,
    pub service_name: String,
    pub timestamp: jiff::Timestamp,
    /// Completion of the background append. Safe to drop.
    pub persisted: AppendHandle,
}

pub struct AnalysisService {
    client: Arc<dyn AnalysisClient>,
    writer: RecordWriter,
}

impl AnalysisService {
    pub fn new(client: Arc<dyn AnalysisClient>, writer: RecordWriter) -> Self {
        Self { client, writer }
    }

    /// Analyze `logs`, queue the resulting record for storage, and return
    /// without waiting for the write.
    ///
    /// Input is validated before the inference call. Inference failures are
    /// returned as-is; storage failures never affect the outcome.
    pub async fn analyze(
        &self,
        logs: Option<&str>,
        service_name: Option<&str>,
        source: Option<String>,
    ) -> Result<AnalysisOutcome, AnalyzeError> {
        let logs = match logs {
            Some(logs) if !logs.trim().is_empty() => logs,
            _ => return Err(AnalyzeError::Validation("No logs provided".to_string())),
        };

        let service_name = resolve_service_name(service_name);
        bucket_keys::validate_service_name(&service_name)
            .map_err(|e| AnalyzeError::Validation(e.to_string()))?;

        let analysis = self.client.infer(logs).await?;

        let record = AnalysisRecord::new(service_name.clone(), source, analysis.clone(), logs);
        let timestamp = record.timestamp;
        let persisted = self.writer.submit(record);

        info!(
            service_name = %service_name,
            severity = %analysis.severity,
            "analysis queued for export"
        );

        Ok(AnalysisOutcome {
            analysis,
            service_name,
            timestamp,
            persisted,
        })
    }
}
