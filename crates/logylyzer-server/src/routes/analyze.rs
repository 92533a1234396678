use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Serialize;

use logylyzer_core::models::analysis::AnalysisResult;
use logylyzer_core::models::request::AnalyzeRequest;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis: AnalysisResult,
    pub service_name: String,
    pub timestamp: jiff::Timestamp,
}

/// Analyze raw logs. Responds once the analysis is available; the history
/// write continues in the background.
pub async fn analyze_logs(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(req) = body?;

    let outcome = state
        .analysis
        .analyze(
            req.logs.as_deref(),
            req.service_name.as_deref(),
            req.source,
        )
        .await?;

    Ok(Json(AnalyzeResponse {
        success: true,
        analysis: outcome.analysis,
        service_name: outcome.service_name,
        timestamp: outcome.timestamp,
    }))
}
