use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};

use logylyzer_core::bucket_keys;
use logylyzer_core::models::record::AnalysisRecord;
use logylyzer_storage::error::StorageError;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub success: bool,
    pub service_name: String,
    pub date: String,
    pub entries: Vec<AnalysisRecord>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicesResponse {
    pub success: bool,
    pub services: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatesResponse {
    pub success: bool,
    pub service_name: String,
    pub dates: Vec<String>,
    pub count: usize,
}

/// One day of history for a service. `date` defaults to today (UTC).
pub async fn service_history(
    State(state): State<AppState>,
    Path(service_name): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let date = match query.date.as_deref().filter(|d| !d.is_empty()) {
        Some(d) => bucket_keys::parse_date(d).map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => bucket_keys::today(),
    };

    let entries = match state.store.read_day(&service_name, date).await {
        Ok(entries) => entries,
        Err(StorageError::NotFound { .. }) => {
            return Err(ApiError::NotFound {
                message: format!("No analysis history found for {service_name}"),
                service_name: Some(service_name),
            });
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Json(HistoryResponse {
        success: true,
        count: entries.len(),
        service_name,
        date: bucket_keys::format_date(date),
        entries,
    }))
}

/// Every service that has recorded history. Never fails.
pub async fn list_services(State(state): State<AppState>) -> Json<ServicesResponse> {
    let services: Vec<String> = state.store.list_services().await.into_iter().collect();
    Json(ServicesResponse {
        success: true,
        count: services.len(),
        services,
    })
}

/// Days with recorded history for one service, oldest first.
pub async fn service_dates(
    State(state): State<AppState>,
    Path(service_name): Path<String>,
) -> Result<Json<DatesResponse>, ApiError> {
    let dates: Vec<String> = state
        .store
        .list_dates(&service_name)
        .await?
        .into_iter()
        .map(bucket_keys::format_date)
        .collect();

    Ok(Json(DatesResponse {
        success: true,
        count: dates.len(),
        service_name,
        dates,
    }))
}
