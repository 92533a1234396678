use std::sync::Arc;

use logylyzer_storage::store::RecordStore;

use crate::service::AnalysisService;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub analysis: Arc<AnalysisService>,
    pub store: Arc<RecordStore>,
}
