#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use logylyzer_core::models::analysis::{AnalysisResult, Severity};
use logylyzer_llm::client::AnalysisClient;
use logylyzer_llm::error::InferenceError;
use logylyzer_server::build_router;
use logylyzer_server::service::AnalysisService;
use logylyzer_server::state::AppState;
use logylyzer_storage::store::RecordStore;
use logylyzer_storage::writer::RecordWriter;

/// Inference stand-in that returns a fixed outcome and counts calls.
pub struct ScriptedClient {
    reply: Result<AnalysisResult, u16>,
    calls: AtomicUsize,
}

impl ScriptedClient {
    pub fn answering(result: AnalysisResult) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(result),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(status),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnalysisClient for ScriptedClient {
    async fn infer(&self, _logs: &str) -> Result<AnalysisResult, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(result) => Ok(result.clone()),
            Err(status) => Err(InferenceError::Status {
                status: *status,
                body: "upstream unavailable".to_string(),
            }),
        }
    }
}

pub fn high_severity() -> AnalysisResult {
    AnalysisResult {
        root_cause: "database connection refused".to_string(),
        severity: Severity::High,
        suggested_fix: "check the database host and credentials".to_string(),
        patterns_detected: vec!["ECONNREFUSED".to_string()],
    }
}

pub struct TestApp {
    pub router: axum::Router,
    pub store: Arc<RecordStore>,
    pub service: Arc<AnalysisService>,
}

pub fn build_app(client: Arc<ScriptedClient>, root: &Path) -> TestApp {
    let store = Arc::new(RecordStore::new(root));
    let writer = RecordWriter::spawn(Arc::clone(&store));
    let service = Arc::new(AnalysisService::new(client, writer));
    let router = build_router(AppState {
        analysis: Arc::clone(&service),
        store: Arc::clone(&store),
    });
    TestApp {
        router,
        store,
        service,
    }
}

pub async fn send(router: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("request failed");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

pub async fn get(router: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build request");
    send(router, request).await
}

pub async fn post_json(router: &axum::Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("serialize body")))
        .expect("build request");
    send(router, request).await
}

/// Wait for the background writer to land `count` records in a bucket.
pub async fn wait_for_entries(
    store: &RecordStore,
    service: &str,
    date: jiff::civil::Date,
    count: usize,
) -> Vec<logylyzer_core::models::record::AnalysisRecord> {
    for _ in 0..100 {
        if let Ok(entries) = store.read_day(service, date).await
            && entries.len() >= count
        {
            return entries;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    panic!("bucket {service}/{date} never reached {count} entries");
}
