//! logylyzer-server
//!
//! HTTP front end: accepts raw logs for analysis, persists each outcome in
//! the background, and serves the per-service history.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod service;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

/// Assemble the full application router.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api/analyze", post(routes::analyze::analyze_logs))
        .route("/api/monitor/services", get(routes::monitor::list_services))
        .route(
            "/api/monitor/history/{service_name}",
            get(routes::monitor::service_history),
        )
        .route(
            "/api/monitor/history/{service_name}/dates",
            get(routes::monitor::service_dates),
        )
        .layer(
            ServiceBuilder::new()
                .layer(axum_mw::from_fn(middleware::audit::audit_log))
                .layer(cors),
        )
        .with_state(state)
}
