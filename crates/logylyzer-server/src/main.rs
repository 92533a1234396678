use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use logylyzer_llm::client::GeminiClient;
use logylyzer_server::build_router;
use logylyzer_server::config::{LogFormat, ServerConfig};
use logylyzer_server::service::AnalysisService;
use logylyzer_server::state::AppState;
use logylyzer_storage::store::RecordStore;
use logylyzer_storage::writer::RecordWriter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    init_tracing(LogFormat::from_env());

    let config = ServerConfig::from_env()?;
    let client = GeminiClient::new(config.llm.clone())?;

    let store = Arc::new(RecordStore::new(&config.data_dir));
    let (writer, writer_task) = RecordWriter::start(Arc::clone(&store));

    let state = AppState {
        analysis: Arc::new(AnalysisService::new(Arc::new(client), writer)),
        store,
    };
    let app = build_router(state);

    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        data_dir = %config.data_dir.display(),
        model = %config.llm.model,
        "logylyzer listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router owned the last writer handle; wait for queued records.
    writer_task.await?;
    tracing::info!("shutdown complete");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
