pub mod charts;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod range;
pub mod resources;
pub mod server;
pub mod state;
pub mod styles;
pub mod tools;
pub mod workbook;

pub use config::{CliArgs, ServerConfig, TransportKind};
pub use error::{ExcelError, ExcelResult, to_rmcp_error};
pub use logging::init_logging;
pub use server::ExcelServer;

use anyhow::Result;
use axum::Router;
use rmcp::transport::streamable_http_server::{
    StreamableHttpService, session::local::LocalSessionManager,
};
use state::AppState;
use std::sync::Arc;
use tokio::net::TcpListener;

const HTTP_SERVICE_PATH: &str = "/mcp";

pub async fn run_server(config: ServerConfig) -> Result<()> {
    let config = Arc::new(config);
    config.ensure_workspace_root()?;

    let state = Arc::new(AppState::new(config.clone()));

    tracing::info!(
        transport = %config.transport,
        workspace = %config.workspace_root.display(),
        "starting Excel MCP server",
    );

    match config.transport {
        TransportKind::Stdio => {
            let server = ExcelServer::from_state(state);
            server.run_stdio().await
        }
        TransportKind::Http => run_stream_http_transport(config, state).await,
    }
}

async fn health_handler() -> (axum::http::StatusCode, &'static str) {
    (axum::http::StatusCode::OK, "ok")
}

async fn run_stream_http_transport(config: Arc<ServerConfig>, state: Arc<AppState>) -> Result<()> {
    let bind_addr = config.http_bind_address;
    let service_state = state.clone();
    let service = StreamableHttpService::new(
        move || Ok(ExcelServer::from_state(service_state.clone())),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    let router = Router::new()
        .nest_service(HTTP_SERVICE_PATH, service)
        .route("/health", axum::routing::get(health_handler));

    let listener = TcpListener::bind(bind_addr).await?;
    let actual_addr = listener.local_addr()?;
    tracing::info!(transport = "http", bind = %actual_addr, path = HTTP_SERVICE_PATH, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(error) = tokio::signal::ctrl_c().await {
                tracing::error!(?error, "failed to listen for shutdown signal");
            }
            tracing::info!("shutdown signal received");
        })
        .await?;

    Ok(())
}
