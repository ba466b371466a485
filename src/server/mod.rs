//! HTTP API server.
//!
//! Maps the `/api` routes onto [`TaskService`] operations and wraps every
//! outcome in the JSON envelope. Validation failures answer 422 with a
//! per-field error map, unknown ids answer 404 and storage failures answer
//! 500 with an operation-specific message.

pub mod cors;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

use crate::db::db::Db;
use crate::libs::config::ServerConfig;
use crate::libs::messages::Message;
use crate::libs::service::TaskService;
use crate::msg_error_anyhow;
use anyhow::Result;
use state::AppState;
use tokio::net::TcpListener;

/// Opens the database, binds the listener and serves until Ctrl+C.
pub async fn run(config: ServerConfig) -> Result<()> {
    tracing::info!("{}", Message::ServerConfigLoaded(config.host.clone(), config.port, config.debug));

    let db = match &config.db_path {
        Some(path) => Db::open(path)?,
        None => Db::new()?,
    };
    let state = AppState::new(TaskService::new(db.conn), config.debug);
    let app = routes::create_router(state, &config.allowed_origins);

    let address = config.address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| msg_error_anyhow!(Message::ServerBindFailed(address.clone(), e.to_string())))?;

    tracing::info!("{}", Message::ServerStarting(address));
    tracing::info!("{}", Message::AvailableEndpoints);
    tracing::info!("  GET    /api/tarefas              - List tasks");
    tracing::info!("  POST   /api/tarefas              - Create task");
    tracing::info!("  GET    /api/tarefas/{{id}}         - Get task");
    tracing::info!("  PUT    /api/tarefas/{{id}}         - Update task");
    tracing::info!("  DELETE /api/tarefas/{{id}}         - Delete task");
    tracing::info!("  PATCH  /api/tarefas/{{id}}/toggle  - Toggle completed");
    tracing::info!("  GET    /api/estatisticas         - Statistics");
    tracing::info!("  GET    /api/buscar/{{term}}        - Search");
    tracing::info!("  GET    /api/test                 - Health check");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("{}", Message::ServerStopped);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("{}", Message::ShutdownSignalReceived);
}
