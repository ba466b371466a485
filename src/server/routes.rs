use super::cors::cors_layer;
use super::handlers::{
    create_task, delete_task, fallback, health_check, list_tasks, search_tasks, show_task, statistics, toggle_task,
    update_task,
};
use super::state::AppState;
use axum::routing::{get, patch};
use axum::Router;
use tower_http::trace::TraceLayer;

/// The API router, mounted under `/api`.
///
/// CORS is the outermost layer so preflight requests never reach the routes.
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    let api = Router::new()
        .route("/tarefas", get(list_tasks).post(create_task))
        .route(
            "/tarefas/{id}",
            get(show_task).put(update_task).patch(update_task).delete(delete_task),
        )
        .route("/tarefas/{id}/toggle", patch(toggle_task))
        .route("/estatisticas", get(statistics))
        .route("/buscar/{term}", get(search_tasks))
        .route("/test", get(health_check))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
}
