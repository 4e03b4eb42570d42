pub mod error;
pub mod handlers;
mod middleware;

use crate::todos::TodoStore;
use axum::routing::{get, patch, post};
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<TodoStore>,
}

impl AppState {
    pub fn new(store: TodoStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// API routes only. Unknown paths are plain 404s.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route(
            "/api/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route("/api/summary", get(handlers::todos_summary))
        .route(
            "/api/todos/{index}",
            patch(handlers::set_todo_completed)
                .put(handlers::edit_todo)
                .delete(handlers::delete_todo),
        )
        .route("/api/todos/{index}/restore", patch(handlers::restore_todo))
        .route("/api/logs", post(handlers::frontend_log))
        .layer(axum::middleware::from_fn(
            middleware::request_tracing_middleware,
        ))
        .with_state(state)
}

/// API routes plus the browser UI served from `static_dir`.
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    api_router(state).fallback_service(ServeDir::new(static_dir))
}
