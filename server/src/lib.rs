//! REST backend for the Todo resource.
//!
//! # Overview
//! `handlers` maps HTTP onto a `TodoRepository`; `repository` holds the
//! Postgres and in-memory storage implementations; `todo` is the entity and
//! its request payload; `error` shapes failures into responses.
//!
//! Each request is handled independently. The only shared state is the
//! repository behind an `Arc`, and with Postgres that is just the pool.

pub mod config;
pub mod error;
pub mod handlers;
pub mod repository;
pub mod todo;

use std::{future::Future, path::Path, sync::Arc};

use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

pub use config::{AppConfig, ConfigError};
pub use error::ApiError;
pub use repository::{InMemoryTodoRepository, PgTodoRepository, StorageError, TodoRepository};
pub use todo::{Todo, TodoPayload, ValidationError};

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn TodoRepository>,
}

impl AppState {
    pub fn new(repository: impl TodoRepository + 'static) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(InMemoryTodoRepository::new())
    }
}

/// The todo API with request tracing and permissive CORS.
pub fn app(state: AppState) -> Router {
    handlers::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Like [`app`], but serving files from `static_dir` for any path the API
/// does not claim.
pub fn app_with_frontend(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    handlers::router(state)
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

/// Serve `router` until `signal` resolves, then drain in-flight requests.
pub async fn run_with_shutdown<F>(
    listener: TcpListener,
    router: Router,
    signal: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router)
        .with_graceful_shutdown(signal)
        .await
}
