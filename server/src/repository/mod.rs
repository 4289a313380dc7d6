//! Storage access for todos.
//!
//! # Design
//! `TodoRepository` is the seam between the HTTP layer and storage. The
//! controller only ever holds an `Arc<dyn TodoRepository>`, so the Postgres
//! implementation and the in-memory one are interchangeable. Neither
//! implementation retries or translates failures; a `StorageError` travels
//! to the caller unchanged.

mod memory;
mod postgres;

use async_trait::async_trait;

use crate::todo::Todo;

pub use memory::InMemoryTodoRepository;
pub use postgres::PgTodoRepository;

/// Failures raised by the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

#[async_trait]
pub trait TodoRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Todo>, StorageError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Todo>, StorageError>;

    /// Insert `todo` if it has no id yet (one is generated), otherwise
    /// insert-or-update the row with that id. Returns the stored value.
    async fn save(&self, todo: Todo) -> Result<Todo, StorageError>;

    /// Remove the row with `id`. Absent ids are not an error.
    async fn delete_by_id(&self, id: &str) -> Result<(), StorageError>;

    async fn delete_all(&self) -> Result<(), StorageError>;

    /// Every todo whose `completed` flag is false.
    async fn find_pending(&self) -> Result<Vec<Todo>, StorageError>;
}

/// A fresh server-side id.
pub(crate) fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
