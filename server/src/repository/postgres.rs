use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};

use super::{generate_id, StorageError, TodoRepository};
use crate::todo::Todo;

const COLUMNS: &str = "id, title, completed, order_number";

/// One row of the `todos` table.
#[derive(Debug, FromRow)]
struct TodoRow {
    id: String,
    title: String,
    completed: bool,
    order_number: Option<i32>,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo {
            id: Some(row.id),
            title: row.title,
            completed: row.completed,
            order: row.order_number,
        }
    }
}

/// `TodoRepository` backed by a PostgreSQL connection pool.
#[derive(Clone, Debug)]
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url` and bring the schema up to date.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        let repository = Self::new(pool);
        repository.migrate().await?;
        Ok(repository)
    }

    pub async fn migrate(&self) -> Result<(), StorageError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::debug!("database migrations applied");
        Ok(())
    }
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    async fn find_all(&self) -> Result<Vec<Todo>, StorageError> {
        let rows: Vec<TodoRow> = sqlx::query_as(&format!("SELECT {COLUMNS} FROM todos"))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Todo::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Todo>, StorageError> {
        let row: Option<TodoRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM todos WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Todo::from))
    }

    async fn save(&self, todo: Todo) -> Result<Todo, StorageError> {
        let id = todo.id.unwrap_or_else(generate_id);
        let row: TodoRow = sqlx::query_as(&format!(
            "INSERT INTO todos ({COLUMNS}) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (id) DO UPDATE SET \
             title = EXCLUDED.title, \
             completed = EXCLUDED.completed, \
             order_number = EXCLUDED.order_number \
             RETURNING {COLUMNS}"
        ))
        .bind(&id)
        .bind(&todo.title)
        .bind(todo.completed)
        .bind(todo.order)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM todos").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_pending(&self) -> Result<Vec<Todo>, StorageError> {
        let rows: Vec<TodoRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM todos WHERE completed = false"))
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Todo::from).collect())
    }
}
