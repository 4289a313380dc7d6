use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{generate_id, StorageError, TodoRepository};
use crate::todo::Todo;

/// Process-local storage keyed by id. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct InMemoryTodoRepository {
    todos: Arc<RwLock<HashMap<String, Todo>>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn find_all(&self) -> Result<Vec<Todo>, StorageError> {
        Ok(self.todos.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Todo>, StorageError> {
        Ok(self.todos.read().await.get(id).cloned())
    }

    async fn save(&self, mut todo: Todo) -> Result<Todo, StorageError> {
        let id = todo.id.get_or_insert_with(generate_id).clone();
        self.todos.write().await.insert(id, todo.clone());
        Ok(todo)
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StorageError> {
        self.todos.write().await.remove(id);
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), StorageError> {
        self.todos.write().await.clear();
        Ok(())
    }

    async fn find_pending(&self) -> Result<Vec<Todo>, StorageError> {
        let todos = self.todos.read().await;
        Ok(todos.values().filter(|todo| !todo.completed).cloned().collect())
    }
}
