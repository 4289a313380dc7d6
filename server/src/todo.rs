//! The `Todo` entity and the request payload shared by create and patch.
//!
//! # Design
//! `Todo` is the stored shape. Its `id` is `None` only until the first
//! `TodoRepository::save`; every value that comes back out of storage
//! carries one. Clients never choose ids: `TodoPayload` accepts an `id`
//! field so that round-tripped bodies deserialize, but both
//! `into_new_todo` and `apply` discard it.

use serde::{Deserialize, Serialize};

/// A single todo item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: Option<String>,
    pub title: String,
    pub completed: bool,
    pub order: Option<i32>,
}

impl Todo {
    /// An unsaved todo. Storage assigns the id.
    pub fn new(title: impl Into<String>, completed: bool, order: Option<i32>) -> Self {
        Self {
            id: None,
            title: title.into(),
            completed,
            order,
        }
    }

    /// Overwrite every field that is present in `patch`. `id` is never touched.
    pub fn apply(&mut self, patch: TodoPayload) {
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(order) = patch.order {
            self.order = Some(order);
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
    }
}

/// Request body for `POST /todos` and `PATCH /todos/{id}`.
///
/// Absent and `null` fields both deserialize to `None`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TodoPayload {
    pub id: Option<String>,
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub order: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("title must not be blank")]
    BlankTitle,
}

impl TodoPayload {
    /// Validate a create request and turn it into an unsaved `Todo`.
    pub fn into_new_todo(self) -> Result<Todo, ValidationError> {
        let title = self
            .title
            .filter(|title| !title.trim().is_empty())
            .ok_or(ValidationError::BlankTitle)?;
        Ok(Todo::new(title, self.completed.unwrap_or(false), self.order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Todo {
        Todo {
            id: Some("abc".to_string()),
            title: "Walk dog".to_string(),
            completed: false,
            order: Some(3),
        }
    }

    #[test]
    fn todo_serializes_to_json() {
        let json = serde_json::to_value(stored()).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["title"], "Walk dog");
        assert_eq!(json["completed"], false);
        assert_eq!(json["order"], 3);
    }

    #[test]
    fn null_order_serializes_as_null() {
        let mut todo = stored();
        todo.order = None;
        let json = serde_json::to_value(&todo).unwrap();
        assert!(json["order"].is_null());
    }

    #[test]
    fn payload_all_fields_optional() {
        let input: TodoPayload = serde_json::from_str("{}").unwrap();
        assert!(input.id.is_none());
        assert!(input.title.is_none());
        assert!(input.completed.is_none());
        assert!(input.order.is_none());
    }

    #[test]
    fn payload_treats_null_as_absent() {
        let input: TodoPayload =
            serde_json::from_str(r#"{"title":null,"completed":null,"order":null}"#).unwrap();
        assert!(input.title.is_none());
        assert!(input.completed.is_none());
        assert!(input.order.is_none());
    }

    #[test]
    fn new_todo_defaults_completed_to_false() {
        let input: TodoPayload = serde_json::from_str(r#"{"title":"Buy milk"}"#).unwrap();
        let todo = input.into_new_todo().unwrap();
        assert_eq!(todo.title, "Buy milk");
        assert!(!todo.completed);
        assert!(todo.order.is_none());
    }

    #[test]
    fn new_todo_discards_client_id() {
        let input: TodoPayload =
            serde_json::from_str(r#"{"id":"client-chosen","title":"Buy milk","order":1}"#).unwrap();
        let todo = input.into_new_todo().unwrap();
        assert!(todo.id.is_none());
        assert_eq!(todo.order, Some(1));
    }

    #[test]
    fn new_todo_requires_title() {
        let input: TodoPayload = serde_json::from_str(r#"{"completed":true}"#).unwrap();
        assert_eq!(input.into_new_todo(), Err(ValidationError::BlankTitle));
    }

    #[test]
    fn new_todo_rejects_blank_title() {
        let input: TodoPayload = serde_json::from_str(r#"{"title":"   "}"#).unwrap();
        assert_eq!(input.into_new_todo(), Err(ValidationError::BlankTitle));
    }

    #[test]
    fn apply_only_completed_leaves_the_rest() {
        let mut todo = stored();
        todo.apply(TodoPayload {
            completed: Some(true),
            ..TodoPayload::default()
        });
        assert!(todo.completed);
        assert_eq!(todo.title, "Walk dog");
        assert_eq!(todo.order, Some(3));
    }

    #[test]
    fn apply_overwrites_present_fields_and_keeps_id() {
        let mut todo = stored();
        todo.apply(TodoPayload {
            id: Some("other".to_string()),
            title: Some("Walk cat".to_string()),
            completed: None,
            order: Some(7),
        });
        assert_eq!(todo.id.as_deref(), Some("abc"));
        assert_eq!(todo.title, "Walk cat");
        assert_eq!(todo.order, Some(7));
        assert!(!todo.completed);
    }
}
