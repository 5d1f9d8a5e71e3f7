//! Wire types for the Tempo to-do API.
//!
//! Field names follow the server's JSON contract (camelCase keys,
//! RFC 3339 timestamps). These types carry no behavior beyond serde.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A to-do list as returned by `GET /lists`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub title: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// A single item within a to-do list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: i64,
    #[serde(rename = "listId")]
    pub list_id: i64,
    pub task: String,
    #[serde(rename = "isCompleted")]
    pub is_completed: bool,
    /// Absent when the item has no deadline.
    #[serde(rename = "dueDate", default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub priority: i32,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// A list with its items, as returned by `GET /lists/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoListWithItems {
    pub id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub title: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<TodoItem>,
}

/// Request body for `POST /users/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /users/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response body of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Request body for `POST /lists`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateListRequest {
    pub title: String,
}

/// Error body the server attaches to non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_list_parses_server_json() {
        let json = r#"{"id":3,"userId":1,"title":"Groceries","createdAt":"2026-01-05T09:30:00Z"}"#;
        let list: TodoList = serde_json::from_str(json).unwrap();
        assert_eq!(list.id, 3);
        assert_eq!(list.user_id, 1);
        assert_eq!(list.title, "Groceries");
    }

    #[test]
    fn test_todo_item_due_date_is_optional() {
        let json = r#"{"id":7,"listId":3,"task":"Buy milk","isCompleted":false,"priority":1,"createdAt":"2026-01-05T09:31:00Z"}"#;
        let item: TodoItem = serde_json::from_str(json).unwrap();
        assert!(item.due_date.is_none());
        assert!(!item.is_completed);
    }

    #[test]
    fn test_list_with_items_defaults_to_empty_items() {
        let json = r#"{"id":3,"userId":1,"title":"Groceries","createdAt":"2026-01-05T09:30:00Z"}"#;
        let list: TodoListWithItems = serde_json::from_str(json).unwrap();
        assert!(list.items.is_empty());
    }

    #[test]
    fn test_create_list_request_serializes_title_only() {
        let body = serde_json::to_value(CreateListRequest {
            title: "Trip".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"title": "Trip"}));
    }
}
