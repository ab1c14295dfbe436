use serde::Serialize;
use sqlx::FromRow;
use time::PrimitiveDateTime;

use super::dto::wire_datetime;

/// Todo record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Todo {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "wire_datetime")]
    pub due_date: PrimitiveDateTime,
    pub status: bool,
    pub owner_id: i64,
}

/// Fields of a new todo.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub name: String,
    pub description: Option<String>,
    pub due_date: PrimitiveDateTime,
    pub status: bool,
}

/// Partial update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct TodoChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<PrimitiveDateTime>,
    pub status: Option<bool>,
}
