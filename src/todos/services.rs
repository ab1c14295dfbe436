use sqlx::SqlitePool;
use tracing::info;

use super::repo_types::{NewTodo, Todo, TodoChanges};
use crate::{auth::repo_types::User, error::ApiError};

pub async fn create(db: &SqlitePool, owner: &User, new: NewTodo) -> Result<Todo, ApiError> {
    let todo = Todo::insert(db, owner.id, &new).await?;
    info!(user_id = owner.id, todo_id = todo.id, "todo created");
    Ok(todo)
}

pub async fn get(db: &SqlitePool, owner: &User, id: i64) -> Result<Todo, ApiError> {
    Todo::find_for_owner(db, owner.id, id)
        .await?
        .ok_or(ApiError::NotFound)
}

pub async fn list(
    db: &SqlitePool,
    owner: &User,
    limit: Option<i64>,
    offset: Option<i64>,
) -> Result<Vec<Todo>, ApiError> {
    let limit = limit.filter(|l| *l >= 0).unwrap_or(-1);
    let offset = offset.unwrap_or(0).max(0);
    Ok(Todo::list_by_owner(db, owner.id, limit, offset).await?)
}

pub async fn update(
    db: &SqlitePool,
    owner: &User,
    id: i64,
    changes: TodoChanges,
) -> Result<Todo, ApiError> {
    let todo = Todo::update_for_owner(db, owner.id, id, &changes)
        .await?
        .ok_or(ApiError::NotFound)?;
    info!(user_id = owner.id, todo_id = todo.id, "todo updated");
    Ok(todo)
}

pub async fn toggle(db: &SqlitePool, owner: &User, id: i64) -> Result<Todo, ApiError> {
    let todo = Todo::toggle_for_owner(db, owner.id, id)
        .await?
        .ok_or(ApiError::NotFound)?;
    info!(user_id = owner.id, todo_id = todo.id, status = todo.status, "todo toggled");
    Ok(todo)
}

pub async fn delete(db: &SqlitePool, owner: &User, id: i64) -> Result<(), ApiError> {
    if !Todo::delete_for_owner(db, owner.id, id).await? {
        return Err(ApiError::NotFound);
    }
    info!(user_id = owner.id, todo_id = id, "todo deleted");
    Ok(())
}
