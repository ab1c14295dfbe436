use anyhow::Context;
use sqlx::SqlitePool;

use super::repo_types::{NewTodo, Todo, TodoChanges};

impl Todo {
    pub async fn insert(db: &SqlitePool, owner_id: i64, new: &NewTodo) -> anyhow::Result<Todo> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (name, description, due_date, status, owner_id)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, name, description, due_date, status, owner_id
            "#,
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.due_date)
        .bind(new.status)
        .bind(owner_id)
        .fetch_one(db)
        .await
        .context("insert todo")?;
        Ok(todo)
    }

    pub async fn find_for_owner(
        db: &SqlitePool,
        owner_id: i64,
        id: i64,
    ) -> anyhow::Result<Option<Todo>> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, name, description, due_date, status, owner_id
            FROM todos
            WHERE id = ? AND owner_id = ?
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(db)
        .await
        .context("find todo")?;
        Ok(todo)
    }

    /// Insertion order. A negative `limit` means no limit.
    pub async fn list_by_owner(
        db: &SqlitePool,
        owner_id: i64,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Todo>> {
        let rows = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, name, description, due_date, status, owner_id
            FROM todos
            WHERE owner_id = ?
            ORDER BY id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(owner_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
        .context("list todos")?;
        Ok(rows)
    }

    pub async fn update_for_owner(
        db: &SqlitePool,
        owner_id: i64,
        id: i64,
        changes: &TodoChanges,
    ) -> anyhow::Result<Option<Todo>> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todos
               SET name        = COALESCE(?, name),
                   description = COALESCE(?, description),
                   due_date    = COALESCE(?, due_date),
                   status      = COALESCE(?, status)
             WHERE id = ? AND owner_id = ?
            RETURNING id, name, description, due_date, status, owner_id
            "#,
        )
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.due_date)
        .bind(changes.status)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(db)
        .await
        .context("update todo")?;
        Ok(todo)
    }

    pub async fn toggle_for_owner(
        db: &SqlitePool,
        owner_id: i64,
        id: i64,
    ) -> anyhow::Result<Option<Todo>> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todos
               SET status = NOT status
             WHERE id = ? AND owner_id = ?
            RETURNING id, name, description, due_date, status, owner_id
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(db)
        .await
        .context("toggle todo")?;
        Ok(todo)
    }

    /// Returns whether a row was removed.
    pub async fn delete_for_owner(
        db: &SqlitePool,
        owner_id: i64,
        id: i64,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM todos WHERE id = ? AND owner_id = ?")
            .bind(id)
            .bind(owner_id)
            .execute(db)
            .await
            .context("delete todo")?;
        Ok(res.rows_affected() > 0)
    }
}
