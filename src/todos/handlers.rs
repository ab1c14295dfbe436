use axum::{
    extract::State,
    routing::{get, patch},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::instrument;

use super::{
    dto::{CreateTodoRequest, Pagination, UpdateTodoRequest},
    repo_types::Todo,
    services,
};
use crate::{
    auth::extractors::CurrentUser,
    error::ApiError,
    extract::{ApiJson, ApiPath, ApiQuery},
    state::AppState,
};

pub fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/", get(list_todos).post(create_todo))
        .route(
            "/todos/:id",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route("/todos/:id/toggle", patch(toggle_todo))
}

#[instrument(skip(state, user, payload), fields(user_id = user.id))]
pub async fn create_todo(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(payload): ApiJson<CreateTodoRequest>,
) -> Result<Json<Todo>, ApiError> {
    let todo = services::create(&state.db, &user, payload.into()).await?;
    Ok(Json(todo))
}

#[instrument(skip(state, user), fields(user_id = user.id))]
pub async fn list_todos(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiQuery(p): ApiQuery<Pagination>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = services::list(&state.db, &user, p.limit, p.offset).await?;
    Ok(Json(todos))
}

#[instrument(skip(state, user), fields(user_id = user.id))]
pub async fn get_todo(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Todo>, ApiError> {
    Ok(Json(services::get(&state.db, &user, id).await?))
}

#[instrument(skip(state, user, payload), fields(user_id = user.id))]
pub async fn update_todo(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateTodoRequest>,
) -> Result<Json<Todo>, ApiError> {
    let todo = services::update(&state.db, &user, id, payload.into()).await?;
    Ok(Json(todo))
}

#[instrument(skip(state, user), fields(user_id = user.id))]
pub async fn toggle_todo(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Todo>, ApiError> {
    Ok(Json(services::toggle(&state.db, &user, id).await?))
}

#[instrument(skip(state, user), fields(user_id = user.id))]
pub async fn delete_todo(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Value>, ApiError> {
    services::delete(&state.db, &user, id).await?;
    Ok(Json(json!({ "detail": "Todo deleted successfully" })))
}
