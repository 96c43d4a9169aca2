use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::dto::{
    TodoItemPayload, TodoItemResponse, TodoListPayload, TodoListResponse, TodoListSummaryResponse,
};
use crate::problem::ProblemResponse;
use crate::router::AppState;
use crate::validate;

pub async fn list_lists(State(state): State<AppState>) -> Json<Vec<TodoListSummaryResponse>> {
    let summaries = state.list_queries().summaries().await;
    Json(summaries.into_iter().map(Into::into).collect())
}

pub async fn create_list(
    State(state): State<AppState>,
    Json(payload): Json<TodoListPayload>,
) -> Result<(StatusCode, Json<TodoListResponse>), ProblemResponse> {
    let list = state.list_commands().create(payload.into_draft()).await?;
    let body = TodoListResponse::from_domain(&list, state.now());
    Ok((StatusCode::CREATED, Json(body)))
}

pub async fn get_list(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<TodoListResponse>, ProblemResponse> {
    let list = state
        .list_queries()
        .get(id)
        .await
        .ok_or_else(|| ProblemResponse::not_found(format!("todo list with id {id} not found")))?;
    Ok(Json(TodoListResponse::from_domain(&list, state.now())))
}

pub async fn update_list(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(payload): Json<TodoListPayload>,
) -> Result<Json<TodoListResponse>, ProblemResponse> {
    let list = state
        .list_commands()
        .update(id, payload.into_draft())
        .await?;
    Ok(Json(TodoListResponse::from_domain(&list, state.now())))
}

pub async fn delete_list(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ProblemResponse> {
    state.list_commands().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn archive_list(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<TodoListResponse>, ProblemResponse> {
    let list = state.list_commands().archive(id).await?;
    Ok(Json(TodoListResponse::from_domain(&list, state.now())))
}

pub async fn restore_list(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<TodoListResponse>, ProblemResponse> {
    let list = state.list_commands().restore(id).await?;
    Ok(Json(TodoListResponse::from_domain(&list, state.now())))
}

pub async fn add_list_item(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(payload): Json<TodoItemPayload>,
) -> Result<(StatusCode, Json<TodoItemResponse>), ProblemResponse> {
    validate::validate_item(&payload.title, payload.description.as_deref())?;
    let item = state
        .list_commands()
        .add_item(id, payload.into_draft())
        .await?;
    state
        .notifications()
        .todo_item_created(item.id(), item.title())
        .await;

    let body = TodoItemResponse::from_domain(&item, state.now());
    Ok((StatusCode::CREATED, Json(body)))
}

pub async fn remove_list_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(u64, u64)>,
) -> Result<StatusCode, ProblemResponse> {
    state.list_commands().remove_item(id, item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
