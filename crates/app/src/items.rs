use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::dto::{ExtendDueDatePayload, SetPriorityPayload, TodoItemPayload, TodoItemResponse};
use crate::problem::ProblemResponse;
use crate::router::AppState;
use crate::validate;

pub async fn list_items(State(state): State<AppState>) -> Json<Vec<TodoItemResponse>> {
    let now = state.now();
    let items = state.item_queries().list().await;
    Json(
        items
            .iter()
            .map(|item| TodoItemResponse::from_domain(item, now))
            .collect(),
    )
}

pub async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<TodoItemPayload>,
) -> Result<(StatusCode, Json<TodoItemResponse>), ProblemResponse> {
    validate::validate_item(&payload.title, payload.description.as_deref())?;
    let item = state.item_commands().create(payload.into_draft()).await?;
    state
        .notifications()
        .todo_item_created(item.id(), item.title())
        .await;

    let body = TodoItemResponse::from_domain(&item, state.now());
    Ok((StatusCode::CREATED, Json(body)))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<TodoItemResponse>, ProblemResponse> {
    let item = state
        .item_queries()
        .get(id)
        .await
        .ok_or_else(|| ProblemResponse::not_found(format!("todo item with id {id} not found")))?;
    Ok(Json(TodoItemResponse::from_domain(&item, state.now())))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(payload): Json<TodoItemPayload>,
) -> Result<Json<TodoItemResponse>, ProblemResponse> {
    validate::validate_item(&payload.title, payload.description.as_deref())?;
    let item = state
        .item_commands()
        .update(id, payload.into_draft())
        .await?;
    Ok(Json(TodoItemResponse::from_domain(&item, state.now())))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ProblemResponse> {
    state.item_commands().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn start_item(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<TodoItemResponse>, ProblemResponse> {
    let item = state.item_commands().start(id).await?;
    Ok(Json(TodoItemResponse::from_domain(&item, state.now())))
}

pub async fn complete_item(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<TodoItemResponse>, ProblemResponse> {
    let item = state.item_commands().complete(id).await?;
    state
        .notifications()
        .todo_item_completed(item.id(), item.title())
        .await;
    Ok(Json(TodoItemResponse::from_domain(&item, state.now())))
}

pub async fn cancel_item(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<TodoItemResponse>, ProblemResponse> {
    let item = state.item_commands().cancel(id).await?;
    Ok(Json(TodoItemResponse::from_domain(&item, state.now())))
}

pub async fn reopen_item(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<TodoItemResponse>, ProblemResponse> {
    let item = state.item_commands().reopen(id).await?;
    Ok(Json(TodoItemResponse::from_domain(&item, state.now())))
}

pub async fn set_item_priority(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(payload): Json<SetPriorityPayload>,
) -> Result<Json<TodoItemResponse>, ProblemResponse> {
    let item = state
        .item_commands()
        .set_priority(id, payload.priority)
        .await?;
    Ok(Json(TodoItemResponse::from_domain(&item, state.now())))
}

pub async fn extend_item_due_date(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(payload): Json<ExtendDueDatePayload>,
) -> Result<Json<TodoItemResponse>, ProblemResponse> {
    let item = state
        .item_commands()
        .extend_due_date(id, payload.due_date)
        .await?;
    Ok(Json(TodoItemResponse::from_domain(&item, state.now())))
}
