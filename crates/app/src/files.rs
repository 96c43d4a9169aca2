use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use todo_infra::FileError;

use crate::dto::FileUploadResponse;
use crate::problem::ProblemResponse;
use crate::router::AppState;

pub async fn upload(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<FileUploadResponse>), ProblemResponse> {
    let stored_name = state
        .files()
        .save(&name, &body)
        .await
        .map_err(file_problem)?;
    let url = state.files().url_for(&stored_name);

    Ok((
        StatusCode::CREATED,
        Json(FileUploadResponse {
            file_name: stored_name,
            url,
        }),
    ))
}

pub async fn download(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, ProblemResponse> {
    let contents = state.files().load(&name).await.map_err(file_problem)?;
    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        contents,
    )
        .into_response())
}

fn file_problem(err: FileError) -> ProblemResponse {
    match err {
        FileError::InvalidName => ProblemResponse::bad_request("Invalid Argument", err.to_string()),
        FileError::NotFound(_) => ProblemResponse::not_found(err.to_string()),
        FileError::Io(inner) => {
            error!(stage = "files", error = %inner, "file operation failed");
            ProblemResponse::internal("An unexpected error occurred")
        }
    }
}
