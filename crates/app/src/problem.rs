use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metrics::counter;
use serde::Serialize;

use todo_application::AppError;
use todo_storage::StorageError;

use crate::validate::ValidationError;

const TYPE_BAD_REQUEST: &str = "https://tools.ietf.org/html/rfc7231#section-6.5.1";
const TYPE_NOT_FOUND: &str = "https://tools.ietf.org/html/rfc7231#section-6.5.4";
const TYPE_INTERNAL: &str = "https://tools.ietf.org/html/rfc7231#section-6.6.1";

#[derive(Debug, Serialize)]
struct ProblemDetails {
    #[serde(rename = "type")]
    problem_type: &'static str,
    title: &'static str,
    detail: String,
}

/// RFC 7807 style error body returned by every failing API route.
pub struct ProblemResponse {
    status: StatusCode,
    body: ProblemDetails,
}

impl ProblemResponse {
    pub fn new<S: Into<String>>(
        status: StatusCode,
        problem_type: &'static str,
        title: &'static str,
        detail: S,
    ) -> Self {
        Self {
            status,
            body: ProblemDetails {
                problem_type,
                title,
                detail: detail.into(),
            },
        }
    }

    pub fn bad_request<S: Into<String>>(title: &'static str, detail: S) -> Self {
        Self::new(StatusCode::BAD_REQUEST, TYPE_BAD_REQUEST, title, detail)
    }

    pub fn not_found<S: Into<String>>(detail: S) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            TYPE_NOT_FOUND,
            "Resource Not Found",
            detail,
        )
    }

    pub fn internal<S: Into<String>>(detail: S) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            TYPE_INTERNAL,
            "Internal Server Error",
            detail,
        )
    }
}

impl From<AppError> for ProblemResponse {
    fn from(err: AppError) -> Self {
        match err {
            AppError::ItemNotFound(_) | AppError::ListNotFound(_) => {
                Self::not_found(err.to_string())
            }
            AppError::Domain(inner) => Self::bad_request("Domain Error", inner.to_string()),
            AppError::Storage(StorageError::NotFound { .. }) => Self::not_found(err.to_string()),
        }
    }
}

impl From<ValidationError> for ProblemResponse {
    fn from(err: ValidationError) -> Self {
        Self::bad_request("Invalid Argument", err.to_string())
    }
}

impl IntoResponse for ProblemResponse {
    fn into_response(self) -> Response {
        counter!(
            "api_problem_responses_total",
            "status" => self.status.as_u16().to_string()
        )
        .increment(1);

        let mut response = Json(self.body).into_response();
        *response.status_mut() = self.status;
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}
