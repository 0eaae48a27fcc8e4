use axum::response::{IntoResponse, Response};
use http::{header::CONTENT_TYPE, HeaderMap, HeaderValue, StatusCode};
use serde::Serialize;
use serde_json::json;

pub type Error = anyhow::Error;
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

const PROBLEM_JSON: &str = "application/problem+json";

/// Body of 400 response for a request the client can fix
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub title: String,
    pub status: u16,
    pub message: String,
    pub params: String,
    pub entity_name: String,
    pub error_key: String,
}

#[derive(Debug)]
pub struct BadRequestAlert {
    pub headers: HeaderMap,
    pub problem: Problem,
}

impl std::fmt::Display for BadRequestAlert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.problem.title, self.problem.message)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequestAlert(Box<BadRequestAlert>),

    #[error("Record not found")]
    NotFound,

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] garde::Report),

    #[error("Data access error: {0}")]
    DataAccess(#[from] ludo_dal::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn error_body(status: StatusCode, code: &str, message: String) -> Response {
    let body = json!({
        "error": message,
        "code": code,
    });
    (status, axum::Json(body)).into_response()
}

fn internal_error() -> Response {
    error_body(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequestAlert(alert) => {
                let BadRequestAlert { headers, problem } = *alert;
                let mut response =
                    (StatusCode::BAD_REQUEST, headers, axum::Json(problem)).into_response();
                response
                    .headers_mut()
                    .insert(CONTENT_TYPE, HeaderValue::from_static(PROBLEM_JSON));
                response
            }
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::InvalidQuery(msg) => {
                error_body(StatusCode::BAD_REQUEST, "INVALID_QUERY", msg)
            }
            ApiError::Validation(report) => {
                (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(report)).into_response()
            }
            ApiError::DataAccess(err) => match err {
                ludo_dal::Error::RecordNotFound(what) => {
                    tracing::debug!("Not found: {what}");
                    StatusCode::NOT_FOUND.into_response()
                }
                ludo_dal::Error::InvalidOrderByField(field) => error_body(
                    StatusCode::BAD_REQUEST,
                    "INVALID_QUERY",
                    format!("Cannot sort by {field}"),
                ),
                other => {
                    tracing::error!(error = %other, "Data access error");
                    internal_error()
                }
            },
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal_error()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(StatusCode::NOT_FOUND, ApiError::NotFound.into_response().status());
        assert_eq!(
            StatusCode::NOT_FOUND,
            ApiError::from(ludo_dal::Error::RecordNotFound("genero 1".into()))
                .into_response()
                .status()
        );
        assert_eq!(
            StatusCode::BAD_REQUEST,
            ApiError::from(ludo_dal::Error::InvalidOrderByField("games".into()))
                .into_response()
                .status()
        );
        assert_eq!(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::from(ludo_dal::Error::DatabaseError(ludo_dal::SqlxError::PoolClosed))
                .into_response()
                .status()
        );
        assert_eq!(
            StatusCode::BAD_REQUEST,
            ApiError::InvalidQuery("bad".into()).into_response().status()
        );
    }
}
