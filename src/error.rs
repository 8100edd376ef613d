use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Every way a request can fail before or during its handler.
#[derive(Debug, thiserror::Error)]
pub enum GavelError {
    /// The request carried no usable login; the frontend redirects to the
    /// login page on this status.
    #[error("login required")]
    Unauthorized,
    /// The viewer is logged in but not allowed to do this. Carries the
    /// required position short-names when the check was a positive one.
    #[error("access forbidden")]
    Forbidden(Option<String>),
    #[error("resource not found")]
    NotFound,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("server error: {0}")]
    ServerError(String),
    #[error("database error: {0}")]
    DbError(#[from] sqlx::Error),
}

pub type GavelResult<T> = Result<T, GavelError>;

impl IntoResponse for GavelError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            GavelError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({
                    "message": "login required"
                }),
            ),
            GavelError::Forbidden(Some(positions)) => (
                StatusCode::FORBIDDEN,
                json!({
                    "message": "access forbidden",
                    "required_positions": positions
                }),
            ),
            GavelError::Forbidden(None) => (
                StatusCode::FORBIDDEN,
                json!({
                    "message": "access forbidden"
                }),
            ),
            GavelError::NotFound => (
                StatusCode::NOT_FOUND,
                json!({
                    "message": "resource not found"
                }),
            ),
            GavelError::BadRequest(reason) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "message": "bad request",
                    "reason": reason
                }),
            ),
            GavelError::ServerError(error) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "message": "server error",
                    "error": error
                }),
            ),
            GavelError::DbError(error) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "message": "database error",
                    "error": error.to_string()
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
