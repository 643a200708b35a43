use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ingredient::ParseError;

/// Errors surfaced by the HTTP layer
#[derive(Debug, Error)]
pub enum ApiError {
    /// Requested recipe or cart does not exist
    #[error("{0}")]
    NotFound(String),

    /// Insert conflicts with an existing row (duplicate recipe name,
    /// recipe already in the cart)
    #[error("{0}")]
    Conflict(String),

    /// An ingredient line did not match the expected grammar
    #[error(transparent)]
    InvalidIngredient(#[from] ParseError),

    /// Underlying database failure
    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

/// Result type alias for handlers and store operations
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// HTTP status for each error kind, kept in one place
    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::InvalidIngredient(_) => StatusCode::BAD_REQUEST,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// One error entry in the response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpError {
    pub status_code: u16,
    pub message: String,
}

/// Error response body: `{"errors":[{"status_code":N,"message":"..."}]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Errors {
    pub errors: Vec<HttpError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Database details stay in the logs, not in the response body
        let message = if status.is_server_error() {
            error!("internal error: {self}");
            "Database error".to_owned()
        } else {
            self.to_string()
        };

        let body = Errors {
            errors: vec![HttpError {
                status_code: status.as_u16(),
                message,
            }],
        };

        (status, Json(body)).into_response()
    }
}
