//! API error type with IntoResponse
//!
//! Search failures are logged in full and reported to the caller with a
//! fixed message only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub const SEARCH_FAILED_MESSAGE: &str = "Failed to perform full-text search.";

#[derive(Debug)]
pub enum ApiError {
    /// Request parameter failed validation (422)
    Validation {
        field: &'static str,
        reason: &'static str,
    },

    /// Search could not be executed (500, logged)
    Search(contactdir_core::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation { field, reason } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": "validation_error",
                    "message": format!("{}: {}", field, reason)
                }),
            ),
            Self::Search(e) => {
                tracing::error!("Failed to perform full-text search: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": SEARCH_FAILED_MESSAGE
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<contactdir_core::Error> for ApiError {
    fn from(e: contactdir_core::Error) -> Self {
        Self::Search(e)
    }
}
