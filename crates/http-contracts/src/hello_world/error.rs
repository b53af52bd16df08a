use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::error::schema::ErrorResponse;

/// Raised when a `HelloWorldResponse` cannot be built from untyped input
#[derive(Error, Debug)]
pub enum ConstructionError {
    #[error("Missing required field `{field}`")]
    MissingField { field: &'static str },

    #[error("Field `{field}` must be a {expected}, found {found}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("Invalid JSON, {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl IntoResponse for ConstructionError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::new(self.to_string()));

        (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
    }
}
