use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cherry_api::UserId;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MockError {
    #[error("User not found")]
    NotFound(UserId),
    #[error("{0}")]
    Invalid(String),
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(id) => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "User not found",
                    "id": id
                })),
            )
                .into_response(),
            Self::Invalid(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": message })),
            )
                .into_response(),
        }
    }
}
