use thiserror::Error;

use crate::model::UserId;

/// Failure of a single data-access call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("user {id} not found")]
    NotFound { id: UserId },
    #[error("rejected by server: {0}")]
    Validation(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
