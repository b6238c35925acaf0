//! Client-side request counters. Recording is a no-op until a binary installs
//! a recorder.

use metrics::counter;

use crate::error::ApiError;

/// Record the outcome of a data-access call
pub fn record_api_call<T>(operation: &'static str, result: &Result<T, ApiError>) {
    let outcome = match result {
        Ok(_) => "success",
        Err(ApiError::NotFound { .. }) => "not_found",
        Err(ApiError::Validation(_)) => "rejected",
        Err(ApiError::Transport(_)) => "transport_error",
    };

    counter!(
        "user_api_requests_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}
