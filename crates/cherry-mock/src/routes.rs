use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use cherry_api::{NewUser, User, UserId, UserPatch};
use validator::ValidateEmail;

use crate::{error::MockError, state::MockState};

/// Create the user routes
pub fn routes() -> Router<MockState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
}

/// Get all users
async fn list_users(State(state): State<MockState>) -> Json<Vec<User>> {
    Json(state.list())
}

/// Get user by ID
async fn get_user(
    State(state): State<MockState>,
    Path(id): Path<UserId>,
) -> Result<Json<User>, MockError> {
    state.get(id).map(Json)
}

/// Create a new user
async fn create_user(
    State(state): State<MockState>,
    Json(payload): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), MockError> {
    check_name(&payload.name)?;
    check_email(&payload.email)?;

    let user = state.insert(payload);
    tracing::info!(id = user.id, "Created user");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Update the fields present in the payload
async fn update_user(
    State(state): State<MockState>,
    Path(id): Path<UserId>,
    Json(patch): Json<UserPatch>,
) -> Result<Json<User>, MockError> {
    if let Some(name) = &patch.name {
        check_name(name)?;
    }
    if let Some(email) = &patch.email {
        check_email(email)?;
    }

    let user = state.patch(id, &patch)?;
    tracing::info!(id, "Updated user");
    Ok(Json(user))
}

/// Delete a user
async fn delete_user(
    State(state): State<MockState>,
    Path(id): Path<UserId>,
) -> Result<StatusCode, MockError> {
    state.remove(id)?;
    tracing::info!(id, "Deleted user");
    Ok(StatusCode::NO_CONTENT)
}

fn check_name(name: &str) -> Result<(), MockError> {
    if name.trim().is_empty() {
        return Err(MockError::Invalid("Name cannot be empty".to_string()));
    }
    Ok(())
}

fn check_email(email: &str) -> Result<(), MockError> {
    if !email.validate_email() {
        return Err(MockError::Invalid("Invalid email format".to_string()));
    }
    Ok(())
}
