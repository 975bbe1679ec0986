//! User CRUD endpoints

use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::{User, UserFilter};
use crate::infrastructure::user::{CreateUserRequest, UpdateUserRequest};

/// Request to create a new user
///
/// Fields default to empty strings so that absent fields are reported as
/// field-specific validation errors rather than a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserApiRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request to update a user; absent fields keep their stored values
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserApiRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// User response; the password hash and deletion marker never appear
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().as_i64(),
            username: user.username().to_string(),
            email: user.email().to_string(),
            created_at: user.created_at().to_rfc3339(),
            updated_at: user.updated_at().to_rfc3339(),
        }
    }
}

/// Success-message response: `{"message": "<text>"}`
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    Query(filter): Query<UserFilter>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    debug!(?filter, "Listing users");

    let users = state.user_service.list(&filter).await.map_err(ApiError::from)?;

    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(id = %id, "Getting user");

    let user = state.user_service.get(&id).await.map_err(ApiError::from)?;

    Ok(Json(UserResponse::from(&user)))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserApiRequest>,
) -> Result<(axum::http::StatusCode, Json<UserResponse>), ApiError> {
    debug!(username = %request.username, "Creating user");

    let user = state
        .user_service
        .create(CreateUserRequest {
            username: request.username,
            email: request.email,
            password: request.password,
        })
        .await
        .map_err(ApiError::from)?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(UserResponse::from(&user)),
    ))
}

/// PUT /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserApiRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(id = %id, "Updating user");

    let user = state
        .user_service
        .update(
            &id,
            UpdateUserRequest {
                username: request.username,
                email: request.email,
                password: request.password,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    debug!(id = %id, "Deleting user");

    state.user_service.delete(&id).await.map_err(ApiError::from)?;

    Ok(Json(MessageResponse {
        message: "User deleted".to_string(),
    }))
}
