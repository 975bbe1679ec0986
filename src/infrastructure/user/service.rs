//! User service: the validate -> hash -> persist pipeline
//!
//! The explicit replacement for ORM lifecycle hooks: handlers call this
//! service, the service runs validation and password hashing as visible
//! steps before touching the repository.

use std::sync::Arc;

use crate::domain::user::{
    validate_new_user, validate_user_update, NewUser, User, UserFilter, UserId, UserRepository,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Request for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request for updating a user
///
/// Absent fields keep their stored values; only present fields are
/// validated.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// User service for CRUD operations
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository, H: PasswordHasher> UserService<R, H> {
    /// Create a new user service
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Create a new user: validate every field, hash the password, persist
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        validate_new_user(&request.username, &request.email, &request.password)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let password_hash = self.hasher.hash(&request.password)?;

        self.repository
            .create(NewUser {
                username: request.username,
                email: request.email,
                password_hash,
            })
            .await
    }

    /// Get a user by its path-parameter id
    ///
    /// Malformed identifiers are indistinguishable from unknown ones and
    /// also surface as NotFound.
    pub async fn get(&self, id: &str) -> Result<User, DomainError> {
        let user_id = parse_id(id)?;

        self.repository
            .get(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))
    }

    /// List users matching an equality filter (empty filter = all)
    pub async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, DomainError> {
        self.repository.list(filter).await
    }

    /// Update a user, re-validating only the supplied fields.
    ///
    /// The password is re-hashed only when the supplied plaintext differs
    /// from the currently stored one.
    pub async fn update(&self, id: &str, request: UpdateUserRequest) -> Result<User, DomainError> {
        let user_id = parse_id(id)?;

        let mut user = self
            .repository
            .get(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        validate_user_update(
            request.username.as_deref(),
            request.email.as_deref(),
            request.password.as_deref(),
        )
        .map_err(|e| DomainError::validation(e.to_string()))?;

        if let Some(username) = request.username {
            if username != user.username() {
                user.set_username(username);
            }
        }

        if let Some(email) = request.email {
            if email != user.email() {
                user.set_email(email);
            }
        }

        if let Some(password) = request.password {
            if !self.hasher.verify(&password, user.password_hash()) {
                let password_hash = self.hasher.hash(&password)?;
                user.set_password_hash(password_hash);
            }
        }

        self.repository.update(&user).await
    }

    /// Soft-delete a user
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let user_id = parse_id(id)?;

        if !self.repository.delete(user_id).await? {
            return Err(DomainError::not_found(format!("User '{}' not found", id)));
        }

        Ok(())
    }
}

fn parse_id(id: &str) -> Result<UserId, DomainError> {
    UserId::parse(id).ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))
}
