//! User repository trait

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt::Debug;

use super::entity::{NewUser, User, UserId};
use crate::domain::DomainError;

/// Equality filter for listing users
///
/// An empty filter matches every non-deleted record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserFilter {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl UserFilter {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none()
    }
}

/// Repository trait for user storage
///
/// Implementations never return soft-deleted records; uniqueness of
/// username and email among non-deleted rows is enforced by the store.
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a non-deleted user by id
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// List non-deleted users matching the filter
    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, DomainError>;

    /// Persist a new user, assigning its id and timestamps
    async fn create(&self, new_user: NewUser) -> Result<User, DomainError>;

    /// Update an existing user
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Soft-delete a user; returns false when no non-deleted row matched
    async fn delete(&self, id: UserId) -> Result<bool, DomainError>;
}
