//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{NewUser, User, UserFilter, UserId, UserRepository};
use crate::domain::DomainError;

/// In-memory implementation of UserRepository
///
/// Soft-deleted records stay in the map but are invisible to reads, and
/// their username/email no longer count against uniqueness, matching the
/// partial unique indexes of the Postgres backend.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<i64, User>>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }

    fn assign_id(&self) -> UserId {
        UserId::new(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    fn conflict_among_live(
        users: &HashMap<i64, User>,
        username: &str,
        email: &str,
        exclude: Option<UserId>,
    ) -> Option<DomainError> {
        for user in users.values() {
            if user.is_deleted() || Some(user.id()) == exclude {
                continue;
            }

            if user.username() == username {
                return Some(DomainError::conflict(format!(
                    "Username '{}' already exists",
                    username
                )));
            }

            if user.email() == email {
                return Some(DomainError::conflict(format!(
                    "Email '{}' already exists",
                    email
                )));
            }
        }

        None
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;

        Ok(users
            .get(&id.as_i64())
            .filter(|user| !user.is_deleted())
            .cloned())
    }

    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users
            .values()
            .filter(|user| !user.is_deleted())
            .filter(|user| {
                filter
                    .username
                    .as_deref()
                    .is_none_or(|username| user.username() == username)
            })
            .filter(|user| {
                filter
                    .email
                    .as_deref()
                    .is_none_or(|email| user.email() == email)
            })
            .cloned()
            .collect();

        result.sort_by_key(|user| user.id().as_i64());

        Ok(result)
    }

    async fn create(&self, new_user: NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if let Some(conflict) =
            Self::conflict_among_live(&users, &new_user.username, &new_user.email, None)
        {
            return Err(conflict);
        }

        let user = User::new(self.assign_id(), new_user);
        users.insert(user.id().as_i64(), user.clone());

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        let exists = users
            .get(&user.id().as_i64())
            .is_some_and(|stored| !stored.is_deleted());

        if !exists {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                user.id()
            )));
        }

        if let Some(conflict) =
            Self::conflict_among_live(&users, user.username(), user.email(), Some(user.id()))
        {
            return Err(conflict);
        }

        users.insert(user.id().as_i64(), user.clone());

        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;

        match users.get_mut(&id.as_i64()) {
            Some(user) if !user.is_deleted() => {
                user.mark_deleted();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
