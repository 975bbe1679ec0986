//! User entity and related types

use chrono::{DateTime, Utc};
use serde::Serialize;

/// User identifier - a surrogate key assigned by the store on creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Parse an identifier from its path-parameter form.
    ///
    /// Returns `None` for anything that is not a well-formed identifier;
    /// callers treat that the same as an unknown id.
    pub fn parse(value: &str) -> Option<Self> {
        value.trim().parse::<i64>().ok().map(Self)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user record that has not been persisted yet.
///
/// The store assigns the identifier and timestamps; the password has
/// already been hashed by the time a `NewUser` reaches a repository.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// User entity
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Store-assigned identifier
    id: UserId,
    username: String,
    email: String,
    /// Argon2 password hash - never exposed in serialization
    #[serde(skip_serializing)]
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    /// Soft-deletion marker - never exposed in serialization
    #[serde(skip_serializing)]
    deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a user from a persisted-to-be record with a freshly assigned id
    pub fn new(id: UserId, new_user: NewUser) -> Self {
        let now = Utc::now();

        Self {
            id,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Rehydrate a user from stored column values
    #[allow(clippy::too_many_arguments)]
    pub fn from_storage(
        id: UserId,
        username: String,
        email: String,
        password_hash: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            created_at,
            updated_at,
            deleted_at,
        }
    }

    // Getters

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Soft-deleted records are excluded from normal reads
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    // Mutators

    /// Update the username
    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
        self.touch();
    }

    /// Update the email address
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.touch();
    }

    /// Update the password hash
    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
        self.touch();
    }

    /// Mark the record as soft-deleted
    pub fn mark_deleted(&mut self) {
        self.deleted_at = Some(Utc::now());
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user(id: i64, username: &str, email: &str) -> User {
        User::new(
            UserId::new(id),
            NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash: "hashed_password".to_string(),
            },
        )
    }

    #[test]
    fn test_user_id_parse() {
        assert_eq!(UserId::parse("42"), Some(UserId::new(42)));
        assert_eq!(UserId::parse(" 7 "), Some(UserId::new(7)));
        assert_eq!(UserId::parse(""), None);
        assert_eq!(UserId::parse("abc"), None);
        assert_eq!(UserId::parse("1.5"), None);
    }

    #[test]
    fn test_user_id_display() {
        assert_eq!(UserId::new(42).to_string(), "42");
    }

    #[test]
    fn test_user_creation() {
        let user = create_test_user(1, "jdoe", "j@example.com");

        assert_eq!(user.id().as_i64(), 1);
        assert_eq!(user.username(), "jdoe");
        assert_eq!(user.email(), "j@example.com");
        assert_eq!(user.password_hash(), "hashed_password");
        assert!(!user.is_deleted());
        assert_eq!(user.created_at(), user.updated_at());
    }

    #[test]
    fn test_user_mutators_bump_updated_at() {
        let mut user = create_test_user(1, "jdoe", "j@example.com");
        let original_updated = user.updated_at();

        // Small delay to ensure timestamp differs
        std::thread::sleep(std::time::Duration::from_millis(10));

        user.set_email("new@example.com");
        assert_eq!(user.email(), "new@example.com");
        assert!(user.updated_at() > original_updated);
    }

    #[test]
    fn test_user_mark_deleted() {
        let mut user = create_test_user(1, "jdoe", "j@example.com");

        user.mark_deleted();
        assert!(user.is_deleted());
        assert!(user.deleted_at().is_some());
    }

    #[test]
    fn test_user_serialization_excludes_hidden_fields() {
        let mut user = create_test_user(1, "jdoe", "j@example.com");
        user.mark_deleted();

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"username\":\"jdoe\""));
        assert!(!json.contains("password"));
        assert!(!json.contains("deleted_at"));
    }

    #[test]
    fn test_user_from_storage_roundtrip() {
        let created = Utc::now();
        let user = User::from_storage(
            UserId::new(9),
            "jdoe".to_string(),
            "j@example.com".to_string(),
            "hash".to_string(),
            created,
            created,
            None,
        );

        assert_eq!(user.id().as_i64(), 9);
        assert_eq!(user.created_at(), created);
        assert!(!user.is_deleted());
    }
}
