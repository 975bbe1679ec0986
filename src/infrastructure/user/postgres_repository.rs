//! PostgreSQL user repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::user::{NewUser, User, UserFilter, UserId, UserRepository};
use crate::domain::DomainError;

/// PostgreSQL implementation of UserRepository
///
/// Every read is predicated on `deleted_at IS NULL`; uniqueness of
/// username and email is enforced by partial unique indexes scoped to
/// non-deleted rows (see migrations/0001_create_users.sql).
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at, deleted_at
            FROM users
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        row.map(|row| row_to_user(&row)).transpose()
    }

    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at, deleted_at
            FROM users
            WHERE deleted_at IS NULL
              AND ($1::text IS NULL OR username = $1)
              AND ($2::text IS NULL OR email = $2)
            ORDER BY id
            "#,
        )
        .bind(filter.username.as_deref())
        .bind(filter.email.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn create(&self, new_user: NewUser) -> Result<User, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING id, username, email, password_hash, created_at, updated_at, deleted_at
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &new_user.username, &new_user.email, "create"))?;

        row_to_user(&row)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = $2, email = $3, password_hash = $4, updated_at = $5
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(user.id().as_i64())
        .bind(user.username())
        .bind(user.email())
        .bind(user.password_hash())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, user.username(), user.email(), "update"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                user.id()
            )));
        }

        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET deleted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to delete user: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let id: i64 = row
        .try_get("id")
        .map_err(|e| DomainError::storage(format!("Invalid user row: {}", e)))?;

    Ok(User::from_storage(
        UserId::new(id),
        row.try_get("username")
            .map_err(|e| DomainError::storage(format!("Invalid user row: {}", e)))?,
        row.try_get("email")
            .map_err(|e| DomainError::storage(format!("Invalid user row: {}", e)))?,
        row.try_get("password_hash")
            .map_err(|e| DomainError::storage(format!("Invalid user row: {}", e)))?,
        row.try_get("created_at")
            .map_err(|e| DomainError::storage(format!("Invalid user row: {}", e)))?,
        row.try_get("updated_at")
            .map_err(|e| DomainError::storage(format!("Invalid user row: {}", e)))?,
        row.try_get("deleted_at")
            .map_err(|e| DomainError::storage(format!("Invalid user row: {}", e)))?,
    ))
}

fn map_write_error(error: sqlx::Error, username: &str, email: &str, operation: &str) -> DomainError {
    let msg = error.to_string();

    if msg.contains("duplicate key") || msg.contains("unique constraint") {
        if msg.contains("username") {
            DomainError::conflict(format!("Username '{}' already exists", username))
        } else {
            DomainError::conflict(format!("Email '{}' already exists", email))
        }
    } else {
        DomainError::storage(format!("Failed to {} user: {}", operation, msg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duplicate_key_error(detail: &str) -> sqlx::Error {
        sqlx::Error::Protocol(format!(
            "duplicate key value violates unique constraint \"{}\"",
            detail
        ))
    }

    #[test]
    fn test_duplicate_username_maps_to_conflict() {
        let error = map_write_error(
            duplicate_key_error("users_username_key"),
            "jdoe",
            "j@example.com",
            "create",
        );

        assert!(matches!(error, DomainError::Conflict { .. }));
        assert!(error.to_string().contains("Username 'jdoe'"));
    }

    #[test]
    fn test_duplicate_email_maps_to_conflict() {
        let error = map_write_error(
            duplicate_key_error("users_email_key"),
            "jdoe",
            "j@example.com",
            "create",
        );

        assert!(matches!(error, DomainError::Conflict { .. }));
        assert!(error.to_string().contains("Email 'j@example.com'"));
    }

    #[test]
    fn test_other_errors_map_to_storage() {
        let error = map_write_error(
            sqlx::Error::Protocol("connection reset".to_string()),
            "jdoe",
            "j@example.com",
            "update",
        );

        assert!(matches!(error, DomainError::Storage { .. }));
        assert!(error.to_string().contains("Failed to update user"));
    }
}
