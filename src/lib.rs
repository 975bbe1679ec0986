//! User CRUD API
//!
//! An HTTP service exposing user create/read/update/delete operations
//! backed by PostgreSQL (or an in-memory store for tests and local runs),
//! with Argon2 password hashing, soft deletion, and environment-driven
//! configuration.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::info;

use api::state::AppState;
use config::DatabaseBackend;
use infrastructure::user::{Argon2Hasher, InMemoryUserRepository, PostgresUserRepository, UserService};

/// Create the application state with the configured storage backend.
///
/// Schema migrations are not run here; the users table is applied out of
/// band (see migrations/).
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let hasher = Arc::new(Argon2Hasher::new());

    let user_service: Arc<dyn api::state::UserServiceTrait> = match config.database.backend {
        DatabaseBackend::Memory => {
            info!("Storage backend: in-memory");
            Arc::new(UserService::new(
                Arc::new(InMemoryUserRepository::new()),
                hasher,
            ))
        }
        DatabaseBackend::Postgres => {
            info!("Storage backend: postgres");
            let pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.connection_url())
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
            info!("PostgreSQL connection established");

            Arc::new(UserService::new(
                Arc::new(PostgresUserRepository::new(pool)),
                hasher,
            ))
        }
    };

    Ok(AppState::new(user_service))
}
