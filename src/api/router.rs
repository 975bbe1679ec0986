use axum::{
    middleware as axum_middleware,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware;
use super::state::AppState;
use super::users;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoint
        .route("/ping", get(health::ping))
        // User CRUD
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        // Add state and middleware
        .with_state(state)
        .layer(axum_middleware::from_fn(middleware::authenticate))
        .layer(middleware::cors_layer())
        .layer(TraceLayer::new_for_http())
}
