//! Request authentication middleware
//!
//! Placeholder: every request passes through untouched. The JWT secret is
//! already resolved into `AuthConfig` so token verification can slot in
//! here without touching the handlers.

use axum::{extract::Request, middleware::Next, response::Response};

/// Pass-through authentication middleware
pub async fn authenticate(request: Request, next: Next) -> Response {
    next.run(request).await
}
