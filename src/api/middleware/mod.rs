//! Request middleware

mod auth;
mod cors;

pub use auth::authenticate;
pub use cors::cors_layer;
