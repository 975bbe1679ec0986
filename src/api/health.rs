//! Health check endpoint

use axum::{http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::api::types::Json;

/// Liveness payload returned by /ping
#[derive(Debug, Clone, Serialize)]
pub struct PingResponse {
    pub status: &'static str,
}

/// Liveness check - returns a fixed payload unconditionally
pub async fn ping() -> impl IntoResponse {
    (StatusCode::OK, Json(PingResponse { status: "pong" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_response_serialization() {
        let json = serde_json::to_string(&PingResponse { status: "pong" }).unwrap();
        assert_eq!(json, r#"{"status":"pong"}"#);
    }
}
