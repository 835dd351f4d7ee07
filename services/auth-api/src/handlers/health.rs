//! Health check handlers

use axum::extract::State;
use axum::Json;
use latchkey_types::{HealthResponse, ReadyResponse};

use crate::state::AppState;

const SERVICE: &str = "auth-api";

/// GET /health - Liveness probe (fast, no dependencies)
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE.to_string(),
    })
}

/// GET /ready - Readiness probe with store counters
///
/// The snapshot is loaded before the listener binds, so a process that
/// answers at all is ready.
pub async fn ready(State(state): State<AppState>) -> Json<ReadyResponse> {
    let stats = state.store.stats();
    Json(ReadyResponse {
        status: "ready".to_string(),
        service: SERVICE.to_string(),
        users: stats.users,
        sessions: stats.sessions,
        outstanding_invites: stats.outstanding_invites,
    })
}
