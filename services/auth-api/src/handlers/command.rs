//! Command endpoint

use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use latchkey_types::Command;
use serde_json::Value;

use crate::commands;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// POST /cmd/{group}/{name}
///
/// The body is decoded by the dispatcher rather than a `Json` extractor so
/// malformed input gets the same error envelope as every other failure.
pub async fn command(
    State(state): State<AppState>,
    Path((group, name)): Path<(String, String)>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let full_name = format!("{group}/{name}");
    let Some(command) = Command::from_name(&full_name) else {
        tracing::debug!(command = %full_name, "Unknown command");
        return Err(ApiError::UnknownCommand(full_name));
    };

    let start = Instant::now();
    let result = commands::execute(&state, command, &body).await;

    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) => e.error_code(),
    };
    metrics::counter!(
        "latchkey_commands_total",
        "command" => command.name(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("latchkey_command_duration_seconds", "command" => command.name())
        .record(start.elapsed().as_secs_f64());

    result.map(Json)
}
