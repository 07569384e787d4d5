//! Session inspection handlers.
//!
//! Read-only views of what the memory store holds, plus session deletion.

use crate::{
    AppState,
    memory::ChatMemoryStore,
    types::{AppError, Message, Result, SummaryResponse},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// Messages of the default session.
pub async fn default_session_messages(
    State(state): State<AppState>,
) -> Result<Json<Vec<Message>>> {
    let session_id = state.config.memory.default_session_id.clone();
    Ok(Json(state.memory.get_messages(&session_id).await?))
}

/// Messages stored for a session (empty if unknown).
pub async fn get_messages(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<Message>>> {
    Ok(Json(state.memory.get_messages(&session_id).await?))
}

/// Clear a session's history. Its cached summary is kept.
pub async fn delete_messages(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode> {
    state.memory.delete_messages(&session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Last known summary of a session.
pub async fn get_summary(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SummaryResponse>> {
    let cached = state
        .memory
        .cached_summary(&session_id)
        .ok_or_else(|| AppError::NotFound(format!("No summary for session {}", session_id)))?;

    Ok(Json(SummaryResponse {
        session_id,
        summary: cached.summary,
        updated_at: cached.updated_at,
    }))
}
