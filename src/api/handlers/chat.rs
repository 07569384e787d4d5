use crate::{
    AppState,
    types::{ChatRequest, ChatResponse, Result},
};
use axum::{Json, extract::State};
use tracing::info;

/// Chat with the AI assistant
///
/// Requests without a `session_id` continue the configured default session.
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let session_id = payload
        .session_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| state.config.memory.default_session_id.clone());

    info!(session_id = %session_id, "Chat request");
    let response = state.assistant.chat(&session_id, &payload.query).await?;

    Ok(Json(ChatResponse {
        response,
        session_id,
    }))
}

/// Liveness probe
pub async fn health() -> &'static str {
    "ok"
}
