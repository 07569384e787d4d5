use crate::AppState;
use crate::api::handlers::{chat, messages};
use axum::{
    Router,
    routing::{get, post},
};

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat::chat))
        .route("/health", get(chat::health))
        .route("/messages", get(messages::default_session_messages))
        .route(
            "/messages/{session_id}",
            get(messages::get_messages).delete(messages::delete_messages),
        )
        .route("/summaries/{session_id}", get(messages::get_summary))
}
