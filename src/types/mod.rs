use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============= API Request/Response Types =============

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
}

/// Cached summary for a session, as exposed by `GET /summaries/{session_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub session_id: String,
    pub summary: String,
    pub updated_at: DateTime<Utc>,
}

// ============= Message Types =============

/// Who produced a message. The set is closed: every rule that depends on the
/// role matches on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    System,
    User,
    Assistant,
    ToolCall,
    ToolResult,
}

impl MessageRole {
    /// Role name as understood by chat-completion APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::ToolCall => "tool_call",
            MessageRole::ToolResult => "tool",
        }
    }
}

/// A single conversational entry.
///
/// Messages are immutable once built; use the per-role constructors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: MessageRole,
    text: String,
    #[serde(default)]
    has_pending_tool_call: bool,
}

impl Message {
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(MessageRole::System, text, false)
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(MessageRole::User, text, false)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, text, false)
    }

    /// Assistant reply that asks the caller to execute a tool before the turn
    /// can continue.
    pub fn assistant_with_tool_call(text: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, text, true)
    }

    pub fn tool_call(text: impl Into<String>) -> Self {
        Self::new(MessageRole::ToolCall, text, false)
    }

    pub fn tool_result(text: impl Into<String>) -> Self {
        Self::new(MessageRole::ToolResult, text, false)
    }

    fn new(role: MessageRole, text: impl Into<String>, has_pending_tool_call: bool) -> Self {
        Self {
            role,
            text: text.into(),
            has_pending_tool_call,
        }
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn has_pending_tool_call(&self) -> bool {
        self.has_pending_tool_call
    }

    pub fn is_system(&self) -> bool {
        self.role == MessageRole::System
    }
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("LLM error: {0}")]
    LLM(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::LLM(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Timeout(msg) => (axum::http::StatusCode::GATEWAY_TIMEOUT, msg),
            AppError::NotFound(msg) => (axum::http::StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (axum::http::StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
