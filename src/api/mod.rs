//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer for Recall, built on the Axum web framework.
//!
//! # API Endpoints
//!
//! - `POST /chat` - Send a query, receive the assistant's reply
//! - `GET /health` - Liveness probe (`ok`)
//! - `GET /messages` - Messages of the default session
//! - `GET /messages/{session_id}` - Messages of a session
//! - `DELETE /messages/{session_id}` - Clear a session (its summary stays cached)
//! - `GET /summaries/{session_id}` - Last known summary of a session

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;
