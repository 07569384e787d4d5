//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by functionality.

/// Chat and health handlers.
pub mod chat;
/// Session message and summary inspection handlers.
pub mod messages;
