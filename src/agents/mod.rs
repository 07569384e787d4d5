pub mod assistant;

// Re-export commonly used types
pub use assistant::{Assistant, DEFAULT_SYSTEM_PROMPT};
