//! Summary block encoding inside System messages.
//!
//! A compressed conversation is stored as a single System message whose text
//! carries a summary block:
//!
//! ```text
//! <optional prefix, e.g. the assistant's instructions>
//!
//! Context: The following is a summary of the previous conversation:
//! <summary payload>
//! ```
//!
//! Everything that knows about the marker lives here.

/// Literal that introduces a summary block.
pub const MARKER: &str = "Context: The following is a summary of the previous conversation:";

/// Returns true if `text` carries a summary block, even a malformed one.
pub fn contains_marker(text: &str) -> bool {
    text.contains(MARKER)
}

/// Extracts the summary payload from a System message's text.
///
/// Only the first marker is authoritative. A marker followed by nothing but
/// whitespace is treated as carrying no payload.
pub fn extract_summary(text: &str) -> Option<String> {
    let start = text.find(MARKER)? + MARKER.len();
    let payload = text[start..].trim();
    if payload.is_empty() {
        None
    } else {
        Some(payload.to_string())
    }
}

/// Removes every marker from a summary payload and trims it.
///
/// Returns `None` when nothing is left. A payload must never carry the marker
/// itself, or the rendered block would hold it twice.
pub fn clean_summary(summary: &str) -> Option<String> {
    let cleaned = summary.replace(MARKER, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Renders a System message text that carries `new_summary`.
///
/// The previous payload, if any, is dropped: summaries are overwritten, never
/// accumulated. Text that precedes the marker in `existing` is kept, followed
/// by a single blank line. Markers inside `new_summary` are removed.
pub fn merge_summary(existing: Option<&str>, new_summary: &str) -> String {
    let block = format!("{}\n{}", MARKER, new_summary.replace(MARKER, "").trim());

    let prefix = match existing {
        None => return block,
        Some(text) => match text.find(MARKER) {
            Some(idx) => &text[..idx],
            None => text,
        },
    };

    let prefix = prefix.trim_end();
    if prefix.is_empty() {
        block
    } else {
        format!("{}\n\n{}", prefix, block)
    }
}
