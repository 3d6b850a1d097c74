//! Extracts the user-visible text from a chat backend reply.
//!
//! Reasoning models wrap their chain of thought in `<think>...</think>`;
//! only what follows the closing delimiter is meant for the user.

use serde_json::Value;

const THINK_END: &str = "</think>";

/// Accepts the raw reply body. A `{"data": {"result": "..."}}` envelope is
/// unwrapped; anything else is returned unchanged.
pub fn extract_reply_text(raw: &str) -> String {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => envelope_result(&value)
            .map(strip_reasoning)
            .unwrap_or_else(|| raw.to_string()),
        Err(_) => raw.to_string(),
    }
}

/// Same as [`extract_reply_text`] for an already decoded reply.
pub fn extract_reply_from_value(value: &Value) -> String {
    if let Some(result) = envelope_result(value) {
        return strip_reasoning(result);
    }
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn envelope_result(value: &Value) -> Option<&str> {
    value.get("data")?.get("result")?.as_str()
}

/// Text after the first `</think>` (any case), trimmed. Later reasoning
/// blocks are left in place.
pub fn strip_reasoning(text: &str) -> String {
    // ASCII lowercasing keeps byte offsets aligned with `text`
    let lowered = text.to_ascii_lowercase();
    match lowered.find(THINK_END) {
        Some(pos) => text[pos + THINK_END.len()..].trim().to_string(),
        None => text.trim().to_string(),
    }
}
