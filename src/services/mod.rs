pub mod generation;
pub mod vision;

pub use generation::{GenerationClient, GenerationResult};
pub use vision::{AnalysisResult, VisionClient};

use serde_json::Value;

const ERROR_BODY_LIMIT: usize = 2000;

fn truncate_for_log(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    let truncated: String = value.chars().take(limit).collect();
    format!("{truncated}... (truncated)")
}

/// Pulls a human-readable message out of an upstream error body, preferring
/// the conventional `error.message` / `message` JSON fields over raw text.
fn summarize_error_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        let message = value
            .pointer("/error/message")
            .and_then(|v| v.as_str())
            .or_else(|| value.get("message").and_then(|v| v.as_str()));
        if let Some(message) = message {
            return message.to_string();
        }
        return truncate_for_log(&value.to_string(), ERROR_BODY_LIMIT);
    }

    truncate_for_log(trimmed, ERROR_BODY_LIMIT)
}
