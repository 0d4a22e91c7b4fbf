use std::io::Write;

use serde_json::Value;

use super::Action;
use crate::bot::WebhookInfo;
use crate::error::WebhookError;

pub(super) fn render_info_lines(info: &WebhookInfo) -> Vec<String> {
    info.iter()
        .map(|(key, value)| format!("{key}: {}", display_value(value)))
        .collect()
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Writes the failure report. Output errors are ignored: there is nowhere left to
/// report them.
pub(super) fn write_failure(err: &mut dyn Write, action: Action, error: &WebhookError) {
    let _ = writeln!(err, "Failed to {} Telegram webhook", action.verb());

    if let Some(status) = error.status() {
        let _ = writeln!(err, "status: {status}");
    }

    match error.body() {
        Some(body) => {
            let _ = writeln!(err, "data: {}", pretty_body(body));
        }
        None => {
            let _ = writeln!(err, "{error}");
            if let WebhookError::ApiFailure {
                description: Some(description),
                ..
            } = error
            {
                let _ = writeln!(err, "description: {description}");
            }
        }
    }
}

fn pretty_body(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| body.to_string())
}
