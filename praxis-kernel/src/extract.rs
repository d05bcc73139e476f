//! Structured-call extraction from raw model responses.

use praxis_types::Args;

/// Extract an embedded capability request from a model response.
///
/// Scans the span between the first `{` and the last `}` and parses it as
/// a JSON object with an `action` or `tool` key naming the capability and
/// an `args` or `input` object carrying the arguments. Anything else —
/// no braces, malformed JSON, a non-object payload, a missing or
/// non-string action — means no call.
#[must_use]
pub fn extract_capability_call(response: &str) -> Option<(String, Args)> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    if end < start {
        return None;
    }

    let payload: serde_json::Value = serde_json::from_str(&response[start..=end]).ok()?;
    let object = payload.as_object()?;

    let action = object
        .get("action")
        .or_else(|| object.get("tool"))
        .and_then(|value| value.as_str())?;
    if action.is_empty() {
        return None;
    }

    let args = object
        .get("args")
        .or_else(|| object.get("input"))
        .and_then(|value| value.as_object())
        .cloned()
        .unwrap_or_default();

    Some((action.to_string(), args))
}
