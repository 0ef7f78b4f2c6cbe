//! Tolerant JSON extraction from oracle response text.
//!
//! Models wrap JSON in markdown fences, prepend prose, or trail commentary.
//! [`extract_json`] tries progressively looser strategies and gives up with
//! `None` rather than erroring — the caller decides what the fallback is.

use serde_json::Value;

/// Extract the first JSON value from free-form oracle output.
///
/// Strategies, in order:
/// 1. parse the whole trimmed text;
/// 2. parse the contents of the first ``` fence (with or without a `json` tag);
/// 3. parse the widest substring from the first `{`/`[` to the last `}`/`]`.
#[must_use]
pub fn extract_json(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Some(value);
    }

    if let Some(fenced) = fenced_block(trimmed) {
        if let Ok(value) = serde_json::from_str::<Value>(fenced.trim()) {
            return Some(value);
        }
    }

    widest_bracketed(trimmed).and_then(|candidate| serde_json::from_str::<Value>(candidate).ok())
}

/// The body of the first ``` fence, if any.
fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after_fence = &text[start + 3..];
    // Skip an optional language tag on the opening fence line.
    let body_start = after_fence.find('\n').map_or(0, |idx| idx + 1);
    let body = &after_fence[body_start..];
    let end = body.find("```")?;
    Some(&body[..end])
}

/// Widest substring spanning the outermost JSON brackets.
fn widest_bracketed(text: &str) -> Option<&str> {
    let open = text.find(['{', '['])?;
    let close = text.rfind(['}', ']'])?;
    if close <= open {
        return None;
    }
    Some(&text[open..=close])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_json_parses() {
        let value = extract_json(r#"{"a": 1}"#).unwrap();
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn fenced_json_parses() {
        let text = "Here you go:\n```json\n{\"scores\": [1, 2]}\n```\nLet me know!";
        let value = extract_json(text).unwrap();
        assert_eq!(value["scores"][1], 2);
    }

    #[test]
    fn untagged_fence_parses() {
        let text = "```\n[1, 2, 3]\n```";
        let value = extract_json(text).unwrap();
        assert_eq!(value[2], 3);
    }

    #[test]
    fn embedded_object_parses() {
        let text = "The result is {\"ok\": true} as requested.";
        let value = extract_json(text).unwrap();
        assert_eq!(value["ok"], true);
    }

    #[test]
    fn prose_returns_none() {
        assert!(extract_json("I could not produce a result.").is_none());
        assert!(extract_json("").is_none());
    }

    #[test]
    fn mismatched_brackets_return_none() {
        assert!(extract_json("} not json {").is_none());
    }
}
