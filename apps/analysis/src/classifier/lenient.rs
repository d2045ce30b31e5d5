//! Lenient "JSON somewhere in text" parsing.
//!
//! Model responses are untrusted: JSON may be wrapped in prose or markdown
//! fences, or missing entirely. This module extracts the first balanced
//! `{...}` span via bracket scanning and parses that, keeping the tolerance
//! out of the extractor code.

use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LenientJsonError {
    #[error("no balanced JSON object found in response")]
    NoJsonObject,

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parses the first balanced `{...}` span in `text` into `T`.
pub fn parse_lenient<T: DeserializeOwned>(text: &str) -> Result<T, LenientJsonError> {
    let span = extract_json_object(text).ok_or(LenientJsonError::NoJsonObject)?;
    Ok(serde_json::from_str(span)?)
}

/// Returns the first balanced `{...}` span, or `None` if braces never
/// balance. Brace counting is string- and escape-aware so braces inside
/// JSON strings don't confuse the scan.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let text = strip_json_fences(text);
    let start = text.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, b) in text.bytes().enumerate().skip(start) {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_extracts_bare_object() {
        assert_eq!(
            extract_json_object(r#"{"a": 1}"#),
            Some(r#"{"a": 1}"#)
        );
    }

    #[test]
    fn test_extracts_object_wrapped_in_prose() {
        let text = r#"Here are the skills you asked for: {"soft": ["Leadership"]} — hope that helps!"#;
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"soft": ["Leadership"]}"#)
        );
    }

    #[test]
    fn test_extracts_nested_object() {
        let text = r#"{"outer": {"inner": [1, 2]}} trailing"#;
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"outer": {"inner": [1, 2]}}"#)
        );
    }

    #[test]
    fn test_braces_inside_strings_ignored() {
        let text = r#"{"note": "uses { and } freely", "n": 1}"#;
        assert_eq!(extract_json_object(text), Some(text));
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let text = r#"{"quote": "she said \"hi\" {"}"#;
        assert_eq!(extract_json_object(text), Some(text));
    }

    #[test]
    fn test_truncated_object_returns_none() {
        assert_eq!(extract_json_object(r#"{"a": [1, 2"#), None);
    }

    #[test]
    fn test_no_object_returns_none() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object(""), None);
    }

    #[test]
    fn test_fenced_json_block() {
        let text = "```json\n{\"a\": 1}\n```";
        assert_eq!(extract_json_object(text), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_fence_without_language_tag() {
        let text = "```\n{\"a\": 1}\n```";
        assert_eq!(extract_json_object(text), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_parse_lenient_into_value() {
        let v: Value = parse_lenient("result: {\"ok\": true}").unwrap();
        assert_eq!(v["ok"], Value::Bool(true));
    }

    #[test]
    fn test_parse_lenient_no_object_is_error() {
        let err = parse_lenient::<Value>("nothing structured").unwrap_err();
        assert!(matches!(err, LenientJsonError::NoJsonObject));
    }

    #[test]
    fn test_parse_lenient_malformed_is_parse_error() {
        // Balanced braces but invalid JSON inside.
        let err = parse_lenient::<Value>("{bad json}").unwrap_err();
        assert!(matches!(err, LenientJsonError::Parse(_)));
    }

    #[test]
    fn test_first_balanced_block_wins() {
        let text = r#"{"first": 1} {"second": 2}"#;
        assert_eq!(extract_json_object(text), Some(r#"{"first": 1}"#));
    }
}
