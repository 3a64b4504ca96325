//! Locate and decode the JSON span inside a raw model reply.

use regex::Regex;
use serde_json::Value;

use crate::error::NormalizeError;

/// Recover a JSON value from raw reply text.
///
/// Search order:
/// 1. A fenced block explicitly tagged `json` — its inner content wins even
///    when a bare literal also appears in the prose (the model sometimes
///    echoes an example array outside the fence).
/// 2. The first top-level `[...]` or `{...}` literal. The match spans
///    newlines; it is not line-bound.
///
/// A span that is located but fails to parse is `Malformed`, which is a
/// different condition from finding nothing at all.
pub fn normalize(text: &str) -> Result<Value, NormalizeError> {
    let fenced = Regex::new(r"(?s)```json\s*(.*?)\s*```").unwrap();
    let literal = Regex::new(r"(?s)\[.*\]|\{.*\}").unwrap();

    let candidate = if let Some(caps) = fenced.captures(text) {
        caps.get(1).map(|m| m.as_str()).unwrap_or_default()
    } else if let Some(m) = literal.find(text) {
        m.as_str()
    } else {
        return Err(NormalizeError::NoStructuredData);
    };

    serde_json::from_str(candidate).map_err(|e| NormalizeError::Malformed(e.to_string()))
}

/// Normalize a value that may already be structured: arrays and objects pass
/// through unchanged, strings go through span extraction, anything else is
/// an unsupported input shape.
pub fn normalize_value(value: &Value) -> Result<Value, NormalizeError> {
    match value {
        Value::String(text) => normalize(text),
        Value::Array(_) | Value::Object(_) => Ok(value.clone()),
        Value::Null => Err(NormalizeError::UnsupportedShape("null".to_string())),
        Value::Bool(_) => Err(NormalizeError::UnsupportedShape("a boolean".to_string())),
        Value::Number(_) => Err(NormalizeError::UnsupportedShape("a number".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_array_equals_direct_parse() {
        let text = r#"[{"Activity": "Dig"}, {"Activity": "Pour"}]"#;
        assert_eq!(normalize(text).unwrap(), serde_json::from_str::<Value>(text).unwrap());
    }

    #[test]
    fn test_fenced_block_with_trailing_prose() {
        let text = "```json\n[{\"Activity\":\"Dig\",\"Execution_start\":\"2024-08-20\"}]\n```\nLet me know if you need anything else.";
        assert_eq!(
            normalize(text).unwrap(),
            json!([{"Activity": "Dig", "Execution_start": "2024-08-20"}])
        );
    }

    #[test]
    fn test_fence_preferred_over_bare_literal() {
        // The prose echoes a different array outside the fence; the fenced
        // content must win.
        let text = "Example: [{\"Wrong\": 1}]\n```json\n[{\"Right\": 1}]\n```";
        assert_eq!(normalize(text).unwrap(), json!([{"Right": 1}]));
    }

    #[test]
    fn test_prose_wrapped_literal() {
        let text = r#"Here is your data: [{"zone":"ZONE 1"},{"Activity":"Pour"}]"#;
        assert_eq!(
            normalize(text).unwrap(),
            json!([{"zone": "ZONE 1"}, {"Activity": "Pour"}])
        );
    }

    #[test]
    fn test_multiline_literal() {
        let text = "Result:\n[\n  {\"A\": 1},\n  {\"A\": 2}\n]\nDone.";
        assert_eq!(normalize(text).unwrap(), json!([{"A": 1}, {"A": 2}]));
    }

    #[test]
    fn test_single_object_literal() {
        let text = "The row is {\"Activity\": \"Dig\"} as requested.";
        assert_eq!(normalize(text).unwrap(), json!({"Activity": "Dig"}));
    }

    #[test]
    fn test_no_brackets_is_no_structured_data() {
        let err = normalize("Sorry, I could not extract a table from this file.").unwrap_err();
        assert_eq!(err, NormalizeError::NoStructuredData);
    }

    #[test]
    fn test_invalid_span_is_malformed() {
        let err = normalize("[{\"Activity\": }]").unwrap_err();
        assert!(matches!(err, NormalizeError::Malformed(_)));
    }

    #[test]
    fn test_malformed_fence_does_not_fall_back() {
        // A tagged fence is authoritative; broken JSON inside it is an
        // error even if valid JSON exists elsewhere in the reply.
        let text = "```json\n[{]\n```\n[{\"A\": 1}]";
        assert!(matches!(normalize(text).unwrap_err(), NormalizeError::Malformed(_)));
    }

    #[test]
    fn test_structured_values_pass_through() {
        let arr = json!([{"A": 1}]);
        assert_eq!(normalize_value(&arr).unwrap(), arr);

        let obj = json!({"A": 1});
        assert_eq!(normalize_value(&obj).unwrap(), obj);
    }

    #[test]
    fn test_unsupported_input_shape() {
        assert!(matches!(
            normalize_value(&json!(42)).unwrap_err(),
            NormalizeError::UnsupportedShape(_)
        ));
        assert!(matches!(
            normalize_value(&Value::Null).unwrap_err(),
            NormalizeError::UnsupportedShape(_)
        ));
    }

    #[test]
    fn test_string_input_goes_through_extraction() {
        let value = Value::String("noise [{\"A\": 1}] noise".to_string());
        assert_eq!(normalize_value(&value).unwrap(), json!([{"A": 1}]));
    }
}
