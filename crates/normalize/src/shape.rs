//! Validate that a recovered JSON value is row-shaped.

use serde_json::Value;
use tabforge_core::Row;

use crate::error::NormalizeError;

/// Convert a normalized value into rows: an array of objects becomes one row
/// per element, a single object becomes a one-row table. Anything else is a
/// shape failure.
pub fn rows_from_value(value: &Value) -> Result<Vec<Row>, NormalizeError> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| Row::from_value(item).map_err(|e| NormalizeError::Shape(e.to_string())))
            .collect(),
        Value::Object(_) => {
            let row = Row::from_value(value).map_err(|e| NormalizeError::Shape(e.to_string()))?;
            Ok(vec![row])
        }
        other => Err(NormalizeError::Shape(format!(
            "expected an array of objects, found {}",
            kind(other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_of_objects() {
        let rows = rows_from_value(&json!([{"zone": "Z"}, {"A": "1"}])).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_zone());
        assert_eq!(rows[1].get("A"), Some(&json!("1")));
    }

    #[test]
    fn test_single_object_becomes_one_row() {
        let rows = rows_from_value(&json!({"A": "1"})).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_scalar_is_shape_failure() {
        assert!(matches!(
            rows_from_value(&json!("just a string")).unwrap_err(),
            NormalizeError::Shape(_)
        ));
    }

    #[test]
    fn test_array_with_non_object_element() {
        let err = rows_from_value(&json!([{"A": 1}, 42])).unwrap_err();
        assert!(matches!(err, NormalizeError::Shape(_)));
    }

    #[test]
    fn test_empty_array_is_zero_rows() {
        assert!(rows_from_value(&json!([])).unwrap().is_empty());
    }
}
