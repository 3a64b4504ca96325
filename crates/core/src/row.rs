//! Row variants: ordinary data rows and zone (section heading) pseudo-rows.
//!
//! The zone discriminator lives here and nowhere else. Header derivation,
//! serial numbering, cell editing, and every exporter go through
//! `Row::is_zone` / `Row::from_value` rather than re-checking keys.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::TableError;

/// The key whose presence marks a row as a section heading.
pub const ZONE_KEY: &str = "zone";

/// Ordered field map for a data row. Requires serde_json's `preserve_order`
/// feature: the serial counter targets the *first* key, so insertion order
/// is load-bearing.
pub type RowMap = serde_json::Map<String, Value>;

/// A single table row as received from the model or edited by the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    /// Regular data row: header name → scalar value.
    Data(RowMap),
    /// Section heading carrying only its label. Rendered as a merged,
    /// bold band and excluded from header derivation.
    Zone(String),
}

impl Row {
    /// Build a row from a parsed JSON value. A `zone` key makes the row a
    /// heading; any other keys on such an object are dropped, preserving the
    /// invariant that a zone row carries only its label.
    pub fn from_value(value: &Value) -> Result<Row, TableError> {
        let obj = value
            .as_object()
            .ok_or_else(|| TableError::NotAnObject(value_kind(value).to_string()))?;

        match obj.get(ZONE_KEY) {
            Some(label) => Ok(Row::Zone(label_text(label))),
            None => Ok(Row::Data(obj.clone())),
        }
    }

    /// Convert back to the JSON object form used on the wire and in exports.
    pub fn to_value(&self) -> Value {
        match self {
            Row::Data(map) => Value::Object(map.clone()),
            Row::Zone(label) => {
                let mut map = RowMap::new();
                map.insert(ZONE_KEY.to_string(), Value::String(label.clone()));
                Value::Object(map)
            }
        }
    }

    /// The one zone predicate.
    pub fn is_zone(&self) -> bool {
        matches!(self, Row::Zone(_))
    }

    /// Heading label, if this is a zone row.
    pub fn zone_label(&self) -> Option<&str> {
        match self {
            Row::Zone(label) => Some(label),
            Row::Data(_) => None,
        }
    }

    /// Field map, if this is a data row.
    pub fn data(&self) -> Option<&RowMap> {
        match self {
            Row::Data(map) => Some(map),
            Row::Zone(_) => None,
        }
    }

    /// First key of a data row (serial numbering target).
    pub fn first_key(&self) -> Option<&str> {
        self.data().and_then(|map| map.keys().next().map(String::as_str))
    }

    /// Value under `header`, for data rows.
    pub fn get(&self, header: &str) -> Option<&Value> {
        self.data().and_then(|map| map.get(header))
    }

    /// Blank data row with an empty string under each header, in order.
    pub fn blank(headers: &[String]) -> Row {
        let mut map = RowMap::new();
        for header in headers {
            map.insert(header.clone(), Value::String(String::new()));
        }
        Row::Data(map)
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Row::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// Display text for a cell value: strings verbatim, numbers via Display,
/// null/missing as empty.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Zone labels are usually strings, but the model occasionally numbers them.
fn label_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => cell_text(other),
    }
}

fn value_kind(value: &Value) -> &'static str {
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
    fn test_zone_row_from_value() {
        let row = Row::from_value(&json!({"zone": "ZONE 1 CIVIL WORKS"})).unwrap();
        assert!(row.is_zone());
        assert_eq!(row.zone_label(), Some("ZONE 1 CIVIL WORKS"));
    }

    #[test]
    fn test_zone_row_drops_extra_keys() {
        // Zone rows carry only their label, even when the model leaks
        // residual cells onto the heading row.
        let row = Row::from_value(&json!({"zone": "ZONE 2", "Activity": "x"})).unwrap();
        assert_eq!(row.to_value(), json!({"zone": "ZONE 2"}));
    }

    #[test]
    fn test_data_row_preserves_key_order() {
        let row = Row::from_value(&json!({"SN": "1", "Activity": "Dig", "Status": "Open"})).unwrap();
        assert_eq!(row.first_key(), Some("SN"));
        let keys: Vec<&String> = row.data().unwrap().keys().collect();
        assert_eq!(keys, ["SN", "Activity", "Status"]);
    }

    #[test]
    fn test_non_object_rejected() {
        let err = Row::from_value(&json!(["not", "a", "row"])).unwrap_err();
        assert!(matches!(err, TableError::NotAnObject(_)));
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_blank_row_shape() {
        let headers = vec!["A".to_string(), "B".to_string()];
        let row = Row::blank(&headers);
        assert_eq!(row.to_value(), json!({"A": "", "B": ""}));
    }

    #[test]
    fn test_serde_roundtrip() {
        let rows: Vec<Row> = serde_json::from_str(
            r#"[{"zone": "Z"}, {"Activity": "Pour", "Qty": 3}]"#,
        )
        .unwrap();
        assert!(rows[0].is_zone());
        assert_eq!(rows[1].get("Qty"), Some(&json!(3)));

        let text = serde_json::to_string(&rows).unwrap();
        let back: Vec<Row> = serde_json::from_str(&text).unwrap();
        assert_eq!(rows, back);
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&json!("abc")), "abc");
        assert_eq!(cell_text(&json!(42)), "42");
        assert_eq!(cell_text(&Value::Null), "");
    }
}
