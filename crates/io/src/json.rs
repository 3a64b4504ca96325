// JSON export/import
//
// The on-disk form is the same array-of-objects shape the model returns, so
// a saved table can be re-fed to the reconciler (or the `edit`/`export` CLI
// commands) without a separate schema.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tabforge_core::{HeaderSchema, Row, Table};

/// Export the table as a pretty-printed JSON array of row objects. Zone rows
/// serialize as `{"zone": <label>}`.
pub fn export(table: &Table, path: &Path) -> Result<(), String> {
    let file = File::create(path).map_err(|e| e.to_string())?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, &table.to_value()).map_err(|e| e.to_string())?;
    Ok(())
}

/// Load a saved table. The file must hold a JSON array of row objects.
pub fn import(path: &Path, schema: HeaderSchema) -> Result<Table, String> {
    let content = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    let value: serde_json::Value = serde_json::from_str(&content).map_err(|e| e.to_string())?;

    let items = value
        .as_array()
        .ok_or_else(|| "expected a JSON array of row objects".to_string())?;

    let rows: Vec<Row> = items
        .iter()
        .map(|item| Row::from_value(item).map_err(|e| e.to_string()))
        .collect::<Result<_, _>>()?;

    Ok(Table::new(rows, schema))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    use serde_json::json;

    #[test]
    fn test_json_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("table.json");

        let rows = vec![
            Row::from_value(&json!({"zone": "ZONE 1"})).unwrap(),
            Row::from_value(&json!({"Activity": "Pour", "Qty": 3})).unwrap(),
        ];
        let table = Table::new(rows, HeaderSchema::Observed);

        export(&table, &path).unwrap();
        let loaded = import(&path, HeaderSchema::Observed).unwrap();

        assert_eq!(loaded, table);
    }

    #[test]
    fn test_import_rejects_non_array() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{\"not\": \"an array\"}").unwrap();

        let err = import(&path, HeaderSchema::Observed).unwrap_err();
        assert!(err.contains("array"));
    }

    #[test]
    fn test_import_applies_fixed_schema() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("table.json");
        std::fs::write(&path, r#"[{"B": "kept", "X": "dropped"}]"#).unwrap();

        let schema = HeaderSchema::Fixed(vec!["A".into(), "B".into()]);
        let table = import(&path, schema).unwrap();
        assert_eq!(table.rows()[0].to_value(), json!({"A": "", "B": "kept"}));
    }
}
