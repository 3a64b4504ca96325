// CSV export

use std::io::Write;
use std::path::Path;

use tabforge_core::{cell_text, Row, Table};

/// Export the table as CSV: one header record, then data rows in header
/// order with missing keys left empty. Zone rows become a single-field
/// record holding just the label, hence the flexible writer.
pub fn export(table: &Table, path: &Path) -> Result<(), String> {
    let file = std::fs::File::create(path).map_err(|e| e.to_string())?;
    write_csv(table, file)
}

pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<(), String> {
    let headers = table.headers();

    let mut out = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);

    out.write_record(&headers).map_err(|e| e.to_string())?;

    for row in table.rows() {
        match row {
            Row::Zone(label) => {
                out.write_record([label.as_str()]).map_err(|e| e.to_string())?;
            }
            Row::Data(_) => {
                let record: Vec<String> = headers
                    .iter()
                    .map(|header| row.get(header).map(cell_text).unwrap_or_default())
                    .collect();
                out.write_record(&record).map_err(|e| e.to_string())?;
            }
        }
    }

    out.flush().map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    use serde_json::json;
    use tabforge_core::HeaderSchema;

    fn table_from(value: serde_json::Value) -> Table {
        let rows = value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| Row::from_value(v).unwrap())
            .collect();
        Table::new(rows, HeaderSchema::Observed)
    }

    #[test]
    fn test_csv_export_header_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let table = table_from(json!([
            {"Activity": "Dig", "Status": "Open"},
            {"Status": "Done", "Activity": "Pour"},
        ]));
        export(&table, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

        assert_eq!(records[0], csv::StringRecord::from(vec!["Activity", "Status"]));
        assert_eq!(records[1], csv::StringRecord::from(vec!["Dig", "Open"]));
        // Values land under their header regardless of source key order
        assert_eq!(records[2], csv::StringRecord::from(vec!["Pour", "Done"]));
    }

    #[test]
    fn test_csv_export_zone_row_single_field() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("zones.csv");

        let table = table_from(json!([
            {"zone": "ZONE 1 CIVIL WORKS"},
            {"Activity": "Pour"},
        ]));
        export(&table, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

        // Header excludes zone; the zone row is a lone label record
        assert_eq!(records[0], csv::StringRecord::from(vec!["Activity"]));
        assert_eq!(records[1], csv::StringRecord::from(vec!["ZONE 1 CIVIL WORKS"]));
        assert_eq!(records[2], csv::StringRecord::from(vec!["Pour"]));
    }

    #[test]
    fn test_csv_export_missing_keys_empty() {
        let mut buffer = Vec::new();
        let table = table_from(json!([
            {"A": "1", "B": "2"},
            {"A": "3"},
        ]));
        write_csv(&table, &mut buffer).unwrap();

        let content = String::from_utf8(buffer).unwrap();
        assert!(content.contains("3,\n") || content.contains("3,\r\n"));
    }
}
