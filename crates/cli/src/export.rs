//! Output selection shared by `parse`, `create`, and `export`.

use std::io::Write;
use std::path::Path;

use clap::ValueEnum;

use tabforge_core::{HeaderSchema, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Csv,
    Json,
    Xlsx,
}

/// Table in display form: section-local serials applied when requested.
pub fn display_table(table: &Table, serials: bool) -> Table {
    if serials {
        Table::new(table.numbered_rows(), table.schema().clone())
    } else {
        table.clone()
    }
}

/// Write the table in `format`. CSV and JSON go to stdout when no output
/// path is given; XLSX always needs a path and carries the configured title
/// as a band above the headers.
pub fn write_table(
    table: &Table,
    format: Format,
    output: Option<&Path>,
    title: Option<&str>,
) -> Result<(), String> {
    match (format, output) {
        (Format::Csv, Some(path)) => tabforge_io::csv::export(table, path),
        (Format::Csv, None) => tabforge_io::csv::write_csv(table, std::io::stdout().lock()),
        (Format::Json, Some(path)) => tabforge_io::json::export(table, path),
        (Format::Json, None) => {
            let text = serde_json::to_string_pretty(&table.to_value())
                .map_err(|e| e.to_string())?;
            let mut out = std::io::stdout().lock();
            writeln!(out, "{text}").map_err(|e| e.to_string())
        }
        (Format::Xlsx, Some(path)) => tabforge_io::xlsx::export(table, title, path),
        (Format::Xlsx, None) => Err("xlsx output requires --output".to_string()),
    }
}

/// Schema selection: an explicit --fixed-headers list wins over settings.
pub fn schema_from(flag: &[String], configured: Option<Vec<String>>) -> HeaderSchema {
    if !flag.is_empty() {
        HeaderSchema::Fixed(flag.to_vec())
    } else {
        HeaderSchema::from_fixed(configured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tabforge_core::Row;

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
    fn test_display_table_serials() {
        let table = table_from(json!([
            {"zone": "A"},
            {"SN": "", "Task": "x"},
        ]));
        let display = display_table(&table, true);
        assert_eq!(display.rows()[1].get("SN"), Some(&json!(1)));

        // Without the flag the table passes through untouched.
        assert_eq!(display_table(&table, false), table);
    }

    #[test]
    fn test_schema_flag_wins() {
        let schema = schema_from(
            &["A".to_string()],
            Some(vec!["B".to_string()]),
        );
        assert_eq!(schema, HeaderSchema::Fixed(vec!["A".to_string()]));
    }

    #[test]
    fn test_schema_falls_back_to_settings() {
        let schema = schema_from(&[], Some(vec!["B".to_string()]));
        assert_eq!(schema, HeaderSchema::Fixed(vec!["B".to_string()]));
        assert_eq!(schema_from(&[], None), HeaderSchema::Observed);
    }

    #[test]
    fn test_xlsx_requires_output_path() {
        let table = table_from(json!([{"A": "1"}]));
        assert!(write_table(&table, Format::Xlsx, None, Some("Action Plan")).is_err());
    }
}
