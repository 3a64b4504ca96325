// XLSX export
//
// Zone rows render the way the PDF/Excel exports of the original tool did:
// a band merged across the full header width, bold on a light gray fill.

use std::path::Path;

use rust_xlsxwriter::{Color, Format, Workbook};

use tabforge_core::{cell_text, Row, Table};

/// Fill used for zone bands (the original's RGB 230,230,230).
const ZONE_FILL: Color = Color::RGB(0xE6E6E6);

const SHEET_NAME: &str = "Data";

pub fn export(table: &Table, title: Option<&str>, path: &Path) -> Result<(), String> {
    let headers = table.headers();

    let mut workbook = Workbook::new();
    let worksheet = workbook
        .add_worksheet()
        .set_name(SHEET_NAME)
        .map_err(|e| e.to_string())?;

    let header_format = Format::new().set_bold();
    let zone_format = Format::new().set_bold().set_background_color(ZONE_FILL);

    // Optional title band across the full header width, above the headers.
    let mut header_row: u32 = 0;
    if let Some(title) = title {
        if headers.len() > 1 {
            worksheet
                .merge_range(0, 0, 0, (headers.len() - 1) as u16, title, &header_format)
                .map_err(|e| e.to_string())?;
        } else {
            worksheet
                .write_string_with_format(0, 0, title, &header_format)
                .map_err(|e| e.to_string())?;
        }
        header_row = 1;
    }

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(header_row, col as u16, header, &header_format)
            .map_err(|e| e.to_string())?;
    }

    for (idx, row) in table.rows().iter().enumerate() {
        let out_row = header_row + 1 + idx as u32;
        match row {
            Row::Zone(label) => {
                // merge_range refuses a single-cell range, so a one-column
                // table writes the band without merging.
                if headers.len() > 1 {
                    worksheet
                        .merge_range(
                            out_row,
                            0,
                            out_row,
                            (headers.len() - 1) as u16,
                            label,
                            &zone_format,
                        )
                        .map_err(|e| e.to_string())?;
                } else {
                    worksheet
                        .write_string_with_format(out_row, 0, label, &zone_format)
                        .map_err(|e| e.to_string())?;
                }
            }
            Row::Data(_) => {
                for (col, header) in headers.iter().enumerate() {
                    let text = row.get(header).map(cell_text).unwrap_or_default();
                    if !text.is_empty() {
                        worksheet
                            .write_string(out_row, col as u16, &text)
                            .map_err(|e| e.to_string())?;
                    }
                }
            }
        }
    }

    workbook.save(path).map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    use calamine::{open_workbook, Reader, Xlsx};
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

    fn cell(range: &calamine::Range<calamine::Data>, row: u32, col: u32) -> String {
        range
            .get_value((row, col))
            .map(|v| v.to_string())
            .unwrap_or_default()
    }

    #[test]
    fn test_xlsx_export_readback() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.xlsx");

        let table = table_from(json!([
            {"zone": "ZONE 1 CIVIL WORKS"},
            {"Activity": "Dig", "Status": "Open"},
            {"Activity": "Pour", "Status": "Done"},
        ]));
        export(&table, None, &path).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook.worksheet_range("Data").unwrap();

        // Header band
        assert_eq!(cell(&range, 0, 0), "Activity");
        assert_eq!(cell(&range, 0, 1), "Status");

        // Zone band occupies the merged origin cell
        assert_eq!(cell(&range, 1, 0), "ZONE 1 CIVIL WORKS");

        // Data rows in header order
        assert_eq!(cell(&range, 2, 0), "Dig");
        assert_eq!(cell(&range, 2, 1), "Open");
        assert_eq!(cell(&range, 3, 0), "Pour");
        assert_eq!(cell(&range, 3, 1), "Done");
    }

    #[test]
    fn test_xlsx_export_single_column_zone() {
        // One observed header: the zone band must not attempt a merge.
        let dir = tempdir().unwrap();
        let path = dir.path().join("narrow.xlsx");

        let table = table_from(json!([
            {"zone": "Z"},
            {"Activity": "Pour"},
        ]));
        export(&table, None, &path).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook.worksheet_range("Data").unwrap();
        assert_eq!(cell(&range, 1, 0), "Z");
        assert_eq!(cell(&range, 2, 0), "Pour");
    }

    #[test]
    fn test_xlsx_export_title_band() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("titled.xlsx");

        let table = table_from(json!([
            {"Activity": "Dig", "Status": "Open"},
        ]));
        export(&table, Some("Action Plan"), &path).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook.worksheet_range("Data").unwrap();

        // Title occupies the merged origin cell; everything shifts down one.
        assert_eq!(cell(&range, 0, 0), "Action Plan");
        assert_eq!(cell(&range, 1, 0), "Activity");
        assert_eq!(cell(&range, 2, 0), "Dig");
    }

    #[test]
    fn test_xlsx_export_numbers_as_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nums.xlsx");

        let table = table_from(json!([{"SN": 1, "Qty": 2.5}]));
        export(&table, None, &path).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook.worksheet_range("Data").unwrap();
        assert_eq!(cell(&range, 1, 0), "1");
        assert_eq!(cell(&range, 1, 1), "2.5");
    }
}
