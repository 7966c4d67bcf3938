//! Decode `.xlsx` and `.csv` bytes into a [`Workbook`]

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use super::{CSV_SHEET_NAME, Sheet, Workbook, WorkbookFormat};
use crate::error::ParseFailure;
use crate::model::{CellValue, Row};

/// Decode `bytes` in the given format
pub fn parse_workbook(bytes: &[u8], format: WorkbookFormat) -> Result<Workbook, ParseFailure> {
    match format {
        WorkbookFormat::Xlsx => parse_xlsx(bytes),
        WorkbookFormat::Csv => parse_csv(bytes),
    }
}

/// Read every sheet of an `.xlsx` file, in workbook order
pub fn parse_xlsx(bytes: &[u8]) -> Result<Workbook, ParseFailure> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| ParseFailure::new(format!("Not a readable .xlsx file: {}", e)))?;

    let mut sheets = Vec::new();

    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| ParseFailure::new(format!("Failed to read sheet '{}': {}", name, e)))?;

        let rows: Vec<Row> = range
            .rows()
            .map(|row| row.iter().map(cell_from_data).collect::<Row>())
            .filter(|row| !is_blank(row))
            .collect();

        log::debug!("Read sheet '{}' ({} rows)", name, rows.len());
        sheets.push(Sheet::new(name, rows));
    }

    Ok(Workbook { sheets })
}

/// Read a CSV file as a single sheet named [`CSV_SHEET_NAME`]
pub fn parse_csv(bytes: &[u8]) -> Result<Workbook, ParseFailure> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();

    for (idx, record) in reader.records().enumerate() {
        let record = record
            .map_err(|e| ParseFailure::new(format!("Invalid CSV at record {}: {}", idx + 1, e)))?;

        let row: Row = record.iter().map(CellValue::infer).collect();
        if !is_blank(&row) {
            rows.push(row);
        }
    }

    Ok(Workbook {
        sheets: vec![Sheet::new(CSV_SHEET_NAME, rows)],
    })
}

fn is_blank(row: &[CellValue]) -> bool {
    row.iter().all(CellValue::is_empty)
}

fn cell_from_data(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        // Spreadsheets store every number as a double
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 9.0e15 {
                CellValue::Int(*f as i64)
            } else {
                CellValue::Float(*f)
            }
        }
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("#{:?}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_single_sheet() {
        let csv = "Art,Antall,Lengde\nlaks,2,12.5\n,,\naure,1,\n";
        let workbook = parse_csv(csv.as_bytes()).unwrap();

        assert_eq!(workbook.sheet_names(), vec![CSV_SHEET_NAME]);
        let rows = &workbook.sheets[0].rows;
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec![
            CellValue::from("laks"),
            CellValue::Int(2),
            CellValue::Float(12.5)
        ]);
        assert_eq!(rows[2][2], CellValue::Empty);
    }

    #[test]
    fn test_parse_csv_strips_bom_and_allows_ragged_rows() {
        let csv = "\u{feff}Art\nlaks,2\n";
        let workbook = parse_csv(csv.as_bytes()).unwrap();

        let rows = &workbook.sheets[0].rows;
        assert_eq!(rows[0], vec![CellValue::from("Art")]);
        assert_eq!(rows[1].len(), 2);
    }

    #[test]
    fn test_parse_csv_rejects_invalid_utf8() {
        let err = parse_csv(b"Art\n\xff\xfe,1\n").unwrap_err();
        assert!(err.message.contains("Invalid CSV"));
    }

    #[test]
    fn test_parse_xlsx_rejects_garbage() {
        let err = parse_xlsx(b"definitely not a zip archive").unwrap_err();
        assert!(err.message.contains(".xlsx"));

        assert!(parse_workbook(b"", WorkbookFormat::Xlsx).is_err());
    }

    #[test]
    fn test_parse_xlsx_reads_all_sheets_in_order() {
        let mut book = rust_xlsxwriter::Workbook::new();
        {
            let sheet = book.add_worksheet();
            sheet.set_name("First").unwrap();
            sheet.write_string(0, 0, "Art").unwrap();
            sheet.write_number(1, 0, 3.0).unwrap();
            sheet.write_number(2, 0, 2.5).unwrap();
            sheet.write_boolean(3, 0, true).unwrap();
        }
        book.add_worksheet().set_name("Second").unwrap();
        let bytes = book.save_to_buffer().unwrap();

        let workbook = parse_xlsx(&bytes).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["First", "Second"]);

        let rows = &workbook.sheet("First").unwrap().rows;
        assert_eq!(rows[0], vec![CellValue::from("Art")]);
        assert_eq!(rows[1], vec![CellValue::Int(3)]);
        assert_eq!(rows[2], vec![CellValue::Float(2.5)]);
        assert_eq!(rows[3], vec![CellValue::Bool(true)]);
        assert!(workbook.sheet("Second").unwrap().rows.is_empty());
    }
}
