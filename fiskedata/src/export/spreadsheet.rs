//! `.xlsx` export of survey data

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use super::format::{SheetData, format_rivers_for_excel, format_stations_for_excel};
use super::ExportKind;
use crate::model::{CellValue, RiverMap, Row, StationMap};
use crate::validation::{OBSERVATION_SHEET, RIVER_SHEET, STATION_SHEET};
use crate::workbook::XLSX_MIME_TYPE;

/// A serialized workbook ready to be downloaded
#[derive(Debug, Clone)]
pub struct SpreadsheetExport {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
}

/// Build the three-sheet workbook for `kind` from the given collections
pub fn generate_spreadsheet_export(
    rivers: &RiverMap,
    stations: &StationMap,
    kind: ExportKind,
) -> Result<SpreadsheetExport> {
    let data = match kind {
        ExportKind::River => format_rivers_for_excel(rivers, stations),
        ExportKind::Station => format_stations_for_excel(stations, rivers),
    };

    let bytes = write_workbook(&data)?;

    log::info!(
        "Exported {} rivers, {} stations, {} observations ({} bytes)",
        data.river_rows.len() - 1,
        data.station_rows.len() - 1,
        data.observation_rows.len() - 1,
        bytes.len()
    );

    Ok(SpreadsheetExport {
        bytes,
        mime_type: XLSX_MIME_TYPE,
    })
}

/// Serialize sheet data to `.xlsx` bytes
pub fn write_workbook(data: &SheetData) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    for (name, rows) in [
        (RIVER_SHEET, &data.river_rows),
        (STATION_SHEET, &data.station_rows),
        (OBSERVATION_SHEET, &data.observation_rows),
    ] {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(name)?;
        write_rows(worksheet, rows, &header_format)
            .with_context(|| format!("Failed to write sheet: {}", name))?;
        worksheet.autofit();
    }

    workbook
        .save_to_buffer()
        .context("Failed to serialize workbook")
}

fn write_rows(ws: &mut Worksheet, rows: &[Row], header_format: &Format) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        let r = row_idx as u32;
        for (col_idx, cell) in row.iter().enumerate() {
            let c = col_idx as u16;
            if row_idx == 0 {
                if let CellValue::String(s) = cell {
                    ws.write_string_with_format(r, c, s, header_format)?;
                    continue;
                }
            }
            write_cell(ws, r, c, cell)?;
        }
    }
    Ok(())
}

fn write_cell(ws: &mut Worksheet, row: u32, col: u16, cell: &CellValue) -> Result<()> {
    match cell {
        CellValue::Empty => { /* Leave cell empty */ }
        CellValue::String(s) => { ws.write_string(row, col, s)?; }
        CellValue::Int(i) => { ws.write_number(row, col, *i as f64)?; }
        CellValue::Float(f) => { ws.write_number(row, col, *f)?; }
        CellValue::Bool(b) => { ws.write_boolean(row, col, *b)?; }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::format::tests::sample_data;
    use crate::pipeline::validate_workbook;
    use crate::validation::{SHEET_NAMES, SchemaValidator};
    use crate::workbook::parse_xlsx;

    #[test]
    fn test_round_trip_river_export() {
        let (rivers, stations) = sample_data();
        let export = generate_spreadsheet_export(&rivers, &stations, ExportKind::River).unwrap();
        assert_eq!(export.mime_type, XLSX_MIME_TYPE);

        let workbook = parse_xlsx(&export.bytes).unwrap();
        assert_eq!(workbook.sheet_names(), SHEET_NAMES.to_vec());
        validate_workbook(&workbook, &SchemaValidator::default()).unwrap();

        let observations = &workbook.sheet(OBSERVATION_SHEET).unwrap().rows;
        assert_eq!(observations.len(), 4);
        assert_eq!(observations[1][2], CellValue::from("laks"));
        assert_eq!(observations[1][3], CellValue::Int(2));
        assert_eq!(observations[1][4], CellValue::Float(12.5));
        assert_eq!(observations[1][7], CellValue::Bool(true));
    }

    #[test]
    fn test_round_trip_station_export() {
        let (rivers, stations) = sample_data();
        let export = generate_spreadsheet_export(&rivers, &stations, ExportKind::Station).unwrap();

        let workbook = parse_xlsx(&export.bytes).unwrap();
        assert_eq!(workbook.sheet_names(), SHEET_NAMES.to_vec());
        validate_workbook(&workbook, &SchemaValidator::default()).unwrap();
        assert_eq!(workbook.sheet(STATION_SHEET).unwrap().rows.len(), 4);
    }

    #[test]
    fn test_export_binds_to_arguments() {
        let export =
            generate_spreadsheet_export(&RiverMap::new(), &StationMap::new(), ExportKind::River)
                .unwrap();

        let workbook = parse_xlsx(&export.bytes).unwrap();
        for name in SHEET_NAMES {
            assert_eq!(workbook.sheet(name).unwrap().rows.len(), 1);
        }
    }
}
