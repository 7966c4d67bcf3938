//! Spreadsheet and CSV export of rivers, stations and observations

pub mod csv_exporter;
pub(crate) mod format;
mod spreadsheet;

pub use csv_exporter::generate_csv_export;
pub use format::{
    CSV_HEADER, OBSERVATION_HEADER, RIVER_HEADER, STATION_HEADER, SheetData,
    format_rivers_for_csv, format_rivers_for_excel, format_stations_for_csv,
    format_stations_for_excel,
};
pub use spreadsheet::{SpreadsheetExport, generate_spreadsheet_export, write_workbook};

use std::str::FromStr;

/// Which collection drives an export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    River,
    Station,
}

impl FromStr for ExportKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "river" => Ok(ExportKind::River),
            "station" => Ok(ExportKind::Station),
            other => anyhow::bail!("Unknown export kind '{}' (expected 'river' or 'station')", other),
        }
    }
}
