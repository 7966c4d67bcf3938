//! In-memory workbooks and decoding of uploaded spreadsheet files

mod reader;

pub use reader::{parse_csv, parse_workbook, parse_xlsx};

use serde_json::Value;

use crate::model::Row;

/// Name given to the only sheet of a CSV file
pub const CSV_SHEET_NAME: &str = "Sheet1";

/// MIME type of exported `.xlsx` files
pub const XLSX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Binary format of an uploaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookFormat {
    Xlsx,
    Csv,
}

impl WorkbookFormat {
    /// Format for a file name, by its (case-sensitive) extension
    pub fn from_file_name(name: &str) -> Option<Self> {
        match crate::upload::extension_of(name)? {
            ".xlsx" => Some(WorkbookFormat::Xlsx),
            ".csv" => Some(WorkbookFormat::Csv),
            _ => None,
        }
    }
}

/// A named sheet of rows; the first row is the header
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Row>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Rows as a JSON array of arrays
    pub fn to_json(&self) -> Value {
        Value::Array(
            self.rows
                .iter()
                .map(|row| Value::Array(row.iter().map(|cell| cell.to_json()).collect()))
                .collect(),
        )
    }
}

/// Ordered sheets of a decoded file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}
