//! Survey data utilities for an electrofishing application
//!
//! - [`pipeline`]: accept, parse and schema-validate uploaded spreadsheets
//! - [`export`]: write rivers and stations to `.xlsx` or CSV
//! - [`chart`]: species counts per river or station
//! - [`validation`]: text whitelists, string sanitizing and JSON schemas

pub mod chart;
pub mod config;
pub mod error;
pub mod export;
pub mod feedback;
pub mod model;
pub mod pipeline;
pub mod upload;
pub mod validation;
pub mod workbook;

pub use chart::{ChartData, ChartSource, ObservationPoint, count_species_across_points};
pub use config::Config;
pub use error::{ParseFailure, UploadError};
pub use export::{ExportKind, generate_csv_export, generate_spreadsheet_export};
pub use feedback::{Feedback, FeedbackCode, FeedbackKind, FeedbackSink};
pub use model::{CellValue, Dataset, Observation, River, RiverMap, Row, Station, StationMap};
pub use pipeline::UploadValidationPipeline;
pub use upload::{FileAcceptance, UploadCandidate, file_exists_in};
pub use validation::{SchemaKind, SchemaValidator};
pub use workbook::{Workbook, WorkbookFormat};
