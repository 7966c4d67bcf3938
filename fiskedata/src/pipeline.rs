//! Upload validation pipeline
//!
//! accept (extension, size) → parse (xlsx/csv) → validate each of the three
//! survey sheets against its schema, stopping at the first failure.

use crate::config::Config;
use crate::error::UploadError;
use crate::feedback::FeedbackSink;
use crate::upload::{FileAcceptance, UploadCandidate, rejection_feedback};
use crate::validation::{SHEET_NAMES, SchemaKind, SchemaRegistry, SchemaValidator, Violation};
use crate::workbook::{Sheet, Workbook, WorkbookFormat, parse_workbook};

/// Runs the full accept → parse → validate sequence for one file at a time
pub struct UploadValidationPipeline<'a> {
    acceptance: FileAcceptance,
    validator: SchemaValidator<'a>,
    feedback: &'a dyn FeedbackSink,
}

impl<'a> UploadValidationPipeline<'a> {
    /// Pipeline backed by the shared schema registry
    pub fn new(config: &Config, feedback: &'a dyn FeedbackSink) -> Self {
        Self::with_registry(config, SchemaRegistry::global(), feedback)
    }

    pub fn with_registry(
        config: &Config,
        registry: &'a SchemaRegistry,
        feedback: &'a dyn FeedbackSink,
    ) -> Self {
        Self {
            acceptance: FileAcceptance::new(config.upload.clone()),
            validator: SchemaValidator::new(registry, &config.validation),
            feedback,
        }
    }

    /// Run every stage and return the first failure.
    ///
    /// Emits feedback only for acceptance rejections.
    pub fn check(&self, file: &UploadCandidate, bytes: &[u8]) -> Result<(), UploadError> {
        let format = self.precheck(file)?;
        self.check_content(file, format, bytes)
    }

    /// Acceptance only, from the name and size alone. Call before reading
    /// the file so rejected uploads are never loaded.
    pub fn precheck(&self, file: &UploadCandidate) -> Result<WorkbookFormat, UploadError> {
        self.acceptance.check_reporting(file, self.feedback)?;

        WorkbookFormat::from_file_name(&file.name)
            .ok_or_else(|| UploadError::UnsupportedContentType {
                extension: file.extension().map(str::to_string),
                allowed: self.acceptance.policy().accepted_extensions.clone(),
            })
            .inspect_err(|err| {
                log::warn!("Rejected upload '{}': {}", file.name, err);
                if let Some(event) = rejection_feedback(err) {
                    self.feedback.emit(event);
                }
            })
    }

    /// Parse and validate an upload that already passed [`precheck`](Self::precheck)
    pub fn check_content(
        &self,
        file: &UploadCandidate,
        format: WorkbookFormat,
        bytes: &[u8],
    ) -> Result<(), UploadError> {
        let workbook = parse_workbook(bytes, format)?;
        validate_workbook(&workbook, &self.validator)?;

        log::info!("Upload '{}' passed validation", file.name);
        Ok(())
    }

    /// Boolean form of [`check`](Self::check)
    pub fn validate(&self, file: &UploadCandidate, bytes: &[u8]) -> bool {
        match self.check(file, bytes) {
            Ok(()) => true,
            Err(UploadError::ParseFailure(failure)) => {
                log::error!("Failed to read or validate workbook '{}': {}", file.name, failure);
                false
            }
            Err(err) => {
                log::warn!("Upload '{}' rejected: {}", file.name, err);
                false
            }
        }
    }
}

/// Parse and validate a workbook with default limits, skipping file acceptance
pub fn parse_and_validate_workbook(bytes: &[u8], format: WorkbookFormat) -> bool {
    let workbook = match parse_workbook(bytes, format) {
        Ok(workbook) => workbook,
        Err(failure) => {
            log::error!("Failed to read or validate workbook: {}", failure);
            return false;
        }
    };

    match validate_workbook(&workbook, &SchemaValidator::default()) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("{}", err);
            false
        }
    }
}

/// Validate the first three sheets against their schemas
pub fn validate_workbook(workbook: &Workbook, validator: &SchemaValidator) -> Result<(), UploadError> {
    validate_workbook_with(workbook, |sheet, kind| {
        validator.check_value(&sheet.to_json(), kind)
    })
}

/// Bind the first three sheets to schemas by exact name, then run `check`
/// on each in order, stopping at the first failure.
///
/// Fewer than three sheets, or an unrecognised name among the first three,
/// is rejected before any sheet is checked.
pub fn validate_workbook_with<F>(workbook: &Workbook, mut check: F) -> Result<(), UploadError>
where
    F: FnMut(&Sheet, SchemaKind) -> Result<(), Violation>,
{
    let bound = bind_sheets(workbook)?;

    for (sheet, kind) in bound {
        log::debug!("Validating sheet '{}' as {}", sheet.name, kind);
        check(sheet, kind).map_err(|violation| UploadError::SchemaViolation {
            sheet: sheet.name.clone(),
            reason: violation.to_string(),
        })?;
    }

    Ok(())
}

fn bind_sheets(workbook: &Workbook) -> Result<Vec<(&Sheet, SchemaKind)>, UploadError> {
    let expected = SHEET_NAMES.len();

    if workbook.sheets.len() < expected {
        return Err(UploadError::SchemaViolation {
            sheet: workbook.sheet_names().join(", "),
            reason: format!(
                "Expected {} sheets ({}), found {}",
                expected,
                SHEET_NAMES.join(", "),
                workbook.sheets.len()
            ),
        });
    }

    workbook
        .sheets
        .iter()
        .take(expected)
        .map(|sheet| match SchemaKind::for_sheet(&sheet.name) {
            Some(kind) => Ok((sheet, kind)),
            None => Err(UploadError::SchemaViolation {
                sheet: sheet.name.clone(),
                reason: format!("Unrecognised sheet name (expected one of {})", SHEET_NAMES.join(", ")),
            }),
        })
        .collect()
}
