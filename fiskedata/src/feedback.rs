//! User-facing feedback catalog and sinks
//!
//! The pipeline never shows messages itself. It hands a [`Feedback`] to a
//! [`FeedbackSink`], which the host application implements (a notification
//! store, a terminal, a log).

use std::cell::RefCell;

/// Severity of a feedback message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Error,
    Warning,
    Info,
    Success,
}

impl FeedbackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackKind::Error => "error",
            FeedbackKind::Warning => "warning",
            FeedbackKind::Info => "info",
            FeedbackKind::Success => "success",
        }
    }
}

/// Fixed catalog of feedback codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackCode {
    UnsupportedContentType,
    ContentTooLarge,
    InvalidWorkbook,
    DuplicateFile,
    UploadAccepted,
}

impl FeedbackCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackCode::UnsupportedContentType => "UNSUPPORTED_CONTENT_TYPE",
            FeedbackCode::ContentTooLarge => "CONTENT_TOO_LARGE",
            FeedbackCode::InvalidWorkbook => "INVALID_WORKBOOK",
            FeedbackCode::DuplicateFile => "DUPLICATE_FILE",
            FeedbackCode::UploadAccepted => "UPLOAD_ACCEPTED",
        }
    }

    /// Default message shown to the user for this code
    pub fn message(&self) -> &'static str {
        match self {
            FeedbackCode::UnsupportedContentType => {
                "Unsupported file type. Only .csv and .xlsx files can be uploaded."
            }
            FeedbackCode::ContentTooLarge => "The file is too large. The maximum size is 10 MB.",
            FeedbackCode::InvalidWorkbook => {
                "The file does not match the expected format (Elvedata, Stasjonsdata, Individdata)."
            }
            FeedbackCode::DuplicateFile => "A file with the same name has already been added.",
            FeedbackCode::UploadAccepted => "The file was validated successfully.",
        }
    }
}

impl std::fmt::Display for FeedbackCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single feedback event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub code: FeedbackCode,
    pub message: String,
}

impl Feedback {
    /// Feedback with the catalog message for `code`
    pub fn new(kind: FeedbackKind, code: FeedbackCode) -> Self {
        Feedback {
            kind,
            code,
            message: code.message().to_string(),
        }
    }

    pub fn error(code: FeedbackCode) -> Self {
        Self::new(FeedbackKind::Error, code)
    }

    /// Replace the catalog message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

/// Receiver for feedback events
pub trait FeedbackSink {
    fn emit(&self, feedback: Feedback);
}

/// Routes feedback to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFeedback;

impl FeedbackSink for LogFeedback {
    fn emit(&self, feedback: Feedback) {
        match feedback.kind {
            FeedbackKind::Error => log::error!("[{}] {}", feedback.code, feedback.message),
            FeedbackKind::Warning => log::warn!("[{}] {}", feedback.code, feedback.message),
            FeedbackKind::Info | FeedbackKind::Success => {
                log::info!("[{}] {}", feedback.code, feedback.message)
            }
        }
    }
}

/// Collects feedback in memory, in emission order
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    events: RefCell<Vec<Feedback>>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far
    pub fn events(&self) -> Vec<Feedback> {
        self.events.borrow().clone()
    }

    pub fn codes(&self) -> Vec<FeedbackCode> {
        self.events.borrow().iter().map(|f| f.code).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl FeedbackSink for RecordingFeedback {
    fn emit(&self, feedback: Feedback) {
        self.events.borrow_mut().push(feedback);
    }
}

impl<T: FeedbackSink + ?Sized> FeedbackSink for &T {
    fn emit(&self, feedback: Feedback) {
        (**self).emit(feedback)
    }
}
