//! File acceptance: extension and size checks before anything is parsed

use crate::config::UploadPolicy;
use crate::error::UploadError;
use crate::feedback::{Feedback, FeedbackCode, FeedbackSink};

/// A file picked for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCandidate {
    pub name: String,
    /// Size in bytes
    pub size: u64,
}

impl UploadCandidate {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    pub fn extension(&self) -> Option<&str> {
        extension_of(&self.name)
    }
}

/// Everything from the last `.` to the end of the name, dot included.
///
/// Names without a dot have no extension.
pub fn extension_of(name: &str) -> Option<&str> {
    name.rfind('.').map(|idx| &name[idx..])
}

/// True if a file with the exact same name is already in `files`
pub fn file_exists_in(file: &UploadCandidate, files: &[UploadCandidate]) -> bool {
    files.iter().any(|existing| existing.name == file.name)
}

/// Gatekeeper for upload candidates
#[derive(Debug, Clone, Default)]
pub struct FileAcceptance {
    policy: UploadPolicy,
}

impl FileAcceptance {
    pub fn new(policy: UploadPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Check extension, then size
    pub fn check(&self, file: &UploadCandidate) -> Result<(), UploadError> {
        let extension = file.extension();
        if !extension.is_some_and(|ext| self.policy.accepts_extension(ext)) {
            return Err(UploadError::UnsupportedContentType {
                extension: extension.map(str::to_string),
                allowed: self.policy.accepted_extensions.clone(),
            });
        }

        if file.size > self.policy.max_upload_bytes {
            return Err(UploadError::ContentTooLarge {
                size: file.size,
                max: self.policy.max_upload_bytes,
            });
        }

        Ok(())
    }

    /// Like [`check`](Self::check), but also reports a rejection to `feedback`
    pub fn check_reporting(
        &self,
        file: &UploadCandidate,
        feedback: &dyn FeedbackSink,
    ) -> Result<(), UploadError> {
        self.check(file).inspect_err(|err| {
            log::warn!("Rejected upload '{}': {}", file.name, err);
            if let Some(event) = rejection_feedback(err) {
                feedback.emit(event);
            }
        })
    }

    /// Boolean form of [`check_reporting`](Self::check_reporting)
    pub fn accept(&self, file: &UploadCandidate, feedback: &dyn FeedbackSink) -> bool {
        self.check_reporting(file, feedback).is_ok()
    }
}

/// Feedback for a pre-parse rejection
pub(crate) fn rejection_feedback(err: &UploadError) -> Option<Feedback> {
    match err {
        UploadError::UnsupportedContentType { .. } => {
            Some(Feedback::error(FeedbackCode::UnsupportedContentType))
        }
        UploadError::ContentTooLarge { .. } => Some(Feedback::error(FeedbackCode::ContentTooLarge)),
        UploadError::ParseFailure(_) | UploadError::SchemaViolation { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::{FeedbackKind, RecordingFeedback};

    const MIB: u64 = 1024 * 1024;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("data.xlsx"), Some(".xlsx"));
        assert_eq!(extension_of("archive.tar.csv"), Some(".csv"));
        assert_eq!(extension_of("trailing."), Some("."));
        assert_eq!(extension_of("noext"), None);
    }

    #[test]
    fn test_accepts_supported_files() {
        let acceptance = FileAcceptance::default();
        let sink = RecordingFeedback::new();

        assert!(acceptance.accept(&UploadCandidate::new("elver.xlsx", 0), &sink));
        assert!(acceptance.accept(&UploadCandidate::new("elver.csv", 10 * MIB), &sink));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_rejects_unsupported_extension_for_all_sizes() {
        let acceptance = FileAcceptance::default();

        for name in ["data.xls", "data.XLSX", "data.json", "csv", "xlsx", "data.csv.bak", ""] {
            for size in [0, 1, 10 * MIB, 10 * MIB + 1] {
                let sink = RecordingFeedback::new();
                assert!(!acceptance.accept(&UploadCandidate::new(name, size), &sink));
                assert_eq!(sink.codes(), vec![FeedbackCode::UnsupportedContentType]);
            }
        }
    }

    #[test]
    fn test_rejects_oversized_files_for_all_extensions() {
        let acceptance = FileAcceptance::default();

        for name in ["a.csv", "a.xlsx"] {
            let sink = RecordingFeedback::new();
            assert!(!acceptance.accept(&UploadCandidate::new(name, 10 * MIB + 1), &sink));

            let events = sink.events();
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].kind, FeedbackKind::Error);
            assert_eq!(events[0].code, FeedbackCode::ContentTooLarge);
        }

        let err = acceptance
            .check(&UploadCandidate::new("a.xls", u64::MAX))
            .unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedContentType { .. }));
    }

    #[test]
    fn test_policy_is_configurable() {
        let acceptance = FileAcceptance::new(
            UploadPolicy::default()
                .accepted_extensions([".xlsx"])
                .max_upload_bytes(100),
        );

        assert!(acceptance.check(&UploadCandidate::new("a.xlsx", 100)).is_ok());
        assert_eq!(
            acceptance.check(&UploadCandidate::new("a.xlsx", 101)),
            Err(UploadError::ContentTooLarge { size: 101, max: 100 })
        );
        assert!(acceptance.check(&UploadCandidate::new("a.csv", 1)).is_err());
    }

    #[test]
    fn test_file_exists_in() {
        let files = vec![
            UploadCandidate::new("elver.xlsx", 10),
            UploadCandidate::new("stasjoner.csv", 20),
        ];

        assert!(file_exists_in(&UploadCandidate::new("elver.xlsx", 999), &files));
        assert!(!file_exists_in(&UploadCandidate::new("Elver.xlsx", 10), &files));
        assert!(!file_exists_in(&UploadCandidate::new("dir/elver.xlsx", 10), &files));
        assert!(!file_exists_in(&UploadCandidate::new("elver.xlsx", 10), &[]));
    }
}
