//! Error taxonomy for the upload pipeline

/// Why an upload was rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UploadError {
    #[error("Unsupported file type: {} (allowed: {allowed:?})", .extension.as_deref().unwrap_or("<none>"))]
    UnsupportedContentType {
        extension: Option<String>,
        allowed: Vec<String>,
    },

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    ContentTooLarge { size: u64, max: u64 },

    #[error(transparent)]
    ParseFailure(#[from] ParseFailure),

    #[error("Sheet '{sheet}' failed validation: {reason}")]
    SchemaViolation { sheet: String, reason: String },
}

/// The workbook bytes could not be decoded
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Failed to parse workbook: {message}")]
pub struct ParseFailure {
    pub message: String,
}

impl ParseFailure {
    pub fn new(message: impl Into<String>) -> Self {
        ParseFailure {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = UploadError::UnsupportedContentType {
            extension: None,
            allowed: vec![".csv".into()],
        };
        assert_eq!(
            err.to_string(),
            "Unsupported file type: <none> (allowed: [\".csv\"])"
        );

        let err: UploadError = ParseFailure::new("zip header missing").into();
        assert_eq!(err.to_string(), "Failed to parse workbook: zip header missing");
    }
}
