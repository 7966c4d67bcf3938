//! Upload policy and validation limits
//!
//! Everything has a default matching the application's fixed policy, so a
//! missing or partial config file is fine.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// 10 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Maximum nesting depth the string sanitizer will walk
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub upload: UploadPolicy,
    pub validation: ValidationLimits,
}

/// Which files are accepted for upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadPolicy {
    /// Accepted extensions, including the leading dot (case-sensitive)
    pub accepted_extensions: Vec<String>,
    pub max_upload_bytes: u64,
}

/// Limits applied while validating parsed content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationLimits {
    pub max_depth: usize,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            accepted_extensions: vec![".csv".to_string(), ".xlsx".to_string()],
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl UploadPolicy {
    /// Set the accepted extensions
    pub fn accepted_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepted_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the size cap in bytes
    pub fn max_upload_bytes(mut self, max: u64) -> Self {
        self.max_upload_bytes = max;
        self
    }

    pub fn accepts_extension(&self, extension: &str) -> bool {
        self.accepted_extensions.iter().any(|e| e == extension)
    }
}

impl Config {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    /// Load from an explicit path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Default config file location (`<config_dir>/fiskedata/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("fiskedata").join("config.toml"))
    }

    /// Load `path` if given, else the default file if it exists, else defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(default) if default.exists() => {
                log::debug!("Loading config from {}", default.display());
                Self::load(&default)
            }
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.upload.accepted_extensions, vec![".csv", ".xlsx"]);
        assert_eq!(config.upload.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.validation.max_depth, 64);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [upload]
            max_upload_bytes = 1024
            "#,
        )
        .unwrap();

        assert_eq!(config.upload.max_upload_bytes, 1024);
        assert_eq!(config.upload.accepted_extensions, vec![".csv", ".xlsx"]);
        assert_eq!(config.validation.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(Config::from_toml_str("upload = 3").is_err());
    }

    #[test]
    fn test_builder_pattern() {
        let policy = UploadPolicy::default()
            .accepted_extensions([".xlsx"])
            .max_upload_bytes(2048);

        assert!(policy.accepts_extension(".xlsx"));
        assert!(!policy.accepts_extension(".csv"));
        assert_eq!(policy.max_upload_bytes, 2048);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[validation]\nmax_depth = 8").unwrap();

        let config = Config::load_or_default(Some(file.path())).unwrap();
        assert_eq!(config.validation.max_depth, 8);
    }
}
