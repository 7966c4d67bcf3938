//! Schema-driven validation of uploaded and outgoing payloads
//!
//! A payload passes when it is well-formed JSON, every string in it matches
//! the text whitelist, and it satisfies the schema for its kind. The three
//! checks run in that order and stop at the first failure.

mod sanitize;
mod schema;
mod text;

pub use sanitize::{check_strings, strings_are_clean};
pub use schema::{
    OBSERVATION_SHEET, RIVER_SHEET, SHEET_NAMES, STATION_SHEET, SchemaKind, SchemaRegistry,
};
pub use text::{validate_integer, validate_number, validate_password, validate_text};

use serde_json::Value;

use crate::config::ValidationLimits;

/// Why a payload failed validation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Violation {
    #[error("Payload is not valid JSON: {0}")]
    NotJson(String),

    #[error("Disallowed characters in text: {0:?}")]
    DisallowedText(String),

    #[error("Payload nested deeper than {0} levels")]
    DepthExceeded(usize),

    #[error("Schema violation: {}", .0.join("; "))]
    Schema(Vec<String>),
}

/// Validates payloads against the shared schema registry
#[derive(Clone, Copy)]
pub struct SchemaValidator<'a> {
    registry: &'a SchemaRegistry,
    max_depth: usize,
}

impl Default for SchemaValidator<'static> {
    fn default() -> Self {
        Self::new(SchemaRegistry::global(), &ValidationLimits::default())
    }
}

impl<'a> SchemaValidator<'a> {
    pub fn new(registry: &'a SchemaRegistry, limits: &ValidationLimits) -> Self {
        Self {
            registry,
            max_depth: limits.max_depth,
        }
    }

    /// Sanitize strings, then check structure
    pub fn check_value(&self, data: &Value, kind: SchemaKind) -> Result<(), Violation> {
        check_strings(data, self.max_depth)?;
        self.registry.check(kind, data).map_err(Violation::Schema)
    }

    /// Parse `raw` as JSON, then [`check_value`](Self::check_value)
    pub fn check_json(&self, raw: &str, kind: SchemaKind) -> Result<(), Violation> {
        let data: Value =
            serde_json::from_str(raw).map_err(|e| Violation::NotJson(e.to_string()))?;
        self.check_value(&data, kind)
    }

    pub fn validate_value(&self, data: &Value, kind: SchemaKind) -> bool {
        match self.check_value(data, kind) {
            Ok(()) => true,
            Err(violation) => {
                log::debug!("{} payload rejected: {}", kind, violation);
                false
            }
        }
    }

    pub fn validate_json(&self, raw: &str, kind: SchemaKind) -> bool {
        match self.check_json(raw, kind) {
            Ok(()) => true,
            Err(violation) => {
                log::debug!("{} payload rejected: {}", kind, violation);
                false
            }
        }
    }
}

/// Validate a raw JSON string against a schema kind with default limits.
///
/// Returns `false` for anything that is not parseable JSON.
pub fn validate_json(raw: &str, kind: SchemaKind) -> bool {
    SchemaValidator::default().validate_json(raw, kind)
}

pub fn validate_river_with_species(raw: &str) -> bool {
    validate_json(raw, SchemaKind::RiverWithSpecies)
}

pub fn validate_station_with_species(raw: &str) -> bool {
    validate_json(raw, SchemaKind::StationWithSpecies)
}

pub fn validate_river_summary(raw: &str) -> bool {
    validate_json(raw, SchemaKind::RiverSummary)
}

pub fn validate_station_summary(raw: &str) -> bool {
    validate_json(raw, SchemaKind::StationSummary)
}

pub fn validate_station_download(raw: &str) -> bool {
    validate_json(raw, SchemaKind::StationDownload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_json_returns_false() {
        assert!(!validate_json("{not json", SchemaKind::RiverSummary));
        assert!(!validate_json("", SchemaKind::StationDownload));

        let err = SchemaValidator::default()
            .check_json("[1,", SchemaKind::RiverSheet)
            .unwrap_err();
        assert!(matches!(err, Violation::NotJson(_)));
    }

    #[test]
    fn test_river_summary() {
        assert!(validate_river_summary(
            r#"{"id": 1, "name": "Nidelva", "startDate": "01.05.2024", "stationCount": 2}"#
        ));
        // Hyphen is outside the text whitelist
        assert!(!validate_river_summary(
            r#"{"id": 1, "name": "Nid-elva", "startDate": "01.05.2024"}"#
        ));
        assert!(!validate_river_summary(r#"{"id": 1, "name": "Nidelva"}"#));
    }

    #[test]
    fn test_sanitizer_runs_before_schema() {
        let err = SchemaValidator::default()
            .check_json(r#"{"id": "x;y"}"#, SchemaKind::StationSummary)
            .unwrap_err();
        assert_eq!(err, Violation::DisallowedText("x;y".into()));
    }

    #[test]
    fn test_with_species_variants() {
        assert!(validate_river_with_species(
            r#"{"id": 3, "name": "Gaula", "startDate": "12.06.2023",
                "species": [{"species": "laks", "count": 4}, {"species": "aure", "count": 0}]}"#
        ));
        assert!(validate_station_with_species(
            r#"{"id": 7, "riverId": 3, "name": "St 7", "date": "12.06.2023", "species": []}"#
        ));
        assert!(!validate_station_with_species(
            r#"{"id": 7, "riverId": 3, "name": "St 7", "date": "12.06.2023",
                "species": [{"species": "laks"}]}"#
        ));
    }

    #[test]
    fn test_station_summary_and_download() {
        assert!(validate_station_summary(
            r#"{"id": 7, "riverId": 3, "name": "St 7", "date": "12.06.2023", "observationCount": 5}"#
        ));
        assert!(validate_station_download(r#"{"stationIds": [7, 8], "format": "xlsx"}"#));
        assert!(!validate_station_download(r#"{"stationIds": [7, 7], "format": "xlsx"}"#));
    }

    #[test]
    fn test_configured_depth_limit() {
        let limits = ValidationLimits { max_depth: 1 };
        let validator = SchemaValidator::new(SchemaRegistry::global(), &limits);

        let err = validator
            .check_json(r#"[["ID"]]"#, SchemaKind::RiverSheet)
            .unwrap_err();
        assert_eq!(err, Violation::DepthExceeded(1));
    }
}
