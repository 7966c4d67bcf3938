//! Schema catalog and the process-wide validator registry

use std::collections::HashMap;

use jsonschema::Validator;
use once_cell::sync::Lazy;
use serde_json::Value;

/// Sheet names, in workbook order
pub const RIVER_SHEET: &str = "Elvedata";
pub const STATION_SHEET: &str = "Stasjonsdata";
pub const OBSERVATION_SHEET: &str = "Individdata";

pub const SHEET_NAMES: [&str; 3] = [RIVER_SHEET, STATION_SHEET, OBSERVATION_SHEET];

/// Every payload kind that has a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    RiverWithSpecies,
    StationWithSpecies,
    RiverSummary,
    StationSummary,
    StationDownload,
    RiverSheet,
    StationSheet,
    ObservationSheet,
}

impl SchemaKind {
    pub const ALL: [SchemaKind; 8] = [
        SchemaKind::RiverWithSpecies,
        SchemaKind::StationWithSpecies,
        SchemaKind::RiverSummary,
        SchemaKind::StationSummary,
        SchemaKind::StationDownload,
        SchemaKind::RiverSheet,
        SchemaKind::StationSheet,
        SchemaKind::ObservationSheet,
    ];

    /// Schema for a sheet name (exact, case-sensitive match)
    pub fn for_sheet(name: &str) -> Option<SchemaKind> {
        match name {
            RIVER_SHEET => Some(SchemaKind::RiverSheet),
            STATION_SHEET => Some(SchemaKind::StationSheet),
            OBSERVATION_SHEET => Some(SchemaKind::ObservationSheet),
            _ => None,
        }
    }

    fn source(&self) -> &'static str {
        match self {
            SchemaKind::RiverWithSpecies => include_str!("../../schemas/river_with_species.json"),
            SchemaKind::StationWithSpecies => {
                include_str!("../../schemas/station_with_species.json")
            }
            SchemaKind::RiverSummary => include_str!("../../schemas/river_summary.json"),
            SchemaKind::StationSummary => include_str!("../../schemas/station_summary.json"),
            SchemaKind::StationDownload => include_str!("../../schemas/station_download.json"),
            SchemaKind::RiverSheet => include_str!("../../schemas/river_sheet.json"),
            SchemaKind::StationSheet => include_str!("../../schemas/station_sheet.json"),
            SchemaKind::ObservationSheet => include_str!("../../schemas/observation_sheet.json"),
        }
    }

    /// The raw schema document
    pub fn schema(&self) -> serde_json::Result<Value> {
        serde_json::from_str(self.source())
    }
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SchemaKind::RiverWithSpecies => "river-with-species",
            SchemaKind::StationWithSpecies => "station-with-species",
            SchemaKind::RiverSummary => "river-summary",
            SchemaKind::StationSummary => "station-summary",
            SchemaKind::StationDownload => "station-download",
            SchemaKind::RiverSheet => "river-sheet",
            SchemaKind::StationSheet => "station-sheet",
            SchemaKind::ObservationSheet => "observation-sheet",
        };
        write!(f, "{}", name)
    }
}

/// Compiled draft-07 validators for every [`SchemaKind`]
pub struct SchemaRegistry {
    validators: HashMap<SchemaKind, Validator>,
}

static REGISTRY: Lazy<SchemaRegistry> = Lazy::new(|| {
    SchemaRegistry::build().unwrap_or_else(|e| panic!("Embedded schema failed to compile: {}", e))
});

impl SchemaRegistry {
    /// The shared registry, compiled on first use
    pub fn global() -> &'static SchemaRegistry {
        &REGISTRY
    }

    /// Compile every schema in the catalog
    pub fn build() -> anyhow::Result<Self> {
        let mut validators = HashMap::new();

        for kind in SchemaKind::ALL {
            let schema = kind
                .schema()
                .map_err(|e| anyhow::anyhow!("Schema '{}' is not valid JSON: {}", kind, e))?;
            let validator = jsonschema::draft7::new(&schema)
                .map_err(|e| anyhow::anyhow!("Schema '{}' is invalid: {}", kind, e))?;
            validators.insert(kind, validator);
        }

        log::debug!("Compiled {} schemas", validators.len());
        Ok(Self { validators })
    }

    pub fn validator(&self, kind: SchemaKind) -> &Validator {
        // build() inserts every kind in ALL
        &self.validators[&kind]
    }

    /// Structural check only; returns every schema error message
    pub fn check(&self, kind: SchemaKind, data: &Value) -> Result<(), Vec<String>> {
        let validator = self.validator(kind);
        if validator.is_valid(data) {
            return Ok(());
        }

        Err(validator
            .iter_errors(data)
            .map(|e| e.to_string())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_all_schemas_compile() {
        let registry = SchemaRegistry::build().unwrap();
        assert_eq!(registry.validators.len(), SchemaKind::ALL.len());
    }

    #[test]
    fn test_sheet_lookup_is_exact() {
        assert_eq!(SchemaKind::for_sheet("Elvedata"), Some(SchemaKind::RiverSheet));
        assert_eq!(SchemaKind::for_sheet("Stasjonsdata"), Some(SchemaKind::StationSheet));
        assert_eq!(SchemaKind::for_sheet("Individdata"), Some(SchemaKind::ObservationSheet));
        assert_eq!(SchemaKind::for_sheet("elvedata"), None);
        assert_eq!(SchemaKind::for_sheet("Sheet1"), None);
    }

    #[test]
    fn test_observation_sheet_schema() {
        let registry = SchemaRegistry::global();
        let header = json!([
            "ID", "Stasjon ID", "Art", "Antall", "Lengde", "Kjonn",
            "Fettfinne klippet", "Sluppet ut", "Kommentar"
        ]);

        let valid = json!([header, [1, 10, "laks", 2, 12.5, "hunn", false, true, null]]);
        assert!(registry.check(SchemaKind::ObservationSheet, &valid).is_ok());

        let zero_count = json!([header, [1, 10, "laks", 0, null, null, null, null, null]]);
        assert!(registry.check(SchemaKind::ObservationSheet, &zero_count).is_err());

        let bad_gender = json!([header, [1, 10, "laks", 1, null, "x", null, null, null]]);
        assert!(registry.check(SchemaKind::ObservationSheet, &bad_gender).is_err());

        let missing_species = json!([header, [1, 10]]);
        assert!(registry.check(SchemaKind::ObservationSheet, &missing_species).is_err());
    }

    #[test]
    fn test_sheet_header_must_match() {
        let registry = SchemaRegistry::global();
        let wrong_header = json!([["ID", "Navn"]]);
        assert!(registry.check(SchemaKind::RiverSheet, &wrong_header).is_err());
        assert!(registry.check(SchemaKind::RiverSheet, &json!([])).is_err());
    }

    #[test]
    fn test_station_download_schema() {
        let registry = SchemaRegistry::global();
        assert!(registry
            .check(SchemaKind::StationDownload, &json!({"stationIds": [1, 2], "format": "csv"}))
            .is_ok());
        assert!(registry
            .check(SchemaKind::StationDownload, &json!({"stationIds": [], "format": "csv"}))
            .is_err());
        assert!(registry
            .check(SchemaKind::StationDownload, &json!({"stationIds": [1], "format": "pdf"}))
            .is_err());
    }
}
