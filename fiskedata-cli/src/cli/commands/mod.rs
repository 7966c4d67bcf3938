pub mod chart;
pub mod export;
pub mod validate;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use fiskedata::Dataset;

/// Read a dataset JSON file (`{"rivers": [...], "stations": [...]}`)
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    if !path.exists() {
        anyhow::bail!("Dataset file does not exist: {}", path.display());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset: {}", path.display()))?;

    let dataset: Dataset = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse dataset JSON: {}", path.display()))?;

    log::debug!(
        "Loaded {} rivers and {} stations from {}",
        dataset.rivers.len(),
        dataset.stations.len(),
        path.display()
    );

    Ok(dataset)
}
