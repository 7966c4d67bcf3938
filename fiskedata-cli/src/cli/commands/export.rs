//! Export command handler

use anyhow::{Context, Result};
use colored::*;
use std::fs;

use super::load_dataset;
use crate::cli::{ExportArgs, FormatArg};
use fiskedata::export::{format_rivers_for_csv, format_stations_for_csv};
use fiskedata::{ExportKind, generate_csv_export, generate_spreadsheet_export};

pub fn handle_export_command(args: ExportArgs) -> Result<()> {
    let dataset = load_dataset(&args.data)?;
    let rivers = dataset.river_map();
    let stations = dataset.station_map();
    let kind = ExportKind::from(args.kind);

    let bytes = match args.format {
        FormatArg::Xlsx => generate_spreadsheet_export(&rivers, &stations, kind)?.bytes,
        FormatArg::Csv => {
            let rows = match kind {
                ExportKind::River => format_rivers_for_csv(&rivers, &stations),
                ExportKind::Station => format_stations_for_csv(&stations, &rivers),
            };
            generate_csv_export(&rows)?.into_bytes()
        }
    };

    fs::write(&args.output, &bytes)
        .with_context(|| format!("Failed to write output to: {}", args.output.display()))?;

    println!(
        "{} Wrote {} ({} bytes)",
        "✓".bright_green().bold(),
        args.output.display().to_string().cyan(),
        bytes.len()
    );

    Ok(())
}
