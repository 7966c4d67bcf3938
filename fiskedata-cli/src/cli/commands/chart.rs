//! Chart command handler

use anyhow::{Context, Result};
use std::fs;

use super::load_dataset;
use crate::cli::{ChartArgs, KindArg};
use fiskedata::ChartSource;
use fiskedata::chart::data_for_bar_and_pie_chart;

pub fn handle_chart_command(args: ChartArgs) -> Result<()> {
    if args.species.is_empty() && !args.others {
        anyhow::bail!("Nothing to count: pass --species and/or --others");
    }

    let dataset = load_dataset(&args.data)?;
    let rivers = dataset.river_map();
    let stations = dataset.station_map();

    let source = match args.kind {
        KindArg::River => ChartSource::Rivers {
            rivers: &rivers,
            stations: &stations,
        },
        KindArg::Station => ChartSource::Stations(&stations),
    };

    let data = data_for_bar_and_pie_chart(source, args.species.as_slice(), args.others);
    log::info!("Computed species counts for {} points", data.len());

    let json = serde_json::to_string_pretty(&data).context("Failed to serialize chart data")?;

    match args.output {
        Some(path) => fs::write(&path, &json)
            .with_context(|| format!("Failed to write output to: {}", path.display()))?,
        None => println!("{}", json),
    }

    Ok(())
}
