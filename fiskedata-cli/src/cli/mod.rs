pub mod commands;
pub mod console;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "fiskedata")]
#[command(about = "Validate, export and chart electrofishing survey data")]
#[command(version)]
#[command(after_help = "Examples:
  fiskedata validate elver.xlsx                                # Validate one upload
  fiskedata export --data data.json --kind river -o elver.xlsx # Export rivers to xlsx
  fiskedata export --data data.json --format csv -o elver.csv  # Export rivers to CSV
  fiskedata chart --data data.json --species laks,aure --others")]
pub struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to a config.toml (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check spreadsheet uploads against the survey sheet schemas
    Validate(ValidateArgs),
    /// Write a dataset to an .xlsx workbook or CSV file
    Export(ExportArgs),
    /// Print species counts per river or station as JSON
    Chart(ChartArgs),
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Files to validate (.xlsx or .csv)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Dataset JSON with `rivers` and `stations`
    #[arg(short, long)]
    pub data: PathBuf,

    /// Which collection drives the export
    #[arg(short, long, value_enum, default_value = "river")]
    pub kind: KindArg,

    /// Output format
    #[arg(short, long, value_enum, default_value = "xlsx")]
    pub format: FormatArg,

    /// Output file
    #[arg(short, long)]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct ChartArgs {
    /// Dataset JSON with `rivers` and `stations`
    #[arg(short, long)]
    pub data: PathBuf,

    /// Group counts per river or per station
    #[arg(short, long, value_enum, default_value = "river")]
    pub kind: KindArg,

    /// Species to count, in display order
    #[arg(short, long, value_delimiter = ',')]
    pub species: Vec<String>,

    /// Add an "others" entry for every remaining species
    #[arg(long)]
    pub others: bool,

    /// Write JSON to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindArg {
    River,
    Station,
}

impl From<KindArg> for fiskedata::ExportKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::River => fiskedata::ExportKind::River,
            KindArg::Station => fiskedata::ExportKind::Station,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Xlsx,
    Csv,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_export_args() {
        let cli = Cli::parse_from([
            "fiskedata", "export", "--data", "data.json", "--kind", "station", "--format", "csv",
            "-o", "out.csv",
        ]);

        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.kind, KindArg::Station);
                assert_eq!(args.format, FormatArg::Csv);
                assert_eq!(args.output, PathBuf::from("out.csv"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_chart_species_list() {
        let cli = Cli::parse_from([
            "fiskedata", "-vv", "chart", "--data", "d.json", "--species", "laks,aure", "--others",
        ]);

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Chart(args) => {
                assert_eq!(args.species, vec!["laks", "aure"]);
                assert!(args.others);
                assert_eq!(args.kind, KindArg::River);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_validate_requires_files() {
        assert!(Cli::try_parse_from(["fiskedata", "validate"]).is_err());
    }
}
