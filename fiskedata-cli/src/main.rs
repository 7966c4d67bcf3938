mod cli;

use anyhow::Result;
use clap::Parser;
use colored::*;

use cli::commands::{chart, export, validate};
use cli::console::ConsoleFeedback;
use cli::{Cli, Commands};
use fiskedata::Config;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{} {:#}", "error:".bright_red().bold(), err);
            std::process::exit(2);
        }
    }
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<i32> {
    let config = Config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Validate(args) => {
            let failed = validate::handle_validate_command(args, &config, &ConsoleFeedback)?;
            Ok(if failed == 0 { 0 } else { 1 })
        }
        Commands::Export(args) => export::handle_export_command(args).map(|()| 0),
        Commands::Chart(args) => chart::handle_chart_command(args).map(|()| 0),
    }
}
