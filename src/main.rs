mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hallcal_core::config::HallConfig;
use hallcal_core::store::LocalStore;
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};

use commands::activities::ActivityCommands;
use commands::events::EventCommands;

#[derive(Parser)]
#[command(name = "hallcal")]
#[command(about = "Village hall calendar: regular activities, one-off events and month views")]
struct Cli {
    /// Read and write records here instead of the configured data_dir
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dates a schedule description falls on
    Expand {
        /// e.g. "First Saturday of the month, 10am"
        schedule: String,

        /// Month to expand into (YYYY-MM, default: this month)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Show every event and activity in a month
    Month {
        /// Month to show (YYYY-MM, default: this month)
        #[arg(short, long)]
        month: Option<String>,

        /// Print the day index as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show what's on for one day
    Day {
        /// Date (YYYY-MM-DD)
        date: String,
    },
    /// Manage one-off events
    Events {
        #[command(subcommand)]
        command: EventCommands,
    },
    /// Manage regular activities
    Activities {
        #[command(subcommand)]
        command: ActivityCommands,
    },
    /// Write a month's calendar as .ics
    Export {
        /// Month to export (YYYY-MM, default: this month)
        #[arg(short, long)]
        month: Option<String>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show config paths and effective settings
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Expand { schedule, month } => {
            let month = utils::resolve_month(month.as_deref())?;
            commands::expand::run(&schedule, month)
        }
        Commands::Month { month, json } => {
            let month = utils::resolve_month(month.as_deref())?;
            let config = load_config(cli.data_dir)?;
            commands::month::run(&open_store(&config)?, month, json)
        }
        Commands::Day { date } => {
            let date = utils::parse_date(&date)?;
            let config = load_config(cli.data_dir)?;
            commands::day::run(&open_store(&config)?, date)
        }
        Commands::Events { command } => {
            let config = load_config(cli.data_dir)?;
            commands::events::run(&open_store(&config)?, command)
        }
        Commands::Activities { command } => {
            let config = load_config(cli.data_dir)?;
            commands::activities::run(&open_store(&config)?, command)
        }
        Commands::Export { month, output } => {
            let month = utils::resolve_month(month.as_deref())?;
            let config = load_config(cli.data_dir)?;
            commands::export::run(&config, &open_store(&config)?, month, output.as_deref())
        }
        Commands::Config => {
            let config = load_config(cli.data_dir)?;
            commands::config::run(&config)
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    // Only fails if a logger is already installed
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn load_config(data_dir: Option<PathBuf>) -> Result<HallConfig> {
    let mut config = HallConfig::load().context("Could not load hallcal config")?;

    if let Some(dir) = data_dir {
        log::debug!("using data dir {} from --data-dir", dir.display());
        config.data_dir = dir;
    }

    Ok(config)
}

fn open_store(config: &HallConfig) -> Result<LocalStore> {
    config
        .open_store()
        .with_context(|| format!("Could not open data directory {}", config.data_path().display()))
}
