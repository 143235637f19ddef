//! CLI entry point for the bike-share explorer.
//!
//! Runs the interactive dialog by default, or a single non-interactive report
//! with `report`.

use std::ffi::OsStr;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bikeshare_explorer::analyzers::analyzer::analyze;
use bikeshare_explorer::city::{City, DataSources};
use bikeshare_explorer::filter::{FilterSelector, filter_table};
use bikeshare_explorer::loader::load_city;
use bikeshare_explorer::output::{write_json, write_records, write_report};
use bikeshare_explorer::prompt::{Prompter, is_end_of_input, parse_city, parse_day, parse_month};
use bikeshare_explorer::sampler::{SAMPLE_SIZE, Sampler};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_explorer")]
#[command(about = "Explore US bike-share trip data", long_about = None)]
struct Cli {
    /// Directory containing chicago.csv, new_york_city.csv and washington.csv
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Seed for the raw-data sampler
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session (the default)
    Explore,
    /// Print a single report without prompting
    Report {
        /// Chicago, New York City or Washington
        #[arg(short, long, value_parser = parse_city)]
        city: City,

        /// January to June; omit for all months
        #[arg(short, long, value_parser = parse_month)]
        month: Option<bikeshare_explorer::filter::FilterMonth>,

        /// Full weekday name; omit for all days
        #[arg(long, value_parser = parse_day)]
        day: Option<chrono::Weekday>,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_explorer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_explorer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    // stderr stays quiet by default so it does not interleave with the prompts
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let data_dir = cli
        .data_dir
        .or_else(|| std::env::var_os("BIKESHARE_DATA_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    let sources = DataSources::from_dir(&data_dir);
    let mut sampler = Sampler::new(cli.seed);

    match cli.command.unwrap_or(Commands::Explore) {
        Commands::Explore => {
            let stdin = io::stdin();
            let mut prompter = Prompter::new(stdin.lock(), io::stdout());
            match explore(&mut prompter, &sources, &mut sampler) {
                Err(e) if e.downcast_ref::<io::Error>().is_some_and(is_end_of_input) => {
                    info!("Input closed, exiting");
                }
                other => other?,
            }
        }
        Commands::Report {
            city,
            month,
            day,
            format,
        } => {
            let selector = FilterSelector {
                month,
                weekday: day,
            };
            report(&sources, city, &selector, format)?;
        }
    }

    Ok(())
}

/// Interactive rounds until the user declines to restart.
fn explore<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    sources: &DataSources,
    sampler: &mut Sampler,
) -> Result<()> {
    loop {
        let (city, selector) = prompter.select_filters()?;
        info!(city = %city, selector = %selector, "Starting round");

        let table = load_city(sources, city)
            .with_context(|| format!("loading trip data for {city}"))?;
        let table = filter_table(&table, &selector);
        if table.is_empty() {
            warn!(city = %city, selector = %selector, "No trips match the filter");
        }

        let report = analyze(&table);
        write_report(prompter.output(), &report)?;

        while prompter.wants_raw_data()? {
            let picked = sampler.sample(&table, SAMPLE_SIZE);
            if picked.is_empty() {
                prompter.say("no matching data")?;
            } else {
                write_records(prompter.output(), table.schema(), &picked)?;
            }
        }

        if !prompter.wants_restart()? {
            break;
        }
    }
    Ok(())
}

/// One non-interactive round printed to stdout.
#[tracing::instrument(skip_all, fields(city = %city, selector = %selector))]
fn report(
    sources: &DataSources,
    city: City,
    selector: &FilterSelector,
    format: Format,
) -> Result<()> {
    let table = load_city(sources, city)
        .with_context(|| format!("loading trip data for {city}"))?;
    let table = filter_table(&table, selector);
    let report = analyze(&table);

    let mut stdout = io::stdout().lock();
    match format {
        Format::Text => write_report(&mut stdout, &report)?,
        Format::Json => write_json(&mut stdout, city, selector, &report)?,
    }
    Ok(())
}
