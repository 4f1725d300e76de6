//! CLI entry point for the bike-share explorer.
//!
//! Provides an interactive exploration session, a one-shot statistics report
//! for scripting, and a listing of the configured city data files.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use bikeshare_explorer::{
    city::City,
    filter::{DayFilter, Filter, MonthFilter},
    interactive::Session,
    loader::Loader,
    output::{export_trips, print_json, write_report},
    stats::TripReport,
};
use clap::{Parser, Subcommand};
use tracing::info;
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
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, global = true, env = "BIKESHARE_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactively pick a city and filters, then browse statistics and raw trips
    Explore,
    /// Print statistics for one city without prompting
    Stats {
        /// chicago, new_york_city or washington
        #[arg(short, long)]
        city: City,

        /// jan, feb, mar, apr, may, june or all
        #[arg(short, long, default_value = "all")]
        month: MonthFilter,

        /// mon, tu, wed, th, fri, sat, sun or all
        #[arg(short, long, default_value = "all")]
        day: DayFilter,

        /// Print the report as JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Also write the filtered trips to this CSV file
        #[arg(short, long)]
        export: Option<PathBuf>,
    },
    /// List the cities and whether their data files are present
    Cities,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bikeshare.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    // stderr stays at warn by default so prompts are not interleaved with logs
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
    let loader = Loader::new(&cli.data_dir);

    match cli.command {
        Commands::Explore => {
            info!(data_dir = %cli.data_dir.display(), "Starting interactive session");
            let stdin = io::stdin();
            let mut session = Session::new(loader, stdin.lock(), io::stdout());
            session.run()?;
        }
        Commands::Stats {
            city,
            month,
            day,
            json,
            export,
        } => {
            let dataset = loader.load(city, Filter::new(month, day))?;
            let report = TripReport::from_dataset(&dataset);

            if json {
                print_json(&report)?;
            } else {
                write_report(&mut io::stdout().lock(), &report)?;
            }

            if let Some(path) = export {
                export_trips(&path, &dataset)?;
            }
        }
        Commands::Cities => {
            for city in City::ALL {
                let status = match loader.resolve(city) {
                    Ok(path) => format!("found ({})", path.display()),
                    Err(_) => "missing".to_string(),
                };
                println!("{:<14} {:<20} {}", city.id(), city.file_name(), status);
            }
        }
    }

    Ok(())
}
