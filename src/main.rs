//! CLI entry point for the fastest races report.
//!
//! Reads a CSV of ranking rows extracted from a results list and summarizes,
//! per race, the fastest time and how many runners beat each minute mark.

use anyhow::Result;
use clap::{Parser, Subcommand};
use fastest_races::analyzers::thresholds::derive_thresholds;
use fastest_races::{
    build_report,
    output::{DEFAULT_CSS_FILE, DEFAULT_TITLE, print_json, print_pretty, write_html_report, write_report_csv},
    parser::{DEFAULT_COUNTRY, NormalizeOptions, RawRow, normalize_rows, read_raw_rows},
};
use std::ffi::OsStr;
use std::fs::File;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "fastest_races")]
#[command(about = "Summarize race depth by venue and date", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the venue/date report from a CSV of ranking rows
    Report {
        /// CSV file with at least Venue, Perf and Date columns
        #[arg(value_name = "INPUT")]
        input: String,

        /// CSV file to write the report to
        #[arg(short, long, default_value = "performance_analysis.csv")]
        output: String,

        /// Optional: also write an HTML report to this path
        #[arg(long)]
        html: Option<String>,

        /// Title of the HTML report
        #[arg(long, default_value = DEFAULT_TITLE)]
        title: String,

        /// Stylesheet linked from the HTML report
        #[arg(long, default_value = DEFAULT_CSS_FILE)]
        css: String,

        /// Log the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Country used for venues without a ", COUNTRY" suffix
        #[arg(long, default_value = DEFAULT_COUNTRY)]
        default_country: String,
    },
    /// Show the minute thresholds a CSV of ranking rows would be bucketed against
    Thresholds {
        /// CSV file with at least Venue, Perf and Date columns
        #[arg(value_name = "INPUT")]
        input: String,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/fastest_races.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("fastest_races.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

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

    match cli.command {
        Commands::Report {
            input,
            output,
            html,
            title,
            css,
            json,
            default_country,
        } => {
            let rows = load_rows(&input)?;
            let options = NormalizeOptions {
                default_country,
                ..Default::default()
            };

            let table = build_report(&rows, &options)?;
            if table.is_empty() {
                warn!(
                    input = %input,
                    "No valid performance data found. The Perf column may not hold clock times, or the list is empty."
                );
                return Ok(());
            }

            print_pretty(&table);
            if json {
                print_json(&table)?;
            }

            write_report_csv(&output, &table)?;
            info!(output = %output, rows = table.len(), "CSV report written");

            if let Some(html) = html {
                write_html_report(&html, &table, &title, &css)?;
            }
        }
        Commands::Thresholds { input } => {
            let rows = load_rows(&input)?;
            let results = normalize_rows(&rows, &NormalizeOptions::default())?;
            let times: Vec<u32> = results.iter().map(|r| r.time_seconds).collect();

            match derive_thresholds(&times) {
                Some(thresholds) => {
                    for threshold in thresholds.as_slice() {
                        info!(
                            minutes = threshold.minutes(),
                            label = %threshold.label(),
                            "Threshold"
                        );
                    }
                    info!(count = thresholds.len(), results = results.len(), "Threshold summary");
                }
                None => warn!(input = %input, "No timed results, no thresholds"),
            }
        }
    }

    Ok(())
}

/// Loads raw ranking rows from a CSV file.
#[tracing::instrument(fields(source = %path))]
fn load_rows(path: &str) -> Result<Vec<RawRow>> {
    let file = File::open(path)?;
    let rows = read_raw_rows(file)?;
    info!(rows = rows.len(), "Ranking rows loaded");
    Ok(rows)
}
