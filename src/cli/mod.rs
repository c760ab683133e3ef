//! Command-line interface for the window filter pipeline.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::FilterMode;
use crate::PipelineConfig;

#[derive(Parser)]
#[command(name = "window-filter")]
#[command(about = "Sliding-window median filtering for CSV series", version)]
pub struct Cli {
    /// Path to YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Median-filter CSV columns
    Median {
        /// Input CSV file
        input: PathBuf,
        /// Output CSV file
        output: PathBuf,
        /// Window size (non-positive values produce empty columns)
        #[arg(short, long, allow_negative_numbers = true)]
        kernel: Option<i64>,
        /// Filter variant
        #[arg(short, long, value_enum)]
        mode: Option<FilterMode>,
        /// Columns to filter (repeatable; defaults to all)
        #[arg(short = 'C', long = "column")]
        columns: Vec<String>,
    },

    /// Write every window of one CSV column as a row
    Windows {
        /// Input CSV file
        input: PathBuf,
        /// Output CSV file
        output: PathBuf,
        /// Window size (non-positive values produce no windows)
        #[arg(short, long, allow_negative_numbers = true)]
        kernel: Option<i64>,
        /// Column to split into windows (defaults to the first)
        #[arg(short = 'C', long)]
        column: Option<String>,
    },

    /// Write the default configuration as YAML
    InitConfig {
        /// Destination YAML file
        path: PathBuf,
    },
}

/// Create a spinner for indeterminate operations
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Print a summary box
fn print_summary(title: &str, items: &[(&str, String)]) {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║ {:<60} ║", title);
    println!("╠══════════════════════════════════════════════════════════════╣");
    for (key, value) in items {
        let display_value = if value.chars().count() > 38 {
            let head: String = value.chars().take(35).collect();
            format!("{}...", head)
        } else {
            value.clone()
        };
        println!("║ {:<20}: {:<38} ║", key, display_value);
    }
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
}

/// Resolve the window size from the command line, falling back to the config.
///
/// Zero and negative kernels collapse to `0`, which every filter answers with
/// an empty result.
fn resolve_kernel(requested: Option<i64>, configured: usize) -> usize {
    match requested {
        None => configured,
        Some(k) if k > 0 => usize::try_from(k).unwrap_or(usize::MAX),
        Some(k) => {
            warn!("Kernel must be positive, got {}; output will be empty", k);
            0
        }
    }
}

pub fn run() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity (must come first)
    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .format_timestamp_secs()
        .init();

    // Load config
    let config = match &cli.config {
        Some(path) => match PipelineConfig::from_yaml(path) {
            Ok(cfg) => {
                info!("Loaded config from: {}", path.display());
                cfg
            }
            Err(e) => {
                warn!("Failed to load config from {}: {}, using defaults", path.display(), e);
                PipelineConfig::default()
            }
        },
        None => PipelineConfig::default(),
    };

    // Dispatch to subcommands
    match cli.command {
        Commands::Median { input, output, kernel, mode, columns } => {
            cmd_median(&input, &output, kernel, mode, columns, config);
        }
        Commands::Windows { input, output, kernel, column } => {
            cmd_windows(&input, &output, kernel, column, &config);
        }
        Commands::InitConfig { path } => {
            cmd_init_config(&path, &config);
        }
    }
}

fn cmd_median(
    input: &Path,
    output: &Path,
    kernel: Option<i64>,
    mode: Option<FilterMode>,
    columns: Vec<String>,
    mut config: PipelineConfig,
) {
    use crate::processors::batch;

    let start = Instant::now();

    // Command-line values override the config file
    config.filter.kernel = resolve_kernel(kernel, config.filter.kernel);
    if let Some(mode) = mode {
        config.filter.mode = mode;
    }
    if !columns.is_empty() {
        config.csv.columns = columns;
    }

    println!("Filtering {} -> {}", input.display(), output.display());
    println!("Kernel: {}, mode: {:?}", config.filter.kernel, config.filter.mode);

    let spinner = create_spinner("Applying median filter...");

    match batch::filter_csv(input, output, &config) {
        Ok(report) => {
            spinner.finish_and_clear();

            print_summary(
                "Median Filter Complete",
                &[
                    ("Input file", input.display().to_string()),
                    ("Output file", output.display().to_string()),
                    ("Columns", report.columns.to_string()),
                    ("Samples in", report.input_len.to_string()),
                    ("Samples out", report.output_len.to_string()),
                    ("Kernel", config.filter.kernel.to_string()),
                    ("Duration", format!("{:.2?}", start.elapsed())),
                ],
            );
        }
        Err(e) => {
            spinner.finish_and_clear();
            error!("Median filter failed: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn cmd_windows(
    input: &Path,
    output: &Path,
    kernel: Option<i64>,
    column: Option<String>,
    config: &PipelineConfig,
) {
    use crate::processors::batch;

    let start = Instant::now();
    let kernel = resolve_kernel(kernel, config.filter.kernel);

    println!("Extracting windows of {} from {}", kernel, input.display());

    let spinner = create_spinner("Extracting windows...");

    match batch::extract_csv(input, output, column.as_deref(), kernel, &config.csv) {
        Ok(report) => {
            spinner.finish_and_clear();

            print_summary(
                "Window Extraction Complete",
                &[
                    ("Input file", input.display().to_string()),
                    ("Column", report.column),
                    ("Output file", output.display().to_string()),
                    ("Samples", report.input_len.to_string()),
                    ("Windows", report.windows.to_string()),
                    ("Kernel", kernel.to_string()),
                    ("Duration", format!("{:.2?}", start.elapsed())),
                ],
            );
        }
        Err(e) => {
            spinner.finish_and_clear();
            error!("Window extraction failed: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn cmd_init_config(path: &Path, config: &PipelineConfig) {
    match config.to_yaml(path) {
        Ok(()) => println!("Wrote configuration to {}", path.display()),
        Err(e) => {
            error!("Failed to write configuration: {}", e);
            std::process::exit(1);
        }
    }
}
