//! Score cleaning command-line tool.
//!
//! # Usage
//!
//! ```bash
//! clean-dataset <input.csv> [config.toml] [output.csv]
//! ```
//!
//! Without a config file the default pipeline is used: mean imputation,
//! duplicate removal, min-max normalization, Low/Medium/High categories and
//! three-bin smoothing for every numeric column.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log level (default: info)
//! - `CLEANING_REPORT_JSON`: Path to write the JSON report to

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use score_clean::preprocessing::{CleaningPipeline, PipelineConfig};

/// Positional command-line arguments.
#[derive(Debug, PartialEq)]
struct Args {
    input: PathBuf,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
}

impl Args {
    /// Parse `argv` (program name first); `None` without an input path.
    fn parse(args: &[String]) -> Option<Self> {
        Some(Self {
            input: args.get(1).map(PathBuf::from)?,
            config: args.get(2).map(PathBuf::from),
            output: args.get(3).map(PathBuf::from),
        })
    }
}

fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let argv: Vec<String> = env::args().collect();
    let Some(args) = Args::parse(&argv) else {
        let program = argv.first().map(String::as_str).unwrap_or("clean-dataset");
        eprintln!("Usage: {} <input.csv> [config.toml] [output.csv]", program);
        std::process::exit(2);
    };

    let config = match &args.config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    info!("Cleaning {} with {:?}", args.input.display(), args.config);

    let mut output = CleaningPipeline::with_config(config).process(&args.input)?;

    println!("=== Cleaning report ===");
    print!("{}", output.report);
    println!();
    println!("{}", output.dataframe);

    if let Some(path) = &args.output {
        output.write_csv(path)?;
        println!("Cleaned dataset written to {}", path.display());
    }

    if let Some(report_path) = env::var_os("CLEANING_REPORT_JSON") {
        output.write_report(&PathBuf::from(report_path))?;
    }

    Ok(())
}
