use anyhow::{Context, Result};
use log::info;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Read a CSV file with a header row into a DataFrame.
///
/// Empty fields become nulls; column types are inferred by polars, so integer
/// score columns arrive as `Int64` and are widened to `Float64` by the
/// transforms that touch them.
pub fn load_csv(csv_path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(csv_path.into()))
        .with_context(|| format!("Failed to open {}", csv_path.display()))?
        .finish()
        .context("Failed to parse CSV into DataFrame")?;

    info!(
        "Loaded {}: {} rows x {} columns",
        csv_path.display(),
        df.height(),
        df.width()
    );
    Ok(df)
}

/// Write a DataFrame to CSV with a header row.
pub fn write_csv(df: &mut DataFrame, csv_path: &Path) -> Result<()> {
    let mut file = File::create(csv_path)
        .with_context(|| format!("Failed to create {}", csv_path.display()))?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .context("Failed to write DataFrame as CSV")?;

    info!("Wrote {} rows to {}", df.height(), csv_path.display());
    Ok(())
}
