//! Summary of what a pipeline run changed.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::algorithms::stats::NoiseReport;

/// Fill applied to one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImputationSummary {
    pub column: String,
    pub fill_value: f64,
    pub filled: usize,
}

/// Label counts for one category column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub source: String,
    pub column: String,
    pub counts: BTreeMap<String, usize>,
}

/// Binning outcome for one smoothed column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmoothingSummary {
    pub column: String,
    pub bins: usize,
    pub edges: Vec<f64>,
    pub bin_means: BTreeMap<String, f64>,
    pub bin_counts: Vec<usize>,
    pub noise: NoiseReport,
}

/// Everything a pipeline run reports, in stage order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleaningReport {
    pub rows_loaded: usize,
    pub columns_loaded: usize,
    pub missing_values: Vec<(String, usize)>,
    pub imputed: Vec<ImputationSummary>,
    pub text_cells_filled: usize,
    pub rows_before_dedup: usize,
    pub rows_after_dedup: usize,
    pub normalized_columns: Vec<String>,
    pub categories: Vec<CategorySummary>,
    pub smoothing: Vec<SmoothingSummary>,
}

impl CleaningReport {
    pub fn duplicates_removed(&self) -> usize {
        self.rows_before_dedup.saturating_sub(self.rows_after_dedup)
    }

    pub fn total_missing(&self) -> usize {
        self.missing_values.iter().map(|(_, count)| count).sum()
    }

    pub fn smoothing_for(&self, column: &str) -> Option<&SmoothingSummary> {
        self.smoothing.iter().find(|s| s.column == column)
    }

    pub fn categories_for(&self, column: &str) -> Option<&CategorySummary> {
        self.categories.iter().find(|c| c.column == column)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn fmt_std(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.3}", v))
}

impl fmt::Display for CleaningReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Loaded {} rows x {} columns", self.rows_loaded, self.columns_loaded)?;
        writeln!(f, "Missing values: {}", self.total_missing())?;
        for (column, count) in self.missing_values.iter().filter(|(_, c)| *c > 0) {
            writeln!(f, "  {}: {}", column, count)?;
        }

        for imputed in &self.imputed {
            writeln!(
                f,
                "Filled {} missing in {} with {:.3}",
                imputed.filled, imputed.column, imputed.fill_value
            )?;
        }
        if self.text_cells_filled > 0 {
            writeln!(f, "Filled {} missing text cells", self.text_cells_filled)?;
        }

        writeln!(
            f,
            "Rows before dedup: {}, after: {} ({} duplicates removed)",
            self.rows_before_dedup,
            self.rows_after_dedup,
            self.duplicates_removed()
        )?;

        if !self.normalized_columns.is_empty() {
            writeln!(f, "Normalized: {}", self.normalized_columns.join(", "))?;
        }

        for category in &self.categories {
            let counts: Vec<String> = category
                .counts
                .iter()
                .map(|(label, count)| format!("{}={}", label, count))
                .collect();
            writeln!(f, "{}: {}", category.column, counts.join(", "))?;
        }

        for smoothing in &self.smoothing {
            let means: Vec<String> = smoothing
                .bin_means
                .iter()
                .map(|(label, mean)| format!("{}={:.3}", label, mean))
                .collect();
            writeln!(f, "{} bin means: {}", smoothing.column, means.join(", "))?;

            match smoothing.noise.reduction_pct {
                Some(pct) => writeln!(
                    f,
                    "{}: Noise reduced by {:.1}% (std: {} -> {})",
                    smoothing.column,
                    pct,
                    fmt_std(smoothing.noise.original_std),
                    fmt_std(smoothing.noise.smoothed_std)
                )?,
                None => writeln!(f, "{}: no spread to reduce", smoothing.column)?,
            }
        }

        Ok(())
    }
}
