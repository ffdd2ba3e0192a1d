use anyhow::{Context, Result};
use log::{debug, info, warn};
use polars::prelude::*;
use std::fs;
use std::path::Path;

use crate::algorithms::binning::smooth_with;
use crate::algorithms::discretize::{equal_width_categories, value_counts};
use crate::algorithms::stats::NoiseReport;
use crate::io::loaders;
use crate::preprocessing::config::PipelineConfig;
use crate::preprocessing::report::{
    CategorySummary, CleaningReport, ImputationSummary, SmoothingSummary,
};
use crate::transformations::columns::{
    dense_values, ensure_numeric, missing_counts, numeric_columns, set_float_column,
    set_text_column,
};
use crate::transformations::{
    fill_text_nulls, impute_column, normalize_column, remove_duplicates, TransformError,
    TransformResult,
};

/// Suffix of the label column written by the categorization stages
pub const CATEGORY_SUFFIX: &str = "_Category";
/// Suffix of the smoothed value column
pub const SMOOTHED_SUFFIX: &str = "_Smoothed";
/// Suffix of the bin label column
pub const BIN_SUFFIX: &str = "_Bin";

/// Result of a pipeline run
#[derive(Debug)]
pub struct PipelineOutput {
    pub dataframe: DataFrame,
    pub report: CleaningReport,
}

impl PipelineOutput {
    /// Write the cleaned frame to a CSV file.
    pub fn write_csv(&mut self, path: &Path) -> Result<()> {
        loaders::write_csv(&mut self.dataframe, path)
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_report(&self, path: &Path) -> Result<()> {
        let json = self.report.to_json().context("Failed to serialize report")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        info!("Report written to {}", path.display());
        Ok(())
    }
}

/// Cleaning pipeline: impute, deduplicate, categorize, normalize, smooth.
///
/// Stages always run in this order, each one enabled or tuned through
/// [`PipelineConfig`]:
///
/// 1. Impute missing numeric values (and optionally text cells)
/// 2. Drop duplicate rows
/// 3. Threshold categories on raw values
/// 4. Min-max normalization
/// 5. Equal-width categories on normalized values
/// 6. Bin-mean smoothing
pub struct CleaningPipeline {
    config: PipelineConfig,
}

impl CleaningPipeline {
    /// Create a new pipeline with default configuration
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
        }
    }

    /// Create a pipeline with custom configuration
    pub fn with_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load a CSV file and run every stage on it.
    pub fn process(&self, csv_path: &Path) -> Result<PipelineOutput> {
        let df = loaders::load_csv(csv_path)?;
        self.run(df)
            .with_context(|| format!("Failed to clean {}", csv_path.display()))
    }

    /// Run every stage on an in-memory DataFrame.
    pub fn run(&self, df: DataFrame) -> TransformResult<PipelineOutput> {
        self.config.validate()?;

        let mut df = df;
        let mut report = CleaningReport {
            rows_loaded: df.height(),
            columns_loaded: df.width(),
            missing_values: missing_counts(&df),
            ..Default::default()
        };
        info!(
            "Cleaning {} rows x {} columns ({} missing values)",
            report.rows_loaded,
            report.columns_loaded,
            report.total_missing()
        );

        let fields = self.select(&df, self.config.fields.as_ref())?;
        debug!("Selected fields: {:?}", fields);

        self.impute(&mut df, &fields, &mut report)?;
        let mut df = self.deduplicate(df, &mut report)?;
        self.categorize_thresholds(&mut df, &mut report)?;
        self.normalize(&mut df, &mut report)?;
        self.categorize_equal_width(&mut df, &fields, &mut report)?;
        self.smooth(&mut df, &fields, &mut report)?;

        Ok(PipelineOutput {
            dataframe: df,
            report,
        })
    }

    /// Resolve a column selection, defaulting to every numeric column.
    fn select(&self, df: &DataFrame, columns: Option<&Vec<String>>) -> TransformResult<Vec<String>> {
        match columns {
            Some(columns) => {
                ensure_numeric(df, columns)?;
                Ok(columns.clone())
            }
            None => Ok(numeric_columns(df)),
        }
    }

    fn impute(
        &self,
        df: &mut DataFrame,
        fields: &[String],
        report: &mut CleaningReport,
    ) -> TransformResult<()> {
        let strategy = self.config.impute.strategy()?;
        let columns = match &self.config.impute.columns {
            Some(columns) => self.select(df, Some(columns))?,
            None => fields.to_vec(),
        };

        for column in &columns {
            let imputed = impute_column(df, column, strategy)?;
            if imputed.filled > 0 {
                info!(
                    "Filled {} missing values in '{}' with {:.3}",
                    imputed.filled, column, imputed.fill_value
                );
            }
            report.imputed.push(ImputationSummary {
                column: column.clone(),
                fill_value: imputed.fill_value,
                filled: imputed.filled,
            });
        }

        if self.config.fill_text {
            report.text_cells_filled = fill_text_nulls(df, &self.config.text_placeholder)?;
        }
        Ok(())
    }

    fn deduplicate(&self, df: DataFrame, report: &mut CleaningReport) -> TransformResult<DataFrame> {
        report.rows_before_dedup = df.height();
        let df = if self.config.drop_duplicates {
            remove_duplicates(&df)?
        } else {
            df
        };
        report.rows_after_dedup = df.height();

        if report.duplicates_removed() > 0 {
            info!("Dropped {} duplicate rows", report.duplicates_removed());
        }
        Ok(df)
    }

    fn categorize_thresholds(
        &self,
        df: &mut DataFrame,
        report: &mut CleaningReport,
    ) -> TransformResult<()> {
        for settings in &self.config.threshold_categories {
            let scheme = settings.scheme()?;
            let values = dense_values(df, &settings.column)?;
            let labels = scheme.categorize_all(&values);
            let target = format!("{}{}", settings.column, CATEGORY_SUFFIX);

            report.categories.push(CategorySummary {
                source: settings.column.clone(),
                column: target.clone(),
                counts: value_counts(labels.iter().map(String::as_str)),
            });
            set_text_column(df, &target, labels)?;
        }
        Ok(())
    }

    fn normalize(&self, df: &mut DataFrame, report: &mut CleaningReport) -> TransformResult<()> {
        if !self.config.normalize {
            return Ok(());
        }

        let columns = self.select(df, self.config.normalize_columns.as_ref())?;
        for column in &columns {
            if let Some(range) = normalize_column(df, column)? {
                debug!("Normalized '{}' from [{}, {}]", column, range.min, range.max);
                if range.min == range.max {
                    warn!("Column '{}' is constant; normalized to 0", column);
                }
            }
            report.normalized_columns.push(column.clone());
        }
        Ok(())
    }

    fn categorize_equal_width(
        &self,
        df: &mut DataFrame,
        fields: &[String],
        report: &mut CleaningReport,
    ) -> TransformResult<()> {
        let settings = &self.config.equal_width_categories;
        if !settings.enabled {
            return Ok(());
        }

        let columns = match &settings.columns {
            Some(columns) => self.select(df, Some(columns))?,
            None => fields.to_vec(),
        };

        for column in &columns {
            let values = dense_values(df, column)?;
            let labels = equal_width_categories(&values, &settings.labels)
                .map_err(|e| TransformError::binning(column, e))?;
            let target = format!("{}{}", column, CATEGORY_SUFFIX);

            let counts = value_counts(labels.iter().map(String::as_str));
            debug!("{} categories: {:?}", column, counts);
            report.categories.push(CategorySummary {
                source: column.clone(),
                column: target.clone(),
                counts,
            });
            set_text_column(df, &target, labels)?;
        }
        Ok(())
    }

    fn smooth(
        &self,
        df: &mut DataFrame,
        fields: &[String],
        report: &mut CleaningReport,
    ) -> TransformResult<()> {
        let settings = &self.config.smoothing;
        if !settings.enabled {
            return Ok(());
        }

        let columns = match &settings.columns {
            Some(columns) => self.select(df, Some(columns))?,
            None => fields.to_vec(),
        };
        let options = settings.options();

        for column in &columns {
            let values = dense_values(df, column)?;
            let result =
                smooth_with(&values, &options).map_err(|e| TransformError::binning(column, e))?;
            let noise = NoiseReport::compare(&values, &result.smoothed);

            if let Some(pct) = noise.reduction_pct {
                info!("{}: noise reduced by {:.1}%", column, pct);
            }

            let bin_labels: Vec<String> = result.assignment.iter().map(|l| l.to_string()).collect();
            report.smoothing.push(SmoothingSummary {
                column: column.clone(),
                bins: result.bins(),
                edges: result.edges.clone(),
                bin_means: result.labeled_means(),
                bin_counts: result.counts.clone(),
                noise,
            });

            set_float_column(df, &format!("{}{}", column, SMOOTHED_SUFFIX), result.smoothed)?;
            set_text_column(df, &format!("{}{}", column, BIN_SUFFIX), bin_labels)?;
        }
        Ok(())
    }
}

impl Default for CleaningPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to clean a CSV file with a configuration
pub fn clean_csv(csv_path: &Path, config: PipelineConfig) -> Result<PipelineOutput> {
    CleaningPipeline::with_config(config).process(csv_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::config::{SmoothingSettings, ThresholdCategorySettings};

    fn scores() -> DataFrame {
        df!(
            "Name" => [Some("Ann"), Some("Bob"), Some("Cid"), Some("Bob"), None, Some("Eve")],
            "Math" => [Some(40.0), Some(55.0), None, Some(55.0), Some(90.0), Some(100.0)],
            "Science" => [Some(45.0), Some(72.0), Some(88.0), Some(72.0), Some(95.0), None]
        )
        .unwrap()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_pipeline() {
        let output = CleaningPipeline::new().run(scores()).unwrap();
        let report = &output.report;

        assert_eq!(report.rows_loaded, 6);
        assert_eq!(report.total_missing(), 3);
        assert_eq!(report.text_cells_filled, 1);
        assert_eq!(report.duplicates_removed(), 1);
        assert_eq!(output.dataframe.height(), 5);

        // Math mean over 40, 55, 55, 90, 100
        assert_eq!(report.imputed[0].fill_value, 68.0);

        let math = dense_values(&output.dataframe, "Math").unwrap();
        assert!(math.iter().all(|v| (0.0..=1.0).contains(v)));

        for column in ["Math_Category", "Science_Category", "Math_Smoothed", "Math_Bin"] {
            assert!(output.dataframe.column(column).is_ok(), "missing {}", column);
        }
        assert_eq!(report.smoothing.len(), 2);
    }

    #[test]
    fn test_threshold_categories_use_raw_values() {
        let config = PipelineConfig {
            fields: Some(strings(&["Math", "Science"])),
            threshold_categories: vec![ThresholdCategorySettings {
                column: "Science".into(),
                thresholds: vec![50.0, 70.0, 90.0],
                labels: strings(&["Poor", "Average", "Good", "Excellent"]),
            }],
            equal_width_categories: crate::preprocessing::config::EqualWidthSettings {
                enabled: false,
                ..Default::default()
            },
            smoothing: SmoothingSettings {
                columns: Some(strings(&["Math"])),
                ..Default::default()
            },
            ..Default::default()
        };

        let output = CleaningPipeline::with_config(config).run(scores()).unwrap();
        let categories = output.report.categories_for("Science_Category").unwrap();

        // Science after imputation and dedup: 45, 72, 88, 95, 74.4
        assert_eq!(categories.counts.get("Poor"), Some(&1));
        assert_eq!(categories.counts.get("Good"), Some(&3));
        assert_eq!(categories.counts.get("Excellent"), Some(&1));
        assert_eq!(output.report.smoothing.len(), 1);
        assert!(output.dataframe.column("Science_Smoothed").is_err());
    }

    #[test]
    fn test_smoothing_reduces_noise() {
        let output = CleaningPipeline::new().run(scores()).unwrap();
        let math = output.report.smoothing_for("Math").unwrap();

        assert_eq!(math.bins, 3);
        assert!(math.noise.reduction_pct.unwrap() > 0.0);
        assert_eq!(math.bin_counts.iter().sum::<usize>(), 5);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let config = PipelineConfig {
            fields: Some(strings(&["Art"])),
            ..Default::default()
        };
        let result = CleaningPipeline::with_config(config).run(scores());
        assert!(matches!(result, Err(TransformError::ColumnNotFound(_))));
    }

    #[test]
    fn test_text_field_is_rejected() {
        let config = PipelineConfig {
            fields: Some(strings(&["Name"])),
            ..Default::default()
        };
        let result = CleaningPipeline::with_config(config).run(scores());
        assert!(matches!(result, Err(TransformError::NotNumeric { .. })));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = PipelineConfig {
            smoothing: SmoothingSettings {
                bins: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        let result = CleaningPipeline::with_config(config).run(scores());
        assert!(matches!(result, Err(TransformError::Config(_))));
    }

    #[test]
    fn test_keep_duplicates_when_disabled() {
        let config = PipelineConfig {
            drop_duplicates: false,
            ..Default::default()
        };
        let output = CleaningPipeline::with_config(config).run(scores()).unwrap();
        assert_eq!(output.dataframe.height(), 6);
        assert_eq!(output.report.duplicates_removed(), 0);
    }
}
