//! Pipeline configuration file support.
//!
//! This module reads the cleaning pipeline configuration from TOML. Every
//! section is optional; the defaults impute every numeric column with its
//! mean, fill text gaps with `"Unknown"`, drop duplicates, normalize, label
//! each column Low/Medium/High and smooth it into three bins.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::algorithms::binning::{BinningOptions, DegeneratePolicy};
use crate::algorithms::discretize::ThresholdScheme;
use crate::transformations::ImputeStrategy;

/// Error type for configuration loading and validation
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(String),

    #[error("Failed to parse config file: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Numeric columns to process. `None` selects every numeric column.
    #[serde(default)]
    pub fields: Option<Vec<String>>,
    /// Replace missing text cells with `text_placeholder`.
    #[serde(default = "default_true")]
    pub fill_text: bool,
    #[serde(default = "default_text_placeholder")]
    pub text_placeholder: String,
    #[serde(default = "default_true")]
    pub drop_duplicates: bool,
    #[serde(default = "default_true")]
    pub normalize: bool,
    /// Columns to min-max scale. `None` scales every numeric column,
    /// independently of `fields`; nulls left by imputation pass through.
    #[serde(default)]
    pub normalize_columns: Option<Vec<String>>,
    #[serde(default)]
    pub impute: ImputeSettings,
    /// Threshold labels computed on raw values, before normalization.
    #[serde(default)]
    pub threshold_categories: Vec<ThresholdCategorySettings>,
    /// Equal-width labels computed after normalization.
    #[serde(default)]
    pub equal_width_categories: EqualWidthSettings,
    #[serde(default)]
    pub smoothing: SmoothingSettings,
}

/// Imputation method names accepted in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImputeMethod {
    #[default]
    Mean,
    Median,
    Constant,
}

/// Missing value settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImputeSettings {
    #[serde(default)]
    pub strategy: ImputeMethod,
    /// Fill value for the `constant` strategy.
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub columns: Option<Vec<String>>,
}

impl ImputeSettings {
    pub fn strategy(&self) -> Result<ImputeStrategy, ConfigError> {
        match (self.strategy, self.value) {
            (ImputeMethod::Mean, _) => Ok(ImputeStrategy::Mean),
            (ImputeMethod::Median, _) => Ok(ImputeStrategy::Median),
            (ImputeMethod::Constant, Some(value)) => Ok(ImputeStrategy::Constant(value)),
            (ImputeMethod::Constant, None) => Err(ConfigError::Invalid(
                "impute.value must be set for the 'constant' strategy".to_string(),
            )),
        }
    }
}

/// Fixed-threshold labels for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdCategorySettings {
    pub column: String,
    pub thresholds: Vec<f64>,
    pub labels: Vec<String>,
}

impl ThresholdCategorySettings {
    pub fn scheme(&self) -> Result<ThresholdScheme, ConfigError> {
        ThresholdScheme::new(self.thresholds.clone(), self.labels.clone()).map_err(|e| {
            ConfigError::Invalid(format!("threshold categories for '{}': {}", self.column, e))
        })
    }
}

/// Equal-width labels; one bin per label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EqualWidthSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_category_labels")]
    pub labels: Vec<String>,
    #[serde(default)]
    pub columns: Option<Vec<String>>,
}

impl Default for EqualWidthSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            labels: default_category_labels(),
            columns: None,
        }
    }
}

/// Bin smoothing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothingSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_bins")]
    pub bins: usize,
    #[serde(default)]
    pub columns: Option<Vec<String>>,
    #[serde(default)]
    pub degenerate: DegeneratePolicy,
}

impl SmoothingSettings {
    pub fn options(&self) -> BinningOptions {
        BinningOptions::new(self.bins).with_degenerate_policy(self.degenerate)
    }
}

impl Default for SmoothingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            bins: default_bins(),
            columns: None,
            degenerate: DegeneratePolicy::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_text_placeholder() -> String {
    "Unknown".to_string()
}

fn default_bins() -> usize {
    3
}

fn default_category_labels() -> Vec<String> {
    ["Low", "Medium", "High"].iter().map(|s| s.to_string()).collect()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fields: None,
            fill_text: true,
            text_placeholder: default_text_placeholder(),
            drop_duplicates: true,
            normalize: true,
            normalize_columns: None,
            impute: ImputeSettings::default(),
            threshold_categories: Vec::new(),
            equal_width_categories: EqualWidthSettings::default(),
            smoothing: SmoothingSettings::default(),
        }
    }
}

impl PipelineConfig {
    /// Load and validate a configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(PipelineConfig)` if the file was read, parsed and validated
    /// * `Err(ConfigError)` otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Read(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PipelineConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.impute.strategy()?;

        for settings in &self.threshold_categories {
            settings.scheme()?;
        }

        if self.equal_width_categories.enabled && self.equal_width_categories.labels.is_empty() {
            return Err(ConfigError::Invalid(
                "equal_width_categories.labels must not be empty".to_string(),
            ));
        }

        if self.smoothing.enabled && self.smoothing.bins < 1 {
            return Err(ConfigError::Invalid(format!(
                "smoothing.bins must be at least 1, got {}",
                self.smoothing.bins
            )));
        }

        Ok(())
    }
}
