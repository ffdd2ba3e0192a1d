//! Configurable cleaning pipeline over tabular score data.
//!
//! - [`config`]: TOML pipeline configuration
//! - [`pipeline`]: Stage execution over a DataFrame
//! - [`report`]: Serializable summary of a run

pub mod config;
pub mod pipeline;
pub mod report;

pub use config::{
    ConfigError, EqualWidthSettings, ImputeMethod, ImputeSettings, PipelineConfig,
    SmoothingSettings, ThresholdCategorySettings,
};
pub use pipeline::{clean_csv, CleaningPipeline, PipelineOutput};
pub use report::{CategorySummary, CleaningReport, ImputationSummary, SmoothingSummary};
