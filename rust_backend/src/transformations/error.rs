//! Error types for column transforms.

use polars::prelude::PolarsError;

use crate::algorithms::binning::BinningError;
use crate::preprocessing::config::ConfigError;

/// Result type for column transforms
pub type TransformResult<T> = Result<T, TransformError>;

/// Error type for column transforms
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Column '{column}' is not numeric (dtype {dtype})")]
    NotNumeric { column: String, dtype: String },

    #[error("Column '{0}' has no values to impute from")]
    EmptyColumn(String),

    #[error("Column '{column}' still contains {count} missing values")]
    MissingValues { column: String, count: usize },

    #[error("Binning error in column '{column}': {source}")]
    Binning {
        column: String,
        #[source]
        source: BinningError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

impl TransformError {
    pub fn binning(column: &str, source: BinningError) -> Self {
        TransformError::Binning {
            column: column.to_string(),
            source,
        }
    }
}
