//! Data transformation and cleaning utilities.
//!
//! This module provides the column-level operations of the cleaning pipeline:
//! missing value imputation, duplicate removal and min-max normalization over
//! polars DataFrames.
//!
//! # Modules
//!
//! - [`cleaning`]: Impute missing values, fill text gaps, remove duplicates
//! - [`columns`]: Typed column access and replacement
//! - [`normalization`]: Min-max scaling into `[0, 1]`
//!
//! # Example
//!
//! ```no_run
//! use score_clean::transformations::{impute_column, remove_duplicates, ImputeStrategy};
//! use polars::prelude::*;
//!
//! # fn example(df: DataFrame) -> Result<(), score_clean::transformations::TransformError> {
//! let mut cleaned = remove_duplicates(&df)?;
//! impute_column(&mut cleaned, "Math", ImputeStrategy::Mean)?;
//! # Ok(())
//! # }
//! ```

pub mod cleaning;
pub mod columns;
pub mod error;
pub mod normalization;

pub use cleaning::{
    fill_text_nulls, impute_column, impute_missing, remove_duplicates, ImputeStrategy,
    ImputedColumn,
};
pub use columns::{dense_values, missing_counts, numeric_columns, numeric_values};
pub use error::{TransformError, TransformResult};
pub use normalization::{min_max_normalize, normalize_column, MinMaxRange};
