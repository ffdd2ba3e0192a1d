use log::debug;
use polars::prelude::*;

use super::columns::{numeric_column, set_text_column, text_columns};
use super::error::{TransformError, TransformResult};

/// How missing numeric values are filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImputeStrategy {
    Mean,
    Median,
    Constant(f64),
}

/// A column after imputation.
#[derive(Debug, Clone)]
pub struct ImputedColumn {
    /// `Float64` series without nulls, named like the input
    pub series: Series,
    pub fill_value: f64,
    pub filled: usize,
}

/// Fill the nulls of a numeric series.
///
/// The series is cast to `Float64`; mean and median are computed over the
/// present values only. Returns `None` when the strategy needs present values
/// and there are none.
pub fn impute_missing(series: &Series, strategy: ImputeStrategy) -> PolarsResult<Option<ImputedColumn>> {
    let floats = series.cast(&DataType::Float64)?;
    let fill_value = match strategy {
        ImputeStrategy::Mean => floats.mean(),
        ImputeStrategy::Median => floats.median(),
        ImputeStrategy::Constant(value) => Some(value),
    };
    let Some(fill_value) = fill_value else {
        return Ok(None);
    };

    let filled = floats.null_count();
    let series = floats.f64()?.fill_null_with_values(fill_value)?.into_series();
    Ok(Some(ImputedColumn {
        series,
        fill_value,
        filled,
    }))
}

/// Impute one numeric column in place, returning the fill value and count.
pub fn impute_column(
    df: &mut DataFrame,
    name: &str,
    strategy: ImputeStrategy,
) -> TransformResult<ImputedColumn> {
    let column = numeric_column(df, name)?;
    let imputed = impute_missing(column.as_materialized_series(), strategy)?
        .ok_or_else(|| TransformError::EmptyColumn(name.to_string()))?;

    df.with_column(imputed.series.clone())?;
    debug!(
        "Imputed {} values in '{}' with {}",
        imputed.filled, name, imputed.fill_value
    );
    Ok(imputed)
}

/// Replace nulls in every text column with `placeholder`.
///
/// Returns the number of cells filled.
pub fn fill_text_nulls(df: &mut DataFrame, placeholder: &str) -> TransformResult<usize> {
    let mut filled = 0;
    for name in text_columns(df) {
        let column = df.column(&name)?;
        let nulls = column.null_count();
        if nulls == 0 {
            continue;
        }

        let values: Vec<String> = column
            .str()?
            .into_iter()
            .map(|v| v.unwrap_or(placeholder).to_string())
            .collect();
        set_text_column(df, &name, values)?;
        filled += nulls;
    }
    Ok(filled)
}

/// Drop rows that are identical across every column, keeping the first
/// occurrence and the original row order.
pub fn remove_duplicates(df: &DataFrame) -> TransformResult<DataFrame> {
    let unique = df
        .clone()
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?;
    Ok(unique)
}
