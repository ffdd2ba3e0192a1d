//! Typed access to DataFrame columns.

use polars::prelude::*;

use super::error::{TransformError, TransformResult};

/// Whether a dtype holds plain numbers the pipeline can operate on.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    dtype.is_primitive_numeric()
}

/// Names of the numeric columns, in frame order.
pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|c| is_numeric_dtype(c.dtype()))
        .map(|c| c.name().to_string())
        .collect()
}

/// Names of the text columns, in frame order.
pub fn text_columns(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|c| c.dtype() == &DataType::String)
        .map(|c| c.name().to_string())
        .collect()
}

/// Null count per column, in frame order.
pub fn missing_counts(df: &DataFrame) -> Vec<(String, usize)> {
    df.get_columns()
        .iter()
        .map(|c| (c.name().to_string(), c.null_count()))
        .collect()
}

pub(crate) fn numeric_column<'a>(df: &'a DataFrame, name: &str) -> TransformResult<&'a Column> {
    let column = df
        .column(name)
        .map_err(|_| TransformError::ColumnNotFound(name.to_string()))?;

    if !is_numeric_dtype(column.dtype()) {
        return Err(TransformError::NotNumeric {
            column: name.to_string(),
            dtype: column.dtype().to_string(),
        });
    }
    Ok(column)
}

/// Check that every name refers to an existing numeric column.
pub fn ensure_numeric(df: &DataFrame, names: &[String]) -> TransformResult<()> {
    for name in names {
        numeric_column(df, name)?;
    }
    Ok(())
}

/// Values of a numeric column as `f64`, nulls preserved.
pub fn numeric_values(df: &DataFrame, name: &str) -> TransformResult<Vec<Option<f64>>> {
    let column = numeric_column(df, name)?;
    let floats = column.cast(&DataType::Float64)?;
    let values = floats.f64()?.into_iter().collect();
    Ok(values)
}

/// Values of a numeric column that must not contain nulls.
pub fn dense_values(df: &DataFrame, name: &str) -> TransformResult<Vec<f64>> {
    let values = numeric_values(df, name)?;
    let missing = values.iter().filter(|v| v.is_none()).count();
    if missing > 0 {
        return Err(TransformError::MissingValues {
            column: name.to_string(),
            count: missing,
        });
    }
    Ok(values.into_iter().flatten().collect())
}

/// Insert or replace a `Float64` column.
pub fn set_float_column(df: &mut DataFrame, name: &str, values: Vec<f64>) -> TransformResult<()> {
    df.with_column(Column::from(Series::new(name.into(), values)))?;
    Ok(())
}

/// Insert or replace a `String` column.
pub fn set_text_column(df: &mut DataFrame, name: &str, values: Vec<String>) -> TransformResult<()> {
    df.with_column(Column::from(Series::new(name.into(), values)))?;
    Ok(())
}
