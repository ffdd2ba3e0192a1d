//! Min-max scaling of numeric columns into `[0, 1]`.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::columns::numeric_column;
use super::error::TransformResult;

/// Observed range of a column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMaxRange {
    pub min: f64,
    pub max: f64,
}

impl MinMaxRange {
    /// Range of the values, `None` when empty.
    pub fn fit(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self { min, max })
    }

    /// Scale a value into `[0, 1]`. A zero-width range maps everything to 0.
    pub fn transform(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 {
            0.0
        } else {
            (value - self.min) / span
        }
    }
}

pub fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    match MinMaxRange::fit(values) {
        Some(range) => values.iter().map(|&v| range.transform(v)).collect(),
        None => Vec::new(),
    }
}

/// Normalize a numeric column in place and return the range it was fitted on.
///
/// The range is fitted on the present values; nulls stay null. A column
/// without any present value is left untouched and yields `None`.
pub fn normalize_column(df: &mut DataFrame, name: &str) -> TransformResult<Option<MinMaxRange>> {
    let floats = numeric_column(df, name)?.cast(&DataType::Float64)?;
    let values = floats.f64()?;
    let (Some(min), Some(max)) = (values.min(), values.max()) else {
        return Ok(None);
    };

    let range = MinMaxRange { min, max };
    let scaled: Float64Chunked = values
        .into_iter()
        .map(|v| v.map(|v| range.transform(v)))
        .collect();
    df.with_column(scaled.with_name(name.into()).into_series())?;
    Ok(Some(range))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transformations::columns::{dense_values, numeric_values};

    #[test]
    fn test_min_max_normalize() {
        assert_eq!(min_max_normalize(&[10.0, 15.0, 20.0]), vec![0.0, 0.5, 1.0]);
        assert_eq!(min_max_normalize(&[]), Vec::<f64>::new());
    }

    #[test]
    fn test_constant_values_map_to_zero() {
        assert_eq!(min_max_normalize(&[3.0, 3.0]), vec![0.0, 0.0]);
    }

    #[test]
    fn test_normalize_column() {
        let mut df = df!("Math" => [40i64, 60, 100]).unwrap();
        let range = normalize_column(&mut df, "Math").unwrap().unwrap();

        assert_eq!(range, MinMaxRange { min: 40.0, max: 100.0 });
        let values = dense_values(&df, "Math").unwrap();
        assert_eq!(values[0], 0.0);
        assert!((values[1] - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(values[2], 1.0);
    }

    #[test]
    fn test_normalize_column_keeps_nulls() {
        let mut df = df!("English" => [Some(40.0), None, Some(80.0), Some(60.0)]).unwrap();
        let range = normalize_column(&mut df, "English").unwrap();

        assert_eq!(range, Some(MinMaxRange { min: 40.0, max: 80.0 }));
        assert_eq!(
            numeric_values(&df, "English").unwrap(),
            vec![Some(0.0), None, Some(1.0), Some(0.5)]
        );
    }

    #[test]
    fn test_normalize_all_null_column() {
        let mut df = df!("English" => [None::<f64>, None]).unwrap();
        assert_eq!(normalize_column(&mut df, "English").unwrap(), None);
        assert_eq!(df.column("English").unwrap().null_count(), 2);
    }
}
