//! Summary statistics for smoothing reports.

use serde::{Deserialize, Serialize};

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median, `None` for an empty slice.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let count = sorted.len();
    if count % 2 == 0 {
        Some((sorted[count / 2 - 1] + sorted[count / 2]) / 2.0)
    } else {
        Some(sorted[count / 2])
    }
}

/// Sample standard deviation (n - 1 denominator), `None` below two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }

    let mean = mean(values)?;
    let variance = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// Spread of a column before and after smoothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseReport {
    pub original_std: Option<f64>,
    pub smoothed_std: Option<f64>,
    /// `(original - smoothed) / original * 100`; `None` when the original
    /// spread is zero or undefined.
    pub reduction_pct: Option<f64>,
}

impl NoiseReport {
    pub fn compare(original: &[f64], smoothed: &[f64]) -> Self {
        let original_std = sample_std(original);
        let smoothed_std = sample_std(smoothed);
        let reduction_pct = match (original_std, smoothed_std) {
            (Some(o), Some(s)) if o > 0.0 => Some((o - s) / o * 100.0),
            _ => None,
        };

        Self {
            original_std,
            smoothed_std,
            reduction_pct,
        }
    }
}
