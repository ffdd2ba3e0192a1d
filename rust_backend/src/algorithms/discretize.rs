//! Map numeric values onto ordered category labels.

use std::collections::BTreeMap;

use super::binning::{assign_bins, equal_width_edges, value_range, BinningError};

/// Ascending thresholds with one label per resulting interval.
///
/// A value gets the label of the first threshold it is strictly below; values
/// at or above the last threshold get the open-ended top label.
///
/// ```
/// use score_clean::algorithms::discretize::ThresholdScheme;
///
/// let scheme = ThresholdScheme::grades();
/// assert_eq!(scheme.categorize(49.9), "Poor");
/// assert_eq!(scheme.categorize(70.0), "Good");
/// assert_eq!(scheme.categorize(120.0), "Excellent");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdScheme {
    thresholds: Vec<f64>,
    labels: Vec<String>,
}

impl ThresholdScheme {
    pub fn new(thresholds: Vec<f64>, labels: Vec<String>) -> Result<Self, BinningError> {
        if labels.len() != thresholds.len() + 1 {
            return Err(BinningError::InvalidArgument(format!(
                "{} thresholds need {} labels, got {}",
                thresholds.len(),
                thresholds.len() + 1,
                labels.len()
            )));
        }
        if thresholds.iter().any(|t| !t.is_finite()) {
            return Err(BinningError::InvalidArgument(
                "thresholds must be finite".to_string(),
            ));
        }
        if thresholds.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(BinningError::InvalidArgument(format!(
                "thresholds must be strictly increasing: {:?}",
                thresholds
            )));
        }

        Ok(Self { thresholds, labels })
    }

    /// Exam grade bands: Poor < 50 <= Average < 70 <= Good < 90 <= Excellent.
    pub fn grades() -> Self {
        Self {
            thresholds: vec![50.0, 70.0, 90.0],
            labels: ["Poor", "Average", "Good", "Excellent"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn categorize(&self, value: f64) -> &str {
        let idx = self.thresholds.partition_point(|&t| t <= value);
        &self.labels[idx]
    }

    pub fn categorize_all(&self, values: &[f64]) -> Vec<String> {
        values
            .iter()
            .map(|&v| self.categorize(v).to_string())
            .collect()
    }
}

/// Label each value with one of `labels`, using as many equal-width bins as
/// there are labels and the same edge convention as the smoother.
pub fn equal_width_categories(values: &[f64], labels: &[String]) -> Result<Vec<String>, BinningError> {
    if labels.is_empty() {
        return Err(BinningError::InvalidArgument(
            "at least one category label is required".to_string(),
        ));
    }

    let (lo, hi) = value_range(values)?;
    let edges = equal_width_edges(lo, hi, labels.len())?;

    Ok(assign_bins(values, &edges)
        .into_iter()
        .map(|label| labels[label.index()].clone())
        .collect())
}

/// Occurrences of each label.
pub fn value_counts<'a, I>(labels: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(label.to_string()).or_insert(0) += 1;
    }
    counts
}
