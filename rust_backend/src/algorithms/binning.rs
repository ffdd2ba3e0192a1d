//! Equal-width binning and smoothing by bin means.
//!
//! The value range `[min, max]` of a sample sequence is split into `bins`
//! intervals of equal width. Interval 0 is closed on both ends so that it
//! contains the minimum; every other interval is `(left, right]`. A value
//! sitting exactly on an interior edge therefore belongs to the lower of the
//! two adjoining intervals, and the maximum always lands in the last one.
//!
//! # Example
//!
//! ```
//! use score_clean::algorithms::binning::{smooth, BinLabel};
//!
//! let samples = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0];
//! let result = smooth(&samples, 3).unwrap();
//!
//! assert_eq!(result.edges, vec![10.0, 40.0, 70.0, 100.0]);
//! assert_eq!(result.assignment[3], BinLabel(0)); // 40 sits on an interior edge
//! assert_eq!(result.mean_of(BinLabel(0)), Some(25.0));
//! assert_eq!(result.smoothed[9], 90.0);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Errors raised by the binning routines.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BinningError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Degenerate range: every sample equals {value}")]
    DegenerateRange { value: f64 },
}

/// Zero-based interval index. Displays one-based (`Bin1`, `Bin2`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BinLabel(pub usize);

impl BinLabel {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BinLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bin{}", self.0 + 1)
    }
}

/// What to do when every sample has the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// All edges collapse onto the value and every sample goes to `Bin1`.
    #[default]
    SingleBin,
    /// Fail with [`BinningError::DegenerateRange`].
    Reject,
}

/// Parameters for [`smooth_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinningOptions {
    pub bins: usize,
    pub degenerate: DegeneratePolicy,
}

impl BinningOptions {
    pub fn new(bins: usize) -> Self {
        Self {
            bins,
            degenerate: DegeneratePolicy::default(),
        }
    }

    pub fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate = policy;
        self
    }
}

/// Output of a smoothing pass.
///
/// # Fields
///
/// * `edges` - `bins + 1` non-decreasing interval boundaries
/// * `smoothed` - input values replaced by their bin mean, same order and length
/// * `assignment` - bin of each input value, index-aligned with the input
/// * `means` - mean per non-empty bin; empty bins are absent
/// * `counts` - number of samples per bin, empty bins included
#[derive(Debug, Clone, PartialEq)]
pub struct BinSmoothing {
    pub edges: Vec<f64>,
    pub smoothed: Vec<f64>,
    pub assignment: Vec<BinLabel>,
    pub means: BTreeMap<BinLabel, f64>,
    pub counts: Vec<usize>,
}

impl BinSmoothing {
    /// Number of intervals, empty ones included.
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn mean_of(&self, label: BinLabel) -> Option<f64> {
        self.means.get(&label).copied()
    }

    /// Bin means keyed by their display label, for reporting.
    pub fn labeled_means(&self) -> BTreeMap<String, f64> {
        self.means
            .iter()
            .map(|(label, mean)| (label.to_string(), *mean))
            .collect()
    }
}

/// Minimum and maximum of a non-empty, all-finite sample sequence.
pub fn value_range(samples: &[f64]) -> Result<(f64, f64), BinningError> {
    if samples.is_empty() {
        return Err(BinningError::InvalidArgument(
            "cannot bin an empty sample sequence".to_string(),
        ));
    }

    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for (i, &value) in samples.iter().enumerate() {
        if !value.is_finite() {
            return Err(BinningError::InvalidArgument(format!(
                "sample {} is not a finite number: {}",
                i, value
            )));
        }
        lo = lo.min(value);
        hi = hi.max(value);
    }

    Ok((lo, hi))
}

/// `bins + 1` equally spaced edges from `lo` to `hi` inclusive.
///
/// The last edge is pinned to `hi` so that the maximum is never lost to
/// rounding. When `lo == hi` every edge equals `lo`.
pub fn equal_width_edges(lo: f64, hi: f64, bins: usize) -> Result<Vec<f64>, BinningError> {
    if bins < 1 {
        return Err(BinningError::InvalidArgument(format!(
            "bin count must be at least 1, got {}",
            bins
        )));
    }
    if !lo.is_finite() || !hi.is_finite() || lo > hi {
        return Err(BinningError::InvalidArgument(format!(
            "invalid value range [{}, {}]",
            lo, hi
        )));
    }

    let step = (hi - lo) / bins as f64;
    let mut edges: Vec<f64> = (0..=bins).map(|i| lo + step * i as f64).collect();
    edges[bins] = hi;
    Ok(edges)
}

/// Assign every sample to the interval that contains it.
///
/// A sample goes to the first interval whose right edge is `>=` the sample.
/// Values below the first edge fall into bin 0 and values above the last
/// edge into the last bin, so the result is total even for samples outside
/// the range the edges were built from.
pub fn assign_bins(samples: &[f64], edges: &[f64]) -> Vec<BinLabel> {
    let right_edges = edges.get(1..).unwrap_or(&[]);
    let last = right_edges.len().saturating_sub(1);
    // Interior edges can round onto the top edge for very narrow ranges.
    let top = match (edges.first(), edges.last()) {
        (Some(&lo), Some(&hi)) if lo < hi => hi,
        _ => f64::INFINITY,
    };

    samples
        .iter()
        .map(|&value| {
            if value >= top {
                BinLabel(last)
            } else {
                BinLabel(right_edges.partition_point(|&edge| edge < value).min(last))
            }
        })
        .collect()
}

/// Smooth `samples` into `bins` equal-width bins using the default
/// degenerate-range policy.
pub fn smooth(samples: &[f64], bins: usize) -> Result<BinSmoothing, BinningError> {
    smooth_with(samples, &BinningOptions::new(bins))
}

/// Smooth `samples` by replacing every value with the mean of its bin.
///
/// Fails before producing any output when the bin count is zero, the input
/// is empty, a sample is not finite, or the range is degenerate under
/// [`DegeneratePolicy::Reject`].
pub fn smooth_with(samples: &[f64], options: &BinningOptions) -> Result<BinSmoothing, BinningError> {
    if options.bins < 1 {
        return Err(BinningError::InvalidArgument(format!(
            "bin count must be at least 1, got {}",
            options.bins
        )));
    }

    let (lo, hi) = value_range(samples)?;
    if lo == hi && options.degenerate == DegeneratePolicy::Reject {
        return Err(BinningError::DegenerateRange { value: lo });
    }

    let edges = equal_width_edges(lo, hi, options.bins)?;
    let assignment = assign_bins(samples, &edges);

    // Running means stay exact when a bin holds identical values.
    let mut running = vec![0.0_f64; options.bins];
    let mut counts = vec![0_usize; options.bins];
    for (&value, label) in samples.iter().zip(&assignment) {
        let bin = label.index();
        counts[bin] += 1;
        running[bin] += (value - running[bin]) / counts[bin] as f64;
    }

    let means: BTreeMap<BinLabel, f64> = running
        .iter()
        .zip(&counts)
        .enumerate()
        .filter(|(_, (_, &count))| count > 0)
        .map(|(bin, (&mean, _))| (BinLabel(bin), mean))
        .collect();

    let smoothed = assignment.iter().map(|label| running[label.index()]).collect();

    Ok(BinSmoothing {
        edges,
        smoothed,
        assignment,
        means,
        counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tens() -> Vec<f64> {
        (1..=10).map(|i| i as f64 * 10.0).collect()
    }

    #[test]
    fn test_edges_are_equally_spaced() {
        let edges = equal_width_edges(10.0, 100.0, 3).unwrap();
        assert_eq!(edges, vec![10.0, 40.0, 70.0, 100.0]);
    }

    #[test]
    fn test_edges_collapse_for_single_value() {
        let edges = equal_width_edges(5.0, 5.0, 3).unwrap();
        assert_eq!(edges, vec![5.0; 4]);
    }

    #[test]
    fn test_edges_reject_zero_bins() {
        assert!(matches!(
            equal_width_edges(0.0, 1.0, 0),
            Err(BinningError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_interior_edges_go_to_lower_bin() {
        let result = smooth(&tens(), 3).unwrap();

        let labels: Vec<usize> = result.assignment.iter().map(|l| l.index()).collect();
        assert_eq!(labels, vec![0, 0, 0, 0, 1, 1, 1, 2, 2, 2]);
        assert_eq!(result.mean_of(BinLabel(0)), Some(25.0));
        assert_eq!(result.mean_of(BinLabel(1)), Some(60.0));
        assert_eq!(result.mean_of(BinLabel(2)), Some(90.0));
        assert_eq!(result.counts, vec![4, 3, 3]);
    }

    #[test]
    fn test_smoothed_values_are_bin_means() {
        let result = smooth(&tens(), 3).unwrap();

        assert_eq!(result.smoothed.len(), 10);
        for (i, label) in result.assignment.iter().enumerate() {
            assert_eq!(Some(result.smoothed[i]), result.mean_of(*label));
        }
        assert_eq!(
            result.smoothed,
            vec![25.0, 25.0, 25.0, 25.0, 60.0, 60.0, 60.0, 90.0, 90.0, 90.0]
        );
    }

    #[test]
    fn test_maximum_lands_in_last_bin_for_narrow_range() {
        let hi = f64::from_bits(1.0f64.to_bits() + 1);
        let edges = equal_width_edges(1.0, hi, 3).unwrap();
        // The second interior edge rounds up onto the maximum.
        assert_eq!(edges[2], hi);

        assert_eq!(assign_bins(&[1.0, hi], &edges), vec![BinLabel(0), BinLabel(2)]);

        let result = smooth(&[1.0, hi], 3).unwrap();
        assert_eq!(result.counts, vec![1, 0, 1]);
        assert_eq!(result.smoothed, vec![1.0, hi]);
    }

    #[test]
    fn test_order_is_preserved_for_unsorted_input() {
        let samples = [100.0, 10.0, 55.0, 40.0];
        let result = smooth(&samples, 3).unwrap();

        assert_eq!(result.assignment[0], BinLabel(2));
        assert_eq!(result.assignment[1], BinLabel(0));
        assert_eq!(result.assignment[2], BinLabel(1));
        assert_eq!(result.assignment[3], BinLabel(0));
        assert_eq!(result.smoothed, vec![100.0, 25.0, 55.0, 25.0]);
    }

    #[test]
    fn test_single_sample_is_a_single_bin() {
        let result = smooth(&[5.0], 3).unwrap();

        assert_eq!(result.edges, vec![5.0; 4]);
        assert_eq!(result.assignment, vec![BinLabel(0)]);
        assert_eq!(result.smoothed, vec![5.0]);
        assert_eq!(result.means.len(), 1);
        assert_eq!(result.mean_of(BinLabel(0)), Some(5.0));
        assert_eq!(result.counts, vec![1, 0, 0]);
    }

    #[test]
    fn test_constant_input_is_unchanged() {
        let samples = vec![0.1; 7];
        let result = smooth(&samples, 4).unwrap();
        assert_eq!(result.smoothed, samples);
    }

    #[test]
    fn test_empty_bins_have_no_mean() {
        let result = smooth(&[0.0, 0.1, 10.0], 5).unwrap();

        assert_eq!(result.bins(), 5);
        assert!(result.mean_of(BinLabel(1)).is_none());
        assert!(result.mean_of(BinLabel(2)).is_none());
        assert_eq!(result.mean_of(BinLabel(4)), Some(10.0));
    }

    #[test]
    fn test_rejects_empty_input() {
        assert!(matches!(smooth(&[], 3), Err(BinningError::InvalidArgument(_))));
    }

    #[test]
    fn test_rejects_zero_bins() {
        assert!(matches!(
            smooth(&[1.0, 2.0], 0),
            Err(BinningError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_rejects_non_finite_samples() {
        assert!(matches!(
            smooth(&[1.0, f64::NAN], 2),
            Err(BinningError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_reject_policy_flags_degenerate_range() {
        let options = BinningOptions::new(3).with_degenerate_policy(DegeneratePolicy::Reject);
        assert_eq!(
            smooth_with(&[2.0, 2.0], &options),
            Err(BinningError::DegenerateRange { value: 2.0 })
        );
    }

    #[test]
    fn test_labels_display_one_based() {
        assert_eq!(BinLabel(0).to_string(), "Bin1");
        assert_eq!(BinLabel(2).to_string(), "Bin3");

        let result = smooth(&tens(), 3).unwrap();
        let labeled = result.labeled_means();
        assert_eq!(labeled.get("Bin2"), Some(&60.0));
    }

    #[test]
    fn test_assign_bins_clamps_out_of_range_values() {
        let edges = [0.0, 1.0, 2.0];
        let labels = assign_bins(&[-5.0, 0.0, 1.5, 9.0], &edges);
        assert_eq!(labels, vec![BinLabel(0), BinLabel(0), BinLabel(1), BinLabel(1)]);
    }
}
