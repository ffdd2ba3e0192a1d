//! Pure numeric routines used by the cleaning pipeline.
//!
//! # Modules
//!
//! - [`binning`]: Equal-width bin edges, bin assignment, smoothing by bin means
//! - [`discretize`]: Threshold and equal-width category labels
//! - [`stats`]: Mean, median, sample standard deviation and noise reports

pub mod binning;
pub mod discretize;
pub mod stats;

pub use binning::{
    assign_bins, equal_width_edges, smooth, smooth_with, BinLabel, BinSmoothing, BinningError,
    BinningOptions, DegeneratePolicy,
};
pub use discretize::{equal_width_categories, value_counts, ThresholdScheme};
pub use stats::{mean, median, sample_std, NoiseReport};
