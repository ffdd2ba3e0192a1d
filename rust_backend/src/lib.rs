//! Score cleaning backend.
//!
//! Loads tabular score data, imputes gaps, drops duplicate rows, normalizes,
//! discretizes and smooths numeric columns with equal-width bin means.

pub mod algorithms;
pub mod io;
pub mod preprocessing;
pub mod transformations;

pub use algorithms::binning::{smooth, BinLabel, BinSmoothing, BinningError};
pub use preprocessing::{CleaningPipeline, CleaningReport, PipelineConfig};
