//! CSV input and output.
//!
//! # Example
//!
//! ```no_run
//! use score_clean::io::loaders::load_csv;
//! use std::path::Path;
//!
//! let df = load_csv(Path::new("scores.csv")).expect("Failed to load");
//! println!("Loaded {} rows", df.height());
//! ```

pub mod loaders;


pub use loaders::{load_csv, write_csv};
