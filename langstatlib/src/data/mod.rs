//! Data collection: count files and aggregate statistics.
//!
//! This module handles the second stage of the pipeline - turning the
//! walker's observations into per-language totals. It provides:
//!
//! - **Statistics**: Core data structures (`StatsEntry`, `Summary`, etc.)
//! - **Aggregation**: `Aggregator`, accumulating observations
//! - **Counting**: High-level API (`count_directory`, `count_file`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use langstatlib::data::{count_directory, CountOptions};
//!
//! let result = count_directory(".", &CountOptions::new().gitignore(true))?;
//! println!("Total lines: {}", result.summary.total_lines);
//! ```

pub mod aggregator;
pub mod counter;
pub mod stats;

pub use aggregator::Aggregator;
pub use counter::{
    count_directory, count_file, count_lines, CountOptions, CountResult, DEFAULT_IGNORE_FILE,
};
pub use stats::{percentage, LanguageStats, Observation, StatsEntry, Summary};
