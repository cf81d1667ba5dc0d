//! Core data structures for per-language statistics.
//!
//! - [`Observation`]: one counted file, produced by the walker
//! - [`StatsEntry`]: running file/line totals for one language
//! - [`Summary`]: the finalized, sorted snapshot with percentages

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};
use std::path::PathBuf;

/// A single file's contribution to the statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// Path relative to the scan root
    pub path: PathBuf,
    /// Language label from the classifier
    pub language: &'static str,
    /// Number of lines in the file
    pub lines: u64,
}

impl Observation {
    pub fn new(path: impl Into<PathBuf>, language: &'static str, lines: u64) -> Self {
        Self {
            path: path.into(),
            language,
            lines,
        }
    }
}

/// File and line counts for one language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsEntry {
    /// Number of files counted
    pub files: u64,
    /// Sum of the files' line counts
    pub lines: u64,
}

impl StatsEntry {
    /// Create a new entry with all zeros.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one file with the given number of lines.
    pub fn record(&mut self, lines: u64) {
        self.files += 1;
        self.lines += lines;
    }
}

impl Add for StatsEntry {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            files: self.files + other.files,
            lines: self.lines + other.lines,
        }
    }
}

impl AddAssign for StatsEntry {
    fn add_assign(&mut self, other: Self) {
        self.files += other.files;
        self.lines += other.lines;
    }
}

/// One row of the finalized report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageStats {
    pub language: String,
    pub files: u64,
    pub lines: u64,
    /// Share of all counted lines, in `0.0..=100.0`
    pub percentage: f64,
}

/// Finalized statistics, sorted by descending line count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub languages: Vec<LanguageStats>,
    pub total_files: u64,
    pub total_lines: u64,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Look up a language row by label.
    pub fn get(&self, language: &str) -> Option<&LanguageStats> {
        self.languages.iter().find(|row| row.language == language)
    }
}

/// Percentage of `part` in `total`, 0 when `total` is 0.
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}
