//! # langstatlib
//!
//! A lines-of-code counter that reports, per programming language, how many
//! files and lines a project tree contains and what share of the total each
//! language holds.
//!
//! ## Overview
//!
//! A scan runs as a pipeline:
//!
//! - **Source**: walk the tree, pruning paths excluded by gitignore-style
//!   rules, and classify each file by exact name or extension
//! - **Data**: count each file's lines and aggregate per language
//! - **Output**: format the sorted summary as a table-ready structure
//!
//! ## Features
//!
//! - **Gitignore semantics**: negation, directory-only rules, anchoring and
//!   last-match-wins precedence, with ignored directories never entered
//! - **Recoverable errors**: unreadable files are reported as warnings and
//!   the scan carries on
//! - **Pure data types**: Returns structured data, no printing
//!
//! ## Example
//!
//! ```rust
//! use langstatlib::{count_directory, CountOptions, NumberStyle, StatsTable};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! fs::write(dir.path().join("a.py"), "import os\nprint(os.name)\n").unwrap();
//! fs::write(dir.path().join("README.md"), "# Demo\n").unwrap();
//! fs::write(dir.path().join("debug.log"), "noise\n").unwrap();
//! fs::write(dir.path().join(".gitignore"), "*.log\n").unwrap();
//!
//! let result = count_directory(dir.path(), &CountOptions::new().gitignore(true)).unwrap();
//! assert_eq!(result.summary.total_files, 2);
//! assert_eq!(result.summary.languages[0].language, "Python");
//!
//! let table = StatsTable::from_summary(&result.summary, NumberStyle::Plain);
//! assert_eq!(table.footer.values, vec!["2", "3", "100.00%"]);
//! ```

pub mod data;
pub mod error;
pub mod output;
pub mod source;

pub use data::{
    count_directory, count_file, count_lines, Aggregator, CountOptions, CountResult,
    LanguageStats, Observation, StatsEntry, Summary, DEFAULT_IGNORE_FILE,
};
pub use error::{LangstatError, Warning, WarningKind};
pub use output::{NumberStyle, StatsTable, TableRow};
pub use source::{classify, walk, IgnoreMatcher, IgnoreRule, Match, Walk, Walker};

/// Result type for langstatlib operations
pub type Result<T> = std::result::Result<T, LangstatError>;
