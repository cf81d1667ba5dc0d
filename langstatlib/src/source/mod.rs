//! Source discovery: find the files to count.
//!
//! This module handles the first stage of the pipeline - deciding which
//! files take part in a scan. It provides:
//!
//! - **Classification**: map a file name to a language label
//! - **Ignore rules**: gitignore-style matching for paths
//! - **Traversal**: walk a tree, pruning what the rules exclude
//!
//! ## Example
//!
//! ```rust,ignore
//! use langstatlib::source::{walk, IgnoreMatcher};
//!
//! let matcher = IgnoreMatcher::compile(["target/", "*.log"]);
//! for observation in walk(".", &matcher)? {
//!     println!("{:?}", observation?);
//! }
//! ```

pub mod ignore;
pub mod language;
pub mod walker;

pub use ignore::{IgnoreMatcher, IgnoreRule, Match};
pub use language::classify;
pub use walker::{walk, Walk, Walker};
