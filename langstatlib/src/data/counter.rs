//! High-level counting API.
//!
//! This module provides the main entry point, [`count_directory`], which
//! loads ignore rules, walks the tree and aggregates per-language totals,
//! plus the line counting used for individual files.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{LangstatError, Warning, WarningKind};
use crate::source::ignore::IgnoreMatcher;
use crate::source::walker::Walker;
use crate::Result;

use super::aggregator::Aggregator;
use super::stats::Summary;

/// Default name of the project ignore file.
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";

/// Options for counting a directory.
#[derive(Debug, Clone)]
pub struct CountOptions {
    /// Read ignore rules from `ignore_file_name` in the root
    pub use_ignore_file: bool,
    /// Ignore file name, relative to the root
    pub ignore_file_name: String,
    /// Extra rules applied after the ignore file's
    pub extra_rules: Vec<String>,
    /// Descend into symlinked directories
    pub follow_links: bool,
}

impl Default for CountOptions {
    fn default() -> Self {
        Self {
            use_ignore_file: false,
            ignore_file_name: DEFAULT_IGNORE_FILE.to_string(),
            extra_rules: Vec::new(),
            follow_links: false,
        }
    }
}

impl CountOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Respect the project ignore file.
    pub fn gitignore(mut self, yes: bool) -> Self {
        self.use_ignore_file = yes;
        self
    }

    /// Use a different ignore file name.
    pub fn ignore_file(mut self, name: impl Into<String>) -> Self {
        self.ignore_file_name = name.into();
        self
    }

    /// Add an ignore rule (gitignore syntax).
    pub fn exclude(mut self, rule: impl Into<String>) -> Self {
        self.extra_rules.push(rule.into());
        self
    }

    /// Add multiple ignore rules.
    pub fn exclude_many(mut self, rules: &[&str]) -> Self {
        self.extra_rules.extend(rules.iter().map(|r| r.to_string()));
        self
    }

    pub fn follow_links(mut self, yes: bool) -> Self {
        self.follow_links = yes;
        self
    }
}

/// Result of counting a directory.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CountResult {
    /// Directory that was scanned
    pub root: PathBuf,
    /// Per-language totals, sorted by descending line count
    #[serde(flatten)]
    pub summary: Summary,
    /// Recoverable problems met during the scan
    pub warnings: Vec<Warning>,
}

/// Count lines per language under `path`.
///
/// Fails only if `path` is not an existing directory. Unreadable files and
/// a broken ignore file are reported in [`CountResult::warnings`] and
/// logged, and the scan carries on without them.
///
/// # Example
///
/// ```rust
/// use langstatlib::{count_directory, CountOptions};
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// fs::write(dir.path().join("main.py"), "print('hi')\n").unwrap();
/// fs::create_dir(dir.path().join("vendor")).unwrap();
/// fs::write(dir.path().join("vendor/lib.py"), "x = 1\n").unwrap();
///
/// let options = CountOptions::new().exclude("vendor/");
/// let result = count_directory(dir.path(), &options).unwrap();
/// assert_eq!(result.summary.total_files, 1);
/// assert_eq!(result.summary.get("Python").unwrap().lines, 1);
/// ```
pub fn count_directory(path: impl AsRef<Path>, options: &CountOptions) -> Result<CountResult> {
    let root = path.as_ref();
    let walker = Walker::new(root)?.follow_links(options.follow_links);

    let mut warnings = Vec::new();
    let matcher = load_matcher(root, options, &mut warnings);

    let mut aggregator = Aggregator::new();
    for item in walker.walk(&matcher) {
        match item {
            Ok(observation) => aggregator.accumulate(&observation),
            Err(err) => report(&mut warnings, Warning::from(&err)),
        }
    }

    let summary = aggregator.finalize();
    info!(
        root = %root.display(),
        languages = summary.languages.len(),
        files = summary.total_files,
        lines = summary.total_lines,
        "scan complete"
    );

    Ok(CountResult {
        root: walker.root().to_path_buf(),
        summary,
        warnings,
    })
}

/// Build the matcher from the ignore file (if enabled) and extra rules.
fn load_matcher(
    root: &Path,
    options: &CountOptions,
    warnings: &mut Vec<Warning>,
) -> IgnoreMatcher {
    let mut matcher = IgnoreMatcher::empty();

    if options.use_ignore_file {
        let path = root.join(&options.ignore_file_name);
        match IgnoreMatcher::from_file(&path) {
            Ok(loaded) => matcher = loaded,
            Err(LangstatError::IgnoreFile { source, .. })
                if source.kind() == ErrorKind::NotFound =>
            {
                debug!(path = %path.display(), "no ignore file");
            }
            Err(err) => report(warnings, Warning::from(&err)),
        }
    }

    matcher.extend(&options.extra_rules);

    for (rule, message) in matcher.invalid_rules() {
        report(
            warnings,
            Warning::new(
                WarningKind::IgnoreRule,
                None,
                format!("invalid ignore pattern '{}': {}", rule.pattern, message),
            ),
        );
    }

    matcher
}

fn report(warnings: &mut Vec<Warning>, warning: Warning) {
    warn!("{}", warning.message);
    warnings.push(warning);
}

/// Count the lines in a file.
pub fn count_file(path: impl AsRef<Path>) -> Result<u64> {
    let path = path.as_ref();
    let to_error = |source: std::io::Error| LangstatError::FileRead {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(to_error)?;
    count_lines(file).map_err(to_error)
}

/// Count terminated lines, plus a final unterminated one.
///
/// `\n`, `\r\n` and a lone `\r` each end a line. Works on raw bytes, so
/// content in any encoding is counted.
pub fn count_lines<R: Read>(reader: R) -> std::io::Result<u64> {
    let mut reader = BufReader::new(reader);
    let mut lines = 0;
    let mut last_byte = None;
    let mut after_cr = false;

    loop {
        let buf = match reader.fill_buf() {
            Ok(buf) => buf,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if buf.is_empty() {
            break;
        }
        for &b in buf {
            match b {
                b'\r' => lines += 1,
                b'\n' if !after_cr => lines += 1,
                _ => {}
            }
            after_cr = b == b'\r';
        }
        last_byte = buf.last().copied();
        let len = buf.len();
        reader.consume(len);
    }

    if last_byte.is_some_and(|b| b != b'\n' && b != b'\r') {
        lines += 1;
    }
    Ok(lines)
}
