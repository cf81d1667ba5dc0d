//! Gitignore-style path matching.
//!
//! An [`IgnoreMatcher`] is compiled once from the lines of an ignore file and
//! answers a single question: is this path (relative to the scan root)
//! excluded? Supported syntax:
//!
//! - Blank lines and lines starting with `#` are skipped. Trailing
//!   whitespace is trimmed unless escaped (`foo\ `).
//! - A leading `!` negates the rule (re-includes what an earlier rule
//!   excluded). `\#` and `\!` match a literal leading `#` or `!`.
//! - A trailing `/` makes the rule match directories only.
//! - A pattern containing a `/` (other than the trailing one) is anchored:
//!   it is matched against the whole relative path. A leading `/` only
//!   anchors. Without a `/` the pattern is matched against the last path
//!   component, at any depth.
//! - `*`, `?` and `[...]` classes never cross a `/`. `[!x]` and `[^x]` both
//!   negate a class. A `**` that forms a whole segment of an anchored
//!   pattern (`docs/**/*.md`, `**/build`) matches zero or more directories.
//!   A `**` fused with other characters (`**.log`, `a**b`) is a plain `*`.
//! - A pattern the glob engine rejects (an unclosed `[` class) is kept as a
//!   rule that never matches and is reported by
//!   [`IgnoreMatcher::invalid_rules`].
//!
//! The last matching rule wins. Directories are not matched through their
//! parents: `matches("build/out.py", false)` under `build/` is false. Pruning
//! excluded directories is the walker's job, which is also what makes files
//! inside an ignored directory impossible to re-include.

use std::path::{Component, Path};

use glob::{MatchOptions, Pattern};
use tracing::debug;

use crate::error::LangstatError;
use crate::Result;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Outcome of matching a path against the compiled rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    /// No rule matched
    None,
    /// The last matching rule excludes the path
    Ignore,
    /// The last matching rule is a negation that re-includes the path
    Whitelist,
}

impl Match {
    pub fn is_ignore(&self) -> bool {
        matches!(self, Match::Ignore)
    }
}

#[derive(Debug, Clone)]
enum Compiled {
    Glob(Pattern),
    /// Rule with nothing left to match after stripping `!`, `/` etc.
    Empty,
    Invalid(String),
}

/// A single compiled ignore rule.
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    /// Pattern body with `!`, leading and trailing `/` stripped
    pub pattern: String,
    pub is_negation: bool,
    pub is_directory_only: bool,
    /// Matched against the full relative path instead of the file name
    pub is_anchored: bool,
    pub has_path_separator: bool,
    compiled: Compiled,
}

impl IgnoreRule {
    /// Parse one line of an ignore file.
    ///
    /// Returns `None` for blank lines and comments.
    pub fn parse(line: &str) -> Option<Self> {
        let line = trim_unescaped_end(line);
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let (is_negation, body) = match line.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => {
                let escaped = line
                    .strip_prefix('\\')
                    .filter(|rest| rest.starts_with(['#', '!']));
                (false, escaped.unwrap_or(line))
            }
        };

        let (is_directory_only, body) = match body.strip_suffix('/') {
            Some(rest) => (true, rest),
            None => (false, body),
        };

        let has_path_separator = body.contains('/');
        let pattern = body.trim_start_matches('/').to_string();

        let compiled = if pattern.is_empty() {
            Compiled::Empty
        } else {
            match Pattern::new(&to_glob(&pattern)) {
                Ok(glob) => Compiled::Glob(glob),
                Err(e) => Compiled::Invalid(e.to_string()),
            }
        };

        Some(Self {
            pattern,
            is_negation,
            is_directory_only,
            is_anchored: has_path_separator,
            has_path_separator,
            compiled,
        })
    }

    /// Check whether this rule's pattern matches a normalized relative path.
    ///
    /// Negation does not affect the result; it only decides what a match means.
    pub fn is_match(&self, path: &str, is_dir: bool) -> bool {
        if self.is_directory_only && !is_dir {
            return false;
        }
        let Compiled::Glob(glob) = &self.compiled else {
            return false;
        };

        if self.is_anchored {
            glob.matches_with(path, MATCH_OPTIONS)
        } else {
            let name = path.rsplit('/').next().unwrap_or(path);
            glob.matches_with(name, MATCH_OPTIONS)
        }
    }

    /// Why the pattern failed to compile, if it did.
    pub fn error(&self) -> Option<&str> {
        match &self.compiled {
            Compiled::Invalid(message) => Some(message),
            _ => None,
        }
    }
}

/// Trim trailing whitespace, keeping a space escaped with `\`.
fn trim_unescaped_end(line: &str) -> &str {
    let trimmed = line.trim_end();
    let backslashes = trimmed.len() - trimmed.trim_end_matches('\\').len();
    if backslashes % 2 == 1 && line[trimmed.len()..].starts_with(' ') {
        &line[..trimmed.len() + 1]
    } else {
        trimmed
    }
}

/// Rewrite gitignore pattern syntax into what the glob engine accepts.
///
/// The glob engine has no escape character, so `\*` becomes `[*]`. It only
/// negates classes with `!`, and rejects `**` unless it is a whole segment,
/// so `[^x]` becomes `[!x]` and a fused `**` collapses to `*`.
fn to_glob(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped @ ('*' | '?' | '[')) => {
                    out.push('[');
                    out.push(escaped);
                    out.push(']');
                }
                Some(escaped) => out.push(escaped),
                None => {}
            },
            '[' => {
                out.push('[');
                if chars.next_if_eq(&'^').is_some() {
                    out.push('!');
                }
            }
            '*' => {
                let mut run = 1;
                while chars.next_if_eq(&'*').is_some() {
                    run += 1;
                }
                let starts_segment = out.is_empty() || out.ends_with('/');
                let ends_segment = chars.peek().map_or(true, |&next| next == '/');
                if run > 1 && starts_segment && ends_segment {
                    out.push_str("**");
                } else {
                    out.push('*');
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// Ordered set of ignore rules. Matches nothing when empty.
#[derive(Debug, Clone, Default)]
pub struct IgnoreMatcher {
    rules: Vec<IgnoreRule>,
}

impl IgnoreMatcher {
    /// A matcher that excludes nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compile ignore-file lines in order.
    pub fn compile<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules: Vec<IgnoreRule> = lines
            .into_iter()
            .filter_map(|line| IgnoreRule::parse(line.as_ref()))
            .collect();
        Self { rules }
    }

    /// Read and compile an ignore file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| LangstatError::IgnoreFile {
            path: path.to_path_buf(),
            source,
        })?;
        let matcher = Self::compile(content.lines());
        debug!(path = %path.display(), rules = matcher.len(), "loaded ignore file");
        Ok(matcher)
    }

    /// Append rules after the existing ones, giving them precedence.
    pub fn extend<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.rules
            .extend(lines.into_iter().filter_map(|line| IgnoreRule::parse(line.as_ref())));
    }

    pub fn rules(&self) -> &[IgnoreRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules whose pattern is not a valid glob, with the reason.
    pub fn invalid_rules(&self) -> impl Iterator<Item = (&IgnoreRule, &str)> {
        self.rules
            .iter()
            .filter_map(|rule| rule.error().map(|message| (rule, message)))
    }

    /// Check whether a path relative to the root is excluded.
    pub fn matches(&self, relative_path: impl AsRef<Path>, is_dir: bool) -> bool {
        self.matched(relative_path, is_dir).is_ignore()
    }

    /// Find which rule, if any, decides the path.
    ///
    /// Every rule is evaluated in order and the last match wins.
    pub fn matched(&self, relative_path: impl AsRef<Path>, is_dir: bool) -> Match {
        let path = normalize(relative_path.as_ref());
        if path.is_empty() {
            return Match::None;
        }

        let mut decision = Match::None;
        for rule in &self.rules {
            if rule.is_match(&path, is_dir) {
                decision = if rule.is_negation {
                    Match::Whitelist
                } else {
                    Match::Ignore
                };
            }
        }
        decision
    }
}

/// Join the normal components of a path with `/`.
fn normalize(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        if let Component::Normal(part) = component {
            if !out.is_empty() {
                out.push('/');
            }
            out.push_str(&part.to_string_lossy());
        }
    }
    out
}
