//! Error types for langstatlib

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while scanning a project tree.
///
/// `PathNotFound` and `NotADirectory` are fatal and abort a run before any
/// traversal. The others are per-file and surface as [`crate::Warning`]s
/// when produced during a walk.
#[derive(Error, Debug)]
pub enum LangstatError {
    /// Root path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// Root path exists but is not a directory
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Failed to open or read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Ignore file exists but could not be loaded
    #[error("failed to load ignore file '{path}': {source}")]
    IgnoreFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Directory traversal error (unreadable directory, loop, ...)
    #[error("traversal error: {0}")]
    Walk(#[from] walkdir::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LangstatError {
    /// Path associated with the error, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            LangstatError::PathNotFound(path)
            | LangstatError::NotADirectory(path)
            | LangstatError::FileRead { path, .. }
            | LangstatError::IgnoreFile { path, .. } => Some(path),
            LangstatError::Walk(err) => err.path(),
            LangstatError::Io(_) => None,
        }
    }
}

/// Category of a recoverable problem met during a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A file could not be opened or read; it was left out of the counts
    FileRead,
    /// A directory entry could not be read during traversal
    Walk,
    /// The ignore file could not be loaded; no rules from it were applied
    IgnoreFile,
    /// An ignore rule is not a valid pattern and never matches
    IgnoreRule,
}

/// A non-fatal problem, reported alongside the results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub kind: WarningKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub message: String,
}

impl Warning {
    pub fn new(kind: WarningKind, path: Option<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path,
            message: message.into(),
        }
    }
}

impl From<&LangstatError> for Warning {
    fn from(err: &LangstatError) -> Self {
        let kind = match err {
            LangstatError::IgnoreFile { .. } => WarningKind::IgnoreFile,
            LangstatError::Walk(_) => WarningKind::Walk,
            _ => WarningKind::FileRead,
        };
        Warning::new(kind, err.path().map(|p| p.to_path_buf()), err.to_string())
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_from_file_read_error() {
        let err = LangstatError::FileRead {
            path: PathBuf::from("src/a.py"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        let warning = Warning::from(&err);

        assert_eq!(warning.kind, WarningKind::FileRead);
        assert_eq!(warning.path, Some(PathBuf::from("src/a.py")));
        assert!(warning.message.contains("src/a.py"));
        assert!(warning.message.contains("denied"));
    }

    #[test]
    fn test_warning_from_ignore_file_error() {
        let err = LangstatError::IgnoreFile {
            path: PathBuf::from(".gitignore"),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, "bad utf-8"),
        };

        assert_eq!(Warning::from(&err).kind, WarningKind::IgnoreFile);
    }
}
