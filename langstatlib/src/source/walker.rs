//! Directory traversal with ignore-rule pruning.
//!
//! [`Walk`] is a lazy iterator over the classifiable files under a root.
//! Excluded directories are never entered. Each item is either an
//! [`Observation`] or a per-file error; iteration continues after errors,
//! so callers decide whether to log, collect or stop.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::data::counter::count_file;
use crate::data::stats::Observation;
use crate::error::LangstatError;
use crate::Result;

use super::ignore::IgnoreMatcher;
use super::language::classify;

/// A validated scan root.
#[derive(Debug, Clone)]
pub struct Walker {
    root: PathBuf,
    follow_links: bool,
}

impl Walker {
    /// Validate that `root` is an existing directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();

        let metadata = fs::metadata(root).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LangstatError::PathNotFound(root.to_path_buf()),
            _ => LangstatError::Io(e),
        })?;
        if !metadata.is_dir() {
            return Err(LangstatError::NotADirectory(root.to_path_buf()));
        }

        Ok(Self {
            root: root.to_path_buf(),
            follow_links: false,
        })
    }

    /// Descend into symlinked directories.
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.follow_links = yes;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Start a fresh traversal.
    pub fn walk<'a>(&self, matcher: &'a IgnoreMatcher) -> Walk<'a> {
        let entries = WalkDir::new(&self.root)
            .follow_links(self.follow_links)
            .sort_by_file_name()
            .into_iter();

        Walk {
            root: self.root.clone(),
            matcher,
            entries,
        }
    }
}

/// Walk `root`, skipping whatever `matcher` excludes.
///
/// Fails up front if `root` is not an existing directory.
pub fn walk(root: impl AsRef<Path>, matcher: &IgnoreMatcher) -> Result<Walk<'_>> {
    Ok(Walker::new(root)?.walk(matcher))
}

/// Iterator over counted files. See [`Walker::walk`].
pub struct Walk<'a> {
    root: PathBuf,
    matcher: &'a IgnoreMatcher,
    entries: walkdir::IntoIter,
}

impl Iterator for Walk<'_> {
    type Item = Result<Observation>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(err) => return Some(Err(err.into())),
            };

            // The root itself is never matched
            if entry.depth() == 0 {
                continue;
            }

            let path = entry.path();
            let relative = path.strip_prefix(&self.root).unwrap_or(path);
            let file_type = entry.file_type();

            if file_type.is_dir() {
                if self.matcher.matches(relative, true) {
                    debug!(path = %relative.display(), "pruned ignored directory");
                    self.entries.skip_current_dir();
                }
                continue;
            }

            if self.matcher.matches(relative, false) {
                debug!(path = %relative.display(), "skipped ignored file");
                continue;
            }

            let Some(language) = classify(&entry.file_name().to_string_lossy()) else {
                continue;
            };

            if file_type.is_symlink() {
                match fs::metadata(path) {
                    Ok(target) if target.is_file() => {}
                    Ok(_) => continue,
                    Err(source) => {
                        return Some(Err(LangstatError::FileRead {
                            path: path.to_path_buf(),
                            source,
                        }))
                    }
                }
            } else if !file_type.is_file() {
                continue;
            }

            let observation = count_file(path)
                .map(|lines| Observation::new(relative, language, lines));
            if let Ok(obs) = &observation {
                trace!(path = %obs.path.display(), language, lines = obs.lines, "counted file");
            }
            return Some(observation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn lines(n: usize) -> String {
        "x\n".repeat(n)
    }

    /// Collect successful observations keyed by relative path.
    fn observed(root: &Path, matcher: &IgnoreMatcher) -> BTreeMap<String, (&'static str, u64)> {
        walk(root, matcher)
            .unwrap()
            .filter_map(|item| item.ok())
            .map(|o| {
                let key = o.path.to_string_lossy().replace('\\', "/");
                (key, (o.language, o.lines))
            })
            .collect()
    }

    #[test]
    fn test_walk_classifies_and_counts() {
        let temp = tempdir().unwrap();
        write(temp.path(), "a.py", &lines(10));
        write(temp.path(), "pkg/b.py", &lines(5));
        write(temp.path(), "README.md", "one\ntwo\nthree");
        write(temp.path(), "LICENSE", &lines(20));

        let seen = observed(temp.path(), &IgnoreMatcher::empty());

        assert_eq!(seen.len(), 3);
        assert_eq!(seen["a.py"], ("Python", 10));
        assert_eq!(seen["pkg/b.py"], ("Python", 5));
        assert_eq!(seen["README.md"], ("Markdown", 3));
    }

    #[test]
    fn test_walk_prunes_ignored_directory() {
        let temp = tempdir().unwrap();
        write(temp.path(), "src/main.py", &lines(2));
        write(temp.path(), "build/out.py", &lines(50));
        write(temp.path(), "src/build/gen.py", &lines(50));
        write(temp.path(), "build/keep.py", &lines(1));

        // Re-including a file inside an ignored directory has no effect
        let matcher = IgnoreMatcher::compile(["build/", "!keep.py", "!build/keep.py"]);
        let seen = observed(temp.path(), &matcher);

        assert_eq!(seen.keys().collect::<Vec<_>>(), vec!["src/main.py"]);
    }

    #[test]
    fn test_walk_reincluded_directory_is_entered() {
        let temp = tempdir().unwrap();
        write(temp.path(), "build/out.py", &lines(3));

        let matcher = IgnoreMatcher::compile(["build/", "!build/"]);
        let seen = observed(temp.path(), &matcher);

        assert_eq!(seen["build/out.py"], ("Python", 3));
    }

    #[test]
    fn test_walk_skips_ignored_files() {
        let temp = tempdir().unwrap();
        write(temp.path(), "debug.sql", &lines(4));
        write(temp.path(), "keep.sql", &lines(2));
        write(temp.path(), "logs/other.sql", &lines(7));

        let matcher = IgnoreMatcher::compile(["*.sql", "!keep.sql"]);
        let seen = observed(temp.path(), &matcher);

        assert_eq!(seen.keys().collect::<Vec<_>>(), vec!["keep.sql"]);
    }

    #[test]
    fn test_walk_directory_only_rule_spares_files() {
        let temp = tempdir().unwrap();
        write(temp.path(), "docs/guide.md", &lines(1));
        write(temp.path(), "other/docs.md", &lines(1));

        let matcher = IgnoreMatcher::compile(["docs/", "docs.md/"]);
        let seen = observed(temp.path(), &matcher);

        assert_eq!(seen.keys().collect::<Vec<_>>(), vec!["other/docs.md"]);
    }

    #[test]
    fn test_walk_is_restartable() {
        let temp = tempdir().unwrap();
        write(temp.path(), "a.rs", &lines(3));
        write(temp.path(), "b/c.go", &lines(4));

        let matcher = IgnoreMatcher::empty();
        let walker = Walker::new(temp.path()).unwrap();
        let first: Vec<_> = walker.walk(&matcher).filter_map(|o| o.ok()).collect();
        let second: Vec<_> = walker.walk(&matcher).filter_map(|o| o.ok()).collect();

        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_walk_counts_exact_names() {
        let temp = tempdir().unwrap();
        write(temp.path(), "docker/Dockerfile", "FROM scratch\nCOPY . .\n");
        write(temp.path(), "archive.tar.gz", "binary");

        let seen = observed(temp.path(), &IgnoreMatcher::empty());

        assert_eq!(seen.len(), 1);
        assert_eq!(seen["docker/Dockerfile"], ("Docker", 2));
    }

    #[test]
    fn test_walk_nonexistent_root() {
        let matcher = IgnoreMatcher::empty();
        let result = walk("/nonexistent/path", &matcher);

        assert!(matches!(result, Err(LangstatError::PathNotFound(_))));
    }

    #[test]
    fn test_walk_root_is_file() {
        let temp = tempdir().unwrap();
        write(temp.path(), "a.py", "x\n");

        let matcher = IgnoreMatcher::empty();
        let result = walk(temp.path().join("a.py"), &matcher);

        assert!(matches!(result, Err(LangstatError::NotADirectory(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_dangling_symlink_is_recoverable() {
        let temp = tempdir().unwrap();
        write(temp.path(), "a.py", &lines(2));
        std::os::unix::fs::symlink(temp.path().join("missing.py"), temp.path().join("broken.py"))
            .unwrap();

        let items: Vec<_> = walk(temp.path(), &IgnoreMatcher::empty()).unwrap().collect();

        assert_eq!(items.len(), 2);
        let errors: Vec<_> = items.iter().filter_map(|i| i.as_ref().err()).collect();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], LangstatError::FileRead { .. }));
        assert!(items.iter().any(|i| matches!(i, Ok(o) if o.lines == 2)));
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_counts_symlinked_file() {
        let temp = tempdir().unwrap();
        write(temp.path(), "real.rs", &lines(4));
        std::os::unix::fs::symlink(temp.path().join("real.rs"), temp.path().join("link.rs"))
            .unwrap();

        let seen = observed(temp.path(), &IgnoreMatcher::empty());

        assert_eq!(seen["link.rs"], ("Rust", 4));
        assert_eq!(seen["real.rs"], ("Rust", 4));
    }
}
