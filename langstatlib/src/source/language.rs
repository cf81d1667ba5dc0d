//! Language classification by file name.
//!
//! A file is classified by its exact name first (for extension-less
//! conventions such as `Dockerfile`, or a bare `.py`), then by the suffix
//! after its last `.`, compared case-insensitively. Anything else has no
//! language and is left out of the counts.

/// Exact file names with a fixed language. Matched case-sensitively.
const EXACT_NAMES: &[(&str, &str)] = &[("Dockerfile", "Docker")];

/// Classify a file name, returning its language label.
///
/// Only the final path component should be passed. Names with several dots
/// are classified by the last suffix only (`archive.tar.gz` looks up `.gz`).
///
/// ```rust
/// use langstatlib::classify;
///
/// assert_eq!(classify("main.rs"), Some("Rust"));
/// assert_eq!(classify("Dockerfile"), Some("Docker"));
/// assert_eq!(classify("LICENSE"), None);
/// ```
pub fn classify(file_name: &str) -> Option<&'static str> {
    if let Some((_, language)) = EXACT_NAMES.iter().find(|(name, _)| *name == file_name) {
        return Some(language);
    }

    // A name that is exactly a lower-case extension key, like `.py`
    if let Some(ext) = file_name
        .strip_prefix('.')
        .filter(|ext| !ext.contains('.') && !ext.bytes().any(|b| b.is_ascii_uppercase()))
    {
        return from_extension(ext);
    }

    let (stem, ext) = file_name.rsplit_once('.')?;
    // Leading dots belong to the name: `.gitignore` has no extension
    if stem.trim_start_matches('.').is_empty() {
        return None;
    }
    from_extension(ext)
}

/// Look up a language by extension (without the leading dot).
pub fn from_extension(ext: &str) -> Option<&'static str> {
    let ext = ext.to_ascii_lowercase();
    let language = match ext.as_str() {
        // Web front-end
        "html" | "htm" => "HTML",
        "css" => "CSS",
        "scss" => "SCSS",
        "sass" => "Sass",
        "js" => "JavaScript",
        "jsx" => "JavaScript (JSX)",
        "ts" => "TypeScript",
        "tsx" => "TypeScript (TSX)",
        "vue" => "Vue",

        // Python
        "py" | "pyw" | "pyi" => "Python",
        "mako" => "Mako",

        // C family
        "c" | "h" => "C",
        "cpp" | "hpp" | "cxx" | "hxx" => "C++",
        "cs" => "C#",

        // JVM
        "java" => "Java",
        "kt" => "Kotlin",
        "kts" => "Kotlin Script",
        "scala" => "Scala",
        "groovy" => "Groovy",

        "go" => "Go",
        "rs" => "Rust",
        "rb" => "Ruby",
        "php" => "PHP",
        "swift" => "Swift",
        "pl" => "Perl",
        "sh" => "Shell",
        "bat" => "Batch",
        "ps1" => "PowerShell",
        "sql" => "SQL",

        // Config & data
        "json" => "JSON",
        "xml" => "XML",
        "yaml" | "yml" => "YAML",
        "ini" => "INI",
        "toml" => "TOML",
        "md" => "Markdown",
        "rst" => "reStructuredText",

        _ => return None,
    };
    Some(language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_extension() {
        assert_eq!(classify("main.py"), Some("Python"));
        assert_eq!(classify("lib.rs"), Some("Rust"));
        assert_eq!(classify("README.md"), Some("Markdown"));
        assert_eq!(classify("config.yml"), Some("YAML"));
        assert_eq!(classify("config.yaml"), Some("YAML"));
        assert_eq!(classify("widget.hxx"), Some("C++"));
    }

    #[test]
    fn test_classify_extension_is_case_insensitive() {
        assert_eq!(classify("MAIN.PY"), Some("Python"));
        assert_eq!(classify("Index.HTML"), Some("HTML"));
        assert_eq!(classify("Build.Kts"), Some("Kotlin Script"));
    }

    #[test]
    fn test_classify_exact_name() {
        assert_eq!(classify("Dockerfile"), Some("Docker"));
        // Exact names are not lower-cased
        assert_eq!(classify("dockerfile"), None);
    }

    #[test]
    fn test_classify_uses_last_suffix_only() {
        assert_eq!(classify("archive.tar.gz"), None);
        assert_eq!(classify("types.d.ts"), Some("TypeScript"));
        assert_eq!(classify("backup.py.orig"), None);
    }

    #[test]
    fn test_classify_no_language() {
        assert_eq!(classify(""), None);
        assert_eq!(classify("Makefile"), None);
        assert_eq!(classify("LICENSE"), None);
        assert_eq!(classify("trailing."), None);
        assert_eq!(classify(".gitignore"), None);
        assert_eq!(classify("..py"), None);
    }

    #[test]
    fn test_classify_bare_extension_name() {
        assert_eq!(classify(".py"), Some("Python"));
        assert_eq!(classify(".rs"), Some("Rust"));
        // Exact keys are lower-case
        assert_eq!(classify(".PY"), None);
    }
}
