//! Generic file-tree walking with extension filters and exclusions.
//!
//! Every recursive rewrite in the tool goes through this walker so the
//! skip rules (dependency dirs, build output, hidden entries) live in
//! exactly one place.

use crate::error::Result;
use crate::log_status;
use crate::utils::io;
use glob_match::glob_match;
use std::path::{Path, PathBuf};

/// Entry-name patterns that are never descended into or rewritten.
pub const SKIP_PATTERNS: &[&str] = &["vendor", "node_modules", "dist", ".*"];

/// What to visit: file extensions (no dot) plus exclusion patterns matched
/// against individual entry names.
pub struct WalkFilter<'a> {
    pub extensions: &'a [&'a str],
    pub exclude: &'a [&'a str],
}

impl<'a> WalkFilter<'a> {
    pub fn new(extensions: &'a [&'a str]) -> Self {
        Self {
            extensions,
            exclude: SKIP_PATTERNS,
        }
    }
}

fn excluded(name: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|pattern| glob_match(pattern, name))
}

/// Collect matching files under `root`, sorted for deterministic output.
pub fn walk(root: &Path, filter: &WalkFilter) -> Vec<PathBuf> {
    let mut files = Vec::new();
    walk_recursive(root, filter, &mut files);
    files.sort();
    files
}

fn walk_recursive(dir: &Path, filter: &WalkFilter, files: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();

        if excluded(&name, filter.exclude) {
            continue;
        }

        if path.is_dir() {
            walk_recursive(&path, filter, files);
        } else if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            if filter.extensions.contains(&ext) {
                files.push(path);
            }
        }
    }
}

/// Apply a content transform to every matching file under `root`.
///
/// Files whose rewritten content is byte-identical are left untouched and
/// not reported. Paths of changed files (relative to `root`) are appended
/// to `changed` and echoed as one-line confirmations. The first I/O
/// failure aborts the walk.
pub fn rewrite_files(
    root: &Path,
    filter: &WalkFilter,
    changed: &mut Vec<String>,
    transform: impl Fn(&str) -> String,
) -> Result<()> {
    for path in walk(root, filter) {
        let content = io::read_file(&path, "read")?;
        let rewritten = transform(&content);
        if rewritten == content {
            continue;
        }

        io::write_file(&path, &rewritten, "write")?;

        let relative = path
            .strip_prefix(root)
            .unwrap_or(&path)
            .to_string_lossy()
            .to_string();
        log_status!("rename", "Updated {}", relative);
        if !changed.contains(&relative) {
            changed.push(relative);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn walk_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.php", "");
        touch(dir.path(), "b.js", "");
        touch(dir.path(), "inc/c.php", "");

        let files = walk(dir.path(), &WalkFilter::new(&["php"]));
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.php", "inc/c.php"]);
    }

    #[test]
    fn walk_skips_dependency_and_hidden_dirs() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "ok.php", "");
        touch(dir.path(), "vendor/lib.php", "");
        touch(dir.path(), "node_modules/pkg/index.php", "");
        touch(dir.path(), "dist/build.php", "");
        touch(dir.path(), ".git/hook.php", "");
        touch(dir.path(), ".hidden.php", "");

        let files = walk(dir.path(), &WalkFilter::new(&["php"]));
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("ok.php"));
    }

    #[test]
    fn rewrite_files_suppresses_noop_writes() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.php", "alpha");
        touch(dir.path(), "b.php", "beta");

        let mut changed = Vec::new();
        rewrite_files(dir.path(), &WalkFilter::new(&["php"]), &mut changed, |c| {
            c.replace("beta", "gamma")
        })
        .unwrap();

        assert_eq!(changed, vec!["b.php"]);
        assert_eq!(std::fs::read_to_string(dir.path().join("b.php")).unwrap(), "gamma");
    }

    #[test]
    fn rewrite_files_never_touches_excluded_trees() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "vendor/lib.php", "beta");

        let mut changed = Vec::new();
        rewrite_files(dir.path(), &WalkFilter::new(&["php"]), &mut changed, |c| {
            c.replace("beta", "gamma")
        })
        .unwrap();

        assert!(changed.is_empty());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("vendor/lib.php")).unwrap(),
            "beta"
        );
    }
}
