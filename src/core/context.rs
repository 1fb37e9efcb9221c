//! Project context detection for the current working directory.

use serde::Serialize;
use std::path::Path;

use crate::header;

/// Reserved framework token. Plugin names and namespaces must not contain it,
/// and its presence in a source file marks the project as WPMoo-based.
pub const FRAMEWORK_TOKEN: &str = "wpmoo";

/// Entry file of the framework itself.
pub const FRAMEWORK_ENTRY: &str = "wpmoo.php";

/// What kind of project a directory holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    /// The framework repository itself.
    Framework,
    /// A plugin or theme built on the framework.
    Plugin,
    /// Anything else.
    Unknown,
}

/// Detect what kind of project `dir` holds.
///
/// Framework: the framework entry file exists and carries the marker token.
/// Plugin: some top-level source file carries both the marker token and a
/// WordPress plugin/theme header field.
///
/// Read-only, scans top-level files only, and never fails: unreadable
/// files simply do not contribute evidence.
pub fn detect(dir: &Path) -> ProjectKind {
    let entry = dir.join(FRAMEWORK_ENTRY);
    if let Ok(content) = std::fs::read_to_string(&entry) {
        if content.to_lowercase().contains(FRAMEWORK_TOKEN) && !header::has_plugin_header(&content)
        {
            return ProjectKind::Framework;
        }
    }

    let Ok(entries) = std::fs::read_dir(dir) else {
        return ProjectKind::Unknown;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some("php") {
            continue;
        }
        let Ok(content) = std::fs::read_to_string(&path) else {
            continue;
        };
        if content.to_lowercase().contains(FRAMEWORK_TOKEN) && header::has_plugin_header(&content) {
            return ProjectKind::Plugin;
        }
    }

    ProjectKind::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_framework_by_entry_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("wpmoo.php"),
            "<?php\n// WPMoo framework bootstrap\n",
        )
        .unwrap();

        assert_eq!(detect(dir.path()), ProjectKind::Framework);
    }

    #[test]
    fn detects_plugin_by_marker_and_header() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("my-plugin.php"),
            "<?php\n/**\n * Plugin Name: My Plugin\n */\nwpmoo('my-plugin');\n",
        )
        .unwrap();

        assert_eq!(detect(dir.path()), ProjectKind::Plugin);
    }

    #[test]
    fn detects_theme_header_too() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("functions.php"),
            "<?php\n# Theme Name: Moo Theme\nWPMoo\\Theme::boot();\n",
        )
        .unwrap();

        assert_eq!(detect(dir.path()), ProjectKind::Plugin);
    }

    #[test]
    fn marker_without_header_is_unknown() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tool.php"), "<?php // uses wpmoo\n").unwrap();

        assert_eq!(detect(dir.path()), ProjectKind::Unknown);
    }

    #[test]
    fn header_without_marker_is_unknown() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("plain.php"),
            "<?php\n/* Plugin Name: Plain Plugin */\n",
        )
        .unwrap();

        assert_eq!(detect(dir.path()), ProjectKind::Unknown);
    }

    #[test]
    fn nested_files_do_not_count() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("inc");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(
            sub.join("plugin.php"),
            "<?php\n/* Plugin Name: Deep */ // wpmoo\n",
        )
        .unwrap();

        assert_eq!(detect(dir.path()), ProjectKind::Unknown);
    }

    #[test]
    fn empty_directory_is_unknown() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(detect(dir.path()), ProjectKind::Unknown);
    }
}
