//! Semantic version bumping across every file that states the version.
//!
//! The main-file header, readme stable tag, manifest, and JSON manifests
//! must agree on the current version before a bump is applied; a mismatch
//! is reported with every sighting so the operator can reconcile first.

use semver::Version;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result, VersionSighting};
use crate::identity;
use crate::log_status;
use crate::manifest;
use crate::utils::{io, parser};

const HEADER_VERSION_PATTERN: &str = r"(?m)^[ \t*#@/]*Version[ \t]*:[ \t]*([0-9][0-9A-Za-z.+-]*)[ \t]*$";
const STABLE_TAG_PATTERN: &str = r"(?m)^Stable tag[ \t]*:[ \t]*([0-9][0-9A-Za-z.+-]*)[ \t]*$";

/// How a bump was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BumpSpec {
    Patch,
    Minor,
    Major,
    Explicit(Version),
}

impl BumpSpec {
    /// Parse a CLI argument: a bump level or an explicit semver string.
    pub fn parse(input: &str) -> Result<Self> {
        match input {
            "patch" => Ok(BumpSpec::Patch),
            "minor" => Ok(BumpSpec::Minor),
            "major" => Ok(BumpSpec::Major),
            other => Version::parse(other).map(BumpSpec::Explicit).map_err(|e| {
                Error::validation_invalid_argument(
                    "version",
                    format!("Expected patch, minor, major, or a semver version: {}", e),
                    Some(other.to_string()),
                    None,
                )
            }),
        }
    }

    /// The version a bump of `current` produces. Pre-release and build
    /// metadata are cleared by level bumps.
    pub fn apply(&self, current: &Version) -> Version {
        match self {
            BumpSpec::Patch => Version::new(current.major, current.minor, current.patch + 1),
            BumpSpec::Minor => Version::new(current.major, current.minor + 1, 0),
            BumpSpec::Major => Version::new(current.major + 1, 0, 0),
            BumpSpec::Explicit(v) => v.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TargetReport {
    pub file: String,
    pub replacements: usize,
}

#[derive(Debug, Serialize)]
pub struct VersionBump {
    pub old_version: String,
    pub new_version: String,
    pub targets: Vec<TargetReport>,
}

enum TargetKind {
    /// Plugin-header `Version:` line.
    Header,
    /// readme.txt `Stable tag:` line.
    StableTag,
    /// `version` key of a JSON manifest.
    Json,
    /// `project.version` key of the wpmoo manifest.
    Manifest,
}

struct Target {
    file: String,
    path: PathBuf,
    kind: TargetKind,
}

/// Discover every version target present in `dir`.
fn discover_targets(dir: &Path) -> Vec<Target> {
    let mut targets = Vec::new();

    if let Some(main_file) = identity::find_main_file(dir) {
        targets.push(Target {
            path: dir.join(&main_file),
            file: main_file,
            kind: TargetKind::Header,
        });
    }

    if dir.join("readme.txt").is_file() {
        targets.push(Target {
            file: "readme.txt".to_string(),
            path: dir.join("readme.txt"),
            kind: TargetKind::StableTag,
        });
    }

    for json in ["composer.json", "package.json"] {
        if dir.join(json).is_file() {
            targets.push(Target {
                file: json.to_string(),
                path: dir.join(json),
                kind: TargetKind::Json,
            });
        }
    }

    if manifest::project_version(dir).is_some() {
        targets.push(Target {
            file: manifest::MANIFEST_FILE.to_string(),
            path: dir.join(manifest::MANIFEST_FILE),
            kind: TargetKind::Manifest,
        });
    }

    targets
}

fn read_target_version(target: &Target) -> Result<Option<String>> {
    match target.kind {
        TargetKind::Header => {
            let content = io::read_file(&target.path, "read version target")?;
            Ok(parser::extract_first(&content, HEADER_VERSION_PATTERN))
        }
        TargetKind::StableTag => {
            let content = io::read_file(&target.path, "read version target")?;
            Ok(parser::extract_first(&content, STABLE_TAG_PATTERN))
        }
        TargetKind::Json => {
            let content = io::read_file(&target.path, "read version target")?;
            let json: serde_json::Value = serde_json::from_str(&content)
                .map_err(|e| Error::internal_json(e.to_string(), Some(target.file.clone())))?;
            Ok(json
                .get("version")
                .and_then(|v| v.as_str())
                .map(|v| v.to_string()))
        }
        TargetKind::Manifest => {
            let dir = target.path.parent().unwrap_or(Path::new("."));
            Ok(manifest::project_version(dir))
        }
    }
}

fn write_target_version(target: &Target, new_version: &str) -> Result<usize> {
    match target.kind {
        TargetKind::Header => {
            let content = io::read_file(&target.path, "read version target")?;
            let (updated, count) =
                parser::replace_all(&content, HEADER_VERSION_PATTERN, new_version)
                    .unwrap_or((content.clone(), 0));
            if count > 0 {
                io::write_file(&target.path, &updated, "write version target")?;
            }
            Ok(count)
        }
        TargetKind::StableTag => {
            let content = io::read_file(&target.path, "read version target")?;
            let (updated, count) = parser::replace_all(&content, STABLE_TAG_PATTERN, new_version)
                .unwrap_or((content.clone(), 0));
            if count > 0 {
                io::write_file(&target.path, &updated, "write version target")?;
            }
            Ok(count)
        }
        TargetKind::Json => {
            let content = io::read_file(&target.path, "read version target")?;
            let mut json: serde_json::Value = serde_json::from_str(&content)
                .map_err(|e| Error::internal_json(e.to_string(), Some(target.file.clone())))?;
            let Some(obj) = json.as_object_mut() else {
                return Ok(0);
            };
            if !obj.contains_key("version") {
                return Ok(0);
            }
            obj.insert(
                "version".to_string(),
                serde_json::Value::String(new_version.to_string()),
            );
            let serialized = serde_json::to_string_pretty(&json)
                .map_err(|e| Error::internal_json(e.to_string(), Some(target.file.clone())))?;
            io::write_file(&target.path, &format!("{}\n", serialized), "write version target")?;
            Ok(1)
        }
        TargetKind::Manifest => {
            let dir = target.path.parent().unwrap_or(Path::new("."));
            manifest::write_version(dir, new_version)?;
            Ok(1)
        }
    }
}

/// Bump the project version across every target in `dir`.
pub fn bump(dir: &Path, spec: &BumpSpec) -> Result<VersionBump> {
    let targets = discover_targets(dir);

    let mut sightings: Vec<VersionSighting> = Vec::new();
    for target in &targets {
        if let Some(version) = read_target_version(target)? {
            sightings.push(VersionSighting {
                file: target.file.clone(),
                version,
            });
        }
    }

    if sightings.is_empty() {
        return Err(Error::version_not_found(dir.to_string_lossy().to_string()));
    }

    let versions: Vec<String> = sightings.iter().map(|s| s.version.clone()).collect();
    let Some(current_str) = parser::require_identical(&versions) else {
        return Err(Error::version_mismatch(sightings));
    };

    let current = Version::parse(current_str).map_err(|e| {
        Error::config_invalid_value(
            "version",
            Some(current_str.to_string()),
            format!("Not a semantic version: {}", e),
        )
    })?;

    let next = spec.apply(&current);
    if next == current {
        return Err(Error::validation_invalid_argument(
            "version",
            format!("Already at {}", current),
            Some(next.to_string()),
            None,
        ));
    }

    let next_str = next.to_string();
    let mut reports = Vec::new();
    for target in &targets {
        if read_target_version(target)?.is_none() {
            continue;
        }
        let replacements = write_target_version(target, &next_str)?;
        if replacements > 0 {
            log_status!("version", "{}: {} -> {}", target.file, current, next_str);
            reports.push(TargetReport {
                file: target.file.clone(),
                replacements,
            });
        }
    }

    Ok(VersionBump {
        old_version: current.to_string(),
        new_version: next_str,
        targets: reports,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(dir: &Path, version: &str) {
        std::fs::write(
            dir.join("demo-plugin.php"),
            format!(
                "<?php\n/**\n * Plugin Name: Demo\n * Version: {}\n */\n",
                version
            ),
        )
        .unwrap();
        std::fs::write(
            dir.join("readme.txt"),
            format!("=== Demo ===\nStable tag: {}\n", version),
        )
        .unwrap();
    }

    #[test]
    fn bump_spec_parses_levels_and_semver() {
        assert_eq!(BumpSpec::parse("patch").unwrap(), BumpSpec::Patch);
        assert_eq!(BumpSpec::parse("minor").unwrap(), BumpSpec::Minor);
        assert_eq!(BumpSpec::parse("major").unwrap(), BumpSpec::Major);
        assert_eq!(
            BumpSpec::parse("2.0.0").unwrap(),
            BumpSpec::Explicit(Version::new(2, 0, 0))
        );
        assert!(BumpSpec::parse("two-point-oh").is_err());
    }

    #[test]
    fn levels_reset_lower_fields() {
        let v = Version::new(1, 2, 3);
        assert_eq!(BumpSpec::Patch.apply(&v), Version::new(1, 2, 4));
        assert_eq!(BumpSpec::Minor.apply(&v), Version::new(1, 3, 0));
        assert_eq!(BumpSpec::Major.apply(&v), Version::new(2, 0, 0));
    }

    #[test]
    fn bump_rewrites_header_and_stable_tag() {
        let dir = tempfile::tempdir().unwrap();
        fixture(dir.path(), "1.2.3");

        let result = bump(dir.path(), &BumpSpec::Minor).unwrap();
        assert_eq!(result.old_version, "1.2.3");
        assert_eq!(result.new_version, "1.3.0");
        assert_eq!(result.targets.len(), 2);

        let main = std::fs::read_to_string(dir.path().join("demo-plugin.php")).unwrap();
        assert!(main.contains("Version: 1.3.0"));
        let readme = std::fs::read_to_string(dir.path().join("readme.txt")).unwrap();
        assert!(readme.contains("Stable tag: 1.3.0"));
    }

    #[test]
    fn bump_updates_json_manifests() {
        let dir = tempfile::tempdir().unwrap();
        fixture(dir.path(), "1.0.0");
        std::fs::write(
            dir.path().join("composer.json"),
            "{\n  \"name\": \"acme/demo\",\n  \"version\": \"1.0.0\"\n}\n",
        )
        .unwrap();

        let result = bump(dir.path(), &BumpSpec::Patch).unwrap();
        assert_eq!(result.new_version, "1.0.1");

        let composer = std::fs::read_to_string(dir.path().join("composer.json")).unwrap();
        assert!(composer.contains("\"version\": \"1.0.1\""));
        assert!(composer.contains("\"name\": \"acme/demo\""));
    }

    #[test]
    fn mismatched_versions_refuse_to_bump() {
        let dir = tempfile::tempdir().unwrap();
        fixture(dir.path(), "1.2.3");
        std::fs::write(
            dir.path().join("readme.txt"),
            "=== Demo ===\nStable tag: 1.2.0\n",
        )
        .unwrap();

        let err = bump(dir.path(), &BumpSpec::Patch).unwrap_err();
        assert_eq!(err.code.as_str(), "version.mismatch");
    }

    #[test]
    fn explicit_version_must_differ() {
        let dir = tempfile::tempdir().unwrap();
        fixture(dir.path(), "1.2.3");

        let spec = BumpSpec::parse("1.2.3").unwrap();
        let err = bump(dir.path(), &spec).unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }

    #[test]
    fn no_targets_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = bump(dir.path(), &BumpSpec::Patch).unwrap_err();
        assert_eq!(err.code.as_str(), "version.not_found");
    }
}
