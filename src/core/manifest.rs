//! The project manifest: `wpmoo-config.yml`.
//!
//! The manifest carries a `project` section with the identity triplet and
//! whatever other keys the operator keeps there (`author`, `license`,
//! build settings). Only the keys this tool owns are ever touched; the
//! rest round-trip untouched through the YAML value tree.

use crate::error::{Error, Result};
use crate::log_status;
use crate::utils::io;
use serde_yml::Value;
use std::path::Path;

pub const MANIFEST_FILE: &str = "wpmoo-config.yml";

/// Load the manifest as a YAML value tree.
///
/// Missing file or malformed YAML both yield None; a parse failure is a
/// recoverable condition (the identity loader falls back to the plugin
/// header), reported only as a status line.
pub fn load(dir: &Path) -> Option<Value> {
    let path = dir.join(MANIFEST_FILE);
    let content = std::fs::read_to_string(&path).ok()?;
    match serde_yml::from_str::<Value>(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            log_status!("config", "Ignoring malformed {}: {}", MANIFEST_FILE, e);
            None
        }
    }
}

/// Read a string key from the manifest's `project` section, empty when absent.
pub fn project_str(manifest: &Value, key: &str) -> String {
    manifest
        .get("project")
        .and_then(|p| p.get(key))
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

/// Read the `project.version` key, if present and non-empty.
pub fn project_version(dir: &Path) -> Option<String> {
    let manifest = load(dir)?;
    let version = project_str(&manifest, "version");
    if version.is_empty() {
        None
    } else {
        Some(version)
    }
}

/// Write the identity triplet into the `project` section, preserving all
/// other keys. Creates the manifest when it does not exist yet.
pub fn write_identity(dir: &Path, name: &str, namespace: &str, text_domain: &str) -> Result<()> {
    update_project(dir, |project| {
        insert_str(project, "name", name);
        insert_str(project, "namespace", namespace);
        insert_str(project, "text_domain", text_domain);
    })
}

/// Write the `project.version` key, preserving all other keys.
pub fn write_version(dir: &Path, version: &str) -> Result<()> {
    update_project(dir, |project| {
        insert_str(project, "version", version);
    })
}

fn update_project(dir: &Path, apply: impl FnOnce(&mut serde_yml::Mapping)) -> Result<()> {
    let path = dir.join(MANIFEST_FILE);

    let mut root = match load(dir) {
        Some(Value::Mapping(m)) => m,
        // A malformed or scalar manifest is replaced rather than merged.
        _ => serde_yml::Mapping::new(),
    };

    let project_key = Value::String("project".to_string());
    if !matches!(root.get(&project_key), Some(Value::Mapping(_))) {
        root.insert(
            project_key.clone(),
            Value::Mapping(serde_yml::Mapping::new()),
        );
    }
    let project = root
        .get_mut(&project_key)
        .and_then(Value::as_mapping_mut)
        .ok_or_else(|| Error::internal_unexpected("project section vanished"))?;

    apply(project);

    let serialized = serde_yml::to_string(&Value::Mapping(root))
        .map_err(|e| Error::internal_yaml(e.to_string(), Some("serialize manifest".to_string())))?;

    io::write_file_atomic(&path, &serialized, "write manifest")
}

fn insert_str(mapping: &mut serde_yml::Mapping, key: &str, value: &str) {
    mapping.insert(
        Value::String(key.to_string()),
        Value::String(value.to_string()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_returns_none_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(dir.path()).is_none());
    }

    #[test]
    fn load_returns_none_for_malformed_yaml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "project: [unclosed\n").unwrap();
        assert!(load(dir.path()).is_none());
    }

    #[test]
    fn project_str_reads_keys_with_empty_default() {
        let manifest: Value =
            serde_yml::from_str("project:\n  name: Old Plugin\n  text_domain: old-plugin\n")
                .unwrap();
        assert_eq!(project_str(&manifest, "name"), "Old Plugin");
        assert_eq!(project_str(&manifest, "text_domain"), "old-plugin");
        assert_eq!(project_str(&manifest, "namespace"), "");
    }

    #[test]
    fn write_identity_creates_manifest() {
        let dir = tempfile::tempdir().unwrap();
        write_identity(dir.path(), "New Plugin", "NewNs", "new-plugin").unwrap();

        let manifest = load(dir.path()).unwrap();
        assert_eq!(project_str(&manifest, "name"), "New Plugin");
        assert_eq!(project_str(&manifest, "namespace"), "NewNs");
        assert_eq!(project_str(&manifest, "text_domain"), "new-plugin");
    }

    #[test]
    fn write_identity_preserves_unrelated_keys() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            "project:\n  name: Old Plugin\n  author: Jo Bloggs\n  license: GPL-2.0\nbuild:\n  scss: assets/scss\n",
        )
        .unwrap();

        write_identity(dir.path(), "New Plugin", "NewNs", "new-plugin").unwrap();

        let manifest = load(dir.path()).unwrap();
        assert_eq!(project_str(&manifest, "name"), "New Plugin");
        assert_eq!(project_str(&manifest, "author"), "Jo Bloggs");
        assert_eq!(project_str(&manifest, "license"), "GPL-2.0");
        assert_eq!(
            manifest.get("build").and_then(|b| b.get("scss")).and_then(|v| v.as_str()),
            Some("assets/scss")
        );
    }

    #[test]
    fn write_version_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        write_version(dir.path(), "1.4.0").unwrap();
        assert_eq!(project_version(dir.path()).as_deref(), Some("1.4.0"));
    }
}
