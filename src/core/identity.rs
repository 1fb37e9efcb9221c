//! The project identity triplet and how it is recovered from disk.

use serde::Serialize;
use std::path::Path;

use crate::header;
use crate::manifest;
use crate::slugify::{pascal_case, slugify};

/// The authoritative triplet describing a plugin project, plus the file
/// carrying its header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectIdentity {
    /// Human-readable plugin/theme title.
    pub name: String,
    /// PHP namespace (backslash-delimited).
    pub namespace: String,
    /// Translation/text-domain slug, also the CSS class-prefix root.
    pub text_domain: String,
    /// File name of the main plugin file, relative to the project root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_file: Option<String>,
}

impl ProjectIdentity {
    pub fn new(name: &str, namespace: &str, text_domain: &str) -> Self {
        Self {
            name: name.to_string(),
            namespace: namespace.to_string(),
            text_domain: text_domain.to_string(),
            main_file: None,
        }
    }

    /// Recover missing fields from `name`: the text domain falls back to
    /// the slugified name, the namespace to its PascalCase transform.
    pub fn fill_fallbacks(&mut self) {
        if self.name.is_empty() {
            return;
        }
        if self.text_domain.is_empty() {
            self.text_domain = slugify(&self.name);
        }
        if self.namespace.is_empty() {
            self.namespace = pascal_case(&self.name);
        }
    }

    /// Which of the rename-relevant fields are still undetermined.
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.name.is_empty() {
            missing.push("name".to_string());
        }
        if self.namespace.is_empty() {
            missing.push("namespace".to_string());
        }
        if self.text_domain.is_empty() {
            missing.push("text_domain".to_string());
        }
        missing
    }
}

/// Load the current project identity from `dir`.
///
/// Sources, in order: the manifest's `project` section, the composer.json
/// PSR-4 autoload map, and the main file's header comment. Header values
/// win only where the earlier sources left a field empty; fallbacks
/// derived from `name` fill whatever remains.
pub fn load(dir: &Path) -> ProjectIdentity {
    let mut identity = from_manifest(dir)
        .or_else(|| from_composer(dir))
        .unwrap_or_default();

    identity.main_file = find_main_file(dir);

    if let Some(main_file) = identity.main_file.clone() {
        if let Ok(content) = std::fs::read_to_string(dir.join(&main_file)) {
            if identity.name.is_empty() {
                if let Some(name) = header::field(&content, "Plugin Name")
                    .or_else(|| header::field(&content, "Theme Name"))
                {
                    identity.name = name;
                }
            }
            if identity.text_domain.is_empty() {
                if let Some(domain) = header::field(&content, "Text Domain") {
                    identity.text_domain = domain;
                }
            }
        }
    }

    identity.fill_fallbacks();
    identity
}

fn from_manifest(dir: &Path) -> Option<ProjectIdentity> {
    let value = manifest::load(dir)?;
    value.get("project")?;

    Some(ProjectIdentity {
        name: manifest::project_str(&value, "name"),
        namespace: manifest::project_str(&value, "namespace"),
        text_domain: manifest::project_str(&value, "text_domain"),
        main_file: None,
    })
}

/// Fall back to the first PSR-4 namespace prefix declared in composer.json.
fn from_composer(dir: &Path) -> Option<ProjectIdentity> {
    let content = std::fs::read_to_string(dir.join("composer.json")).ok()?;
    let json: serde_json::Value = serde_json::from_str(&content).ok()?;

    let psr4 = json.get("autoload")?.get("psr-4")?.as_object()?;
    let prefix = psr4.keys().next()?;
    let namespace = prefix.trim_end_matches('\\').to_string();
    if namespace.is_empty() {
        return None;
    }

    Some(ProjectIdentity {
        name: namespace.clone(),
        text_domain: slugify(&namespace),
        namespace,
        main_file: None,
    })
}

/// First top-level `.php` file carrying a plugin or theme header.
pub fn find_main_file(dir: &Path) -> Option<String> {
    let mut candidates: Vec<String> = std::fs::read_dir(dir)
        .ok()?
        .flatten()
        .filter_map(|entry| {
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("php") {
                return None;
            }
            let content = std::fs::read_to_string(&path).ok()?;
            if header::has_plugin_header(&content) {
                path.file_name().map(|n| n.to_string_lossy().to_string())
            } else {
                None
            }
        })
        .collect();

    candidates.sort();
    candidates.into_iter().next()
}
