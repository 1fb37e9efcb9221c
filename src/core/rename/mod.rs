//! The identifier rename engine.
//!
//! Given the detected (`old`) and collected (`new`) identities, rewrite
//! every occurrence of the old values across the project tree. Steps run
//! in a fixed order because later rewrites assume earlier renames already
//! landed on disk. There is no rollback: a failure aborts the remaining
//! steps and keeps whatever was already written.

mod content;
mod readme;
pub(crate) mod textdomain;

use serde::Serialize;
use std::path::Path;

use crate::collect::new_filename;
use crate::error::{Error, Result};
use crate::header;
use crate::identity::ProjectIdentity;
use crate::log_status;
use crate::manifest;
use crate::utils::io;
use crate::walker::{self, WalkFilter};

/// Extensions visited by the display-name passes.
const NAME_PASS_EXTENSIONS: &[&str] = &["php", "js", "txt", "html", "css", "md"];

/// One rename invocation: the detected identity, the collected one, and
/// the files the engine actually changed.
#[derive(Debug, Serialize)]
pub struct RenameOperation {
    pub old: ProjectIdentity,
    pub new: ProjectIdentity,
    pub changed_files: Vec<String>,
}

impl RenameOperation {
    pub fn new(old: ProjectIdentity, new: ProjectIdentity) -> Self {
        Self {
            old,
            new,
            changed_files: Vec::new(),
        }
    }
}

/// Run the full rewrite over `dir`. Consumes the operation and returns it
/// with `changed_files` filled in. An `Err` means the remaining steps were
/// skipped; files already rewritten stay changed on disk.
pub fn execute(dir: &Path, mut op: RenameOperation) -> Result<RenameOperation> {
    rename_main_file(dir, &mut op)?;
    rewrite_header(dir, &mut op)?;
    rewrite_namespaces(dir, &mut op)?;
    rewrite_plugin_names(dir, &mut op)?;
    rewrite_general_references(dir, &mut op)?;
    rewrite_text_domains(dir, &mut op)?;
    rewrite_readme_file(dir, &mut op)?;
    persist_manifest(dir, &mut op)?;
    Ok(op)
}

/// Step 1: move the main file to its new slug-derived name.
fn rename_main_file(dir: &Path, op: &mut RenameOperation) -> Result<()> {
    let old_name = op
        .old
        .main_file
        .clone()
        .ok_or_else(|| Error::rename_main_file_missing("(none detected)"))?;
    let new_name = new_filename(&op.new);
    op.new.main_file = Some(new_name.clone());

    if old_name == new_name {
        return Ok(());
    }

    let from = dir.join(&old_name);
    if !from.is_file() {
        return Err(Error::rename_main_file_missing(
            from.to_string_lossy().to_string(),
        ));
    }

    io::rename_file(&from, &dir.join(&new_name), "rename main file")?;
    log_status!("rename", "Renamed {} -> {}", old_name, new_name);
    op.changed_files.push(new_name);
    Ok(())
}

/// Step 2: update the plugin header in the (now renamed) main file.
fn rewrite_header(dir: &Path, op: &mut RenameOperation) -> Result<()> {
    let Some(main_file) = op.new.main_file.clone().or_else(|| op.old.main_file.clone()) else {
        return Ok(());
    };
    let path = dir.join(&main_file);
    let original = io::read_file(&path, "read main file")?;

    let mut updated = header::set_field(&original, "Plugin Name", &op.new.name)
        .unwrap_or_else(|| original.clone());
    if let Some(with_domain) =
        header::set_or_insert_after(&updated, "Text Domain", &op.new.text_domain, "Plugin Name")
    {
        updated = with_domain;
    }

    if updated != original {
        io::write_file(&path, &updated, "write main file")?;
        log_status!("rename", "Updated {}", main_file);
        if !op.changed_files.contains(&main_file) {
            op.changed_files.push(main_file);
        }
    }
    Ok(())
}

/// Step 3: namespace declarations, prefixes, and `@package` tags in PHP.
fn rewrite_namespaces(dir: &Path, op: &mut RenameOperation) -> Result<()> {
    if op.old.namespace.is_empty() || op.old.namespace == op.new.namespace {
        return Ok(());
    }
    let old = op.old.namespace.clone();
    let new = op.new.namespace.clone();
    walker::rewrite_files(
        dir,
        &WalkFilter::new(&["php"]),
        &mut op.changed_files,
        move |c| content::rewrite_namespace(c, &old, &new),
    )
}

/// Step 4: display-name doc-tags and literal mentions.
fn rewrite_plugin_names(dir: &Path, op: &mut RenameOperation) -> Result<()> {
    if op.old.name.is_empty() || op.old.name == op.new.name {
        return Ok(());
    }
    let old = op.old.name.clone();
    let new = op.new.name.clone();
    walker::rewrite_files(
        dir,
        &WalkFilter::new(NAME_PASS_EXTENSIONS),
        &mut op.changed_files,
        move |c| content::rewrite_plugin_name(c, &old, &new),
    )
}

/// Step 5: `@since`/`@version` lines and any mention the name pass missed.
fn rewrite_general_references(dir: &Path, op: &mut RenameOperation) -> Result<()> {
    if op.old.name.is_empty() || op.old.name == op.new.name {
        return Ok(());
    }
    let old = op.old.name.clone();
    let new = op.new.name.clone();
    walker::rewrite_files(
        dir,
        &WalkFilter::new(NAME_PASS_EXTENSIONS),
        &mut op.changed_files,
        move |c| content::rewrite_general_references(c, &old, &new),
    )
}

/// Step 6: text-domain literals inside translation calls.
fn rewrite_text_domains(dir: &Path, op: &mut RenameOperation) -> Result<()> {
    if op.old.text_domain.is_empty() || op.old.text_domain == op.new.text_domain {
        return Ok(());
    }
    let old = op.old.text_domain.clone();
    let new = op.new.text_domain.clone();
    walker::rewrite_files(
        dir,
        &WalkFilter::new(&["php"]),
        &mut op.changed_files,
        move |c| textdomain::rewrite_text_domains(c, &old, &new).0,
    )
}

/// Step 7: readme.txt banner and leftover mentions.
fn rewrite_readme_file(dir: &Path, op: &mut RenameOperation) -> Result<()> {
    let path = dir.join("readme.txt");
    if !path.is_file() {
        return Ok(());
    }

    let original = io::read_file(&path, "read readme")?;
    let updated = readme::rewrite_readme(&original, &op.old, &op.new);
    if updated != original {
        io::write_file(&path, &updated, "write readme")?;
        log_status!("rename", "Updated readme.txt");
        if !op.changed_files.contains(&"readme.txt".to_string()) {
            op.changed_files.push("readme.txt".to_string());
        }
    }
    Ok(())
}

/// Step 8: persist the new triplet so the next invocation detects it.
fn persist_manifest(dir: &Path, op: &mut RenameOperation) -> Result<()> {
    let before = std::fs::read_to_string(dir.join(manifest::MANIFEST_FILE)).ok();
    manifest::write_identity(dir, &op.new.name, &op.new.namespace, &op.new.text_domain)?;
    let after = std::fs::read_to_string(dir.join(manifest::MANIFEST_FILE)).ok();

    if before != after {
        log_status!("rename", "Updated {}", manifest::MANIFEST_FILE);
        let file = manifest::MANIFEST_FILE.to_string();
        if !op.changed_files.contains(&file) {
            op.changed_files.push(file);
        }
    }
    Ok(())
}
