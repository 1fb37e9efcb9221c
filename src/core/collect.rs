//! Interactive collection and validation of the new project identity.

use regex::Regex;

use crate::context::FRAMEWORK_TOKEN;
use crate::error::Result;
use crate::identity::ProjectIdentity;
use crate::prompt::PromptPort;
use crate::slugify::{pascal_case, slugify};

const NAMESPACE_SEGMENT: &str = r"^[A-Za-z_\x7F-\x{FF}][A-Za-z0-9_\x7F-\x{FF}]*$";
const TEXT_DOMAIN: &str = r"^[a-z0-9]+(-[a-z0-9]+)*$";

/// Validate a plugin display name.
pub fn validate_name(name: &str) -> std::result::Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if contains_reserved(name) {
        return Err(format!(
            "Name must not contain the reserved word '{}'",
            FRAMEWORK_TOKEN
        ));
    }
    Ok(())
}

/// Validate a PHP namespace: non-empty, reserved-word-free, every
/// backslash-delimited segment a valid identifier.
pub fn validate_namespace(namespace: &str) -> std::result::Result<(), String> {
    if namespace.trim().is_empty() {
        return Err("Namespace cannot be empty".to_string());
    }
    if contains_reserved(namespace) {
        return Err(format!(
            "Namespace must not contain the reserved word '{}'",
            FRAMEWORK_TOKEN
        ));
    }

    let Ok(segment_re) = Regex::new(NAMESPACE_SEGMENT) else {
        return Err("Namespace could not be validated".to_string());
    };
    for segment in namespace.split('\\') {
        if !segment_re.is_match(segment) {
            return Err(format!("Invalid namespace segment '{}'", segment));
        }
    }
    Ok(())
}

/// Validate a text domain slug.
pub fn validate_text_domain(domain: &str) -> std::result::Result<(), String> {
    let Ok(re) = Regex::new(TEXT_DOMAIN) else {
        return Err("Text domain could not be validated".to_string());
    };
    if !re.is_match(domain) {
        return Err(format!(
            "Text domain must be lowercase hyphen-separated, like '{}'",
            slugify(domain)
        ));
    }
    Ok(())
}

fn contains_reserved(value: &str) -> bool {
    value.to_lowercase().contains(FRAMEWORK_TOKEN)
}

/// Re-prompt until the validator accepts the answer. No retry limit; the
/// operator escapes by interrupting the process.
fn ask_validated(
    port: &dyn PromptPort,
    question: &str,
    default: Option<&str>,
    validate: impl Fn(&str) -> std::result::Result<(), String>,
) -> Result<String> {
    loop {
        let answer = port.ask(question, default)?;
        match validate(&answer) {
            Ok(()) => return Ok(answer),
            Err(problem) => port.message(&format!("  {}", problem)),
        }
    }
}

/// Collect the new identity triplet from the operator.
///
/// Shows a full old → new summary and requires explicit confirmation.
/// Returns None when the operator declines; nothing has been touched at
/// that point.
pub fn collect_new_identity(
    port: &dyn PromptPort,
    old: &ProjectIdentity,
) -> Result<Option<ProjectIdentity>> {
    port.message(&format!(
        "Current project: {} ({}, text domain '{}')",
        old.name, old.namespace, old.text_domain
    ));

    let name = ask_validated(port, "New plugin name", None, validate_name)?;

    let recommended_ns = pascal_case(&name);
    let namespace = ask_validated(
        port,
        "New namespace",
        Some(recommended_ns.as_str()),
        validate_namespace,
    )?;

    let recommended_domain = slugify(&name);
    let text_domain = ask_validated(
        port,
        "New text domain",
        Some(recommended_domain.as_str()),
        validate_text_domain,
    )?;

    let mut new = ProjectIdentity::new(&name, &namespace, &text_domain);
    new.main_file = Some(new_filename(&new));

    port.message("");
    port.message("The following changes will be applied:");
    port.message(&format!("  name:        {} -> {}", old.name, new.name));
    port.message(&format!(
        "  namespace:   {} -> {}",
        old.namespace, new.namespace
    ));
    port.message(&format!(
        "  text domain: {} -> {}",
        old.text_domain, new.text_domain
    ));
    if let Some(old_file) = &old.main_file {
        port.message(&format!(
            "  main file:   {} -> {}",
            old_file,
            new.main_file.as_deref().unwrap_or_default()
        ));
    }

    if !port.confirm("Apply these changes?", false)? {
        return Ok(None);
    }

    Ok(Some(new))
}

/// File name the renamed main file will take.
pub fn new_filename(identity: &ProjectIdentity) -> String {
    format!("{}.php", slugify(&identity.name))
}
