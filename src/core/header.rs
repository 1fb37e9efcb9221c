//! WordPress plugin-header comment parsing and rewriting.
//!
//! Header fields live in the main file's top comment block as
//! `Field Name: value` lines, tolerant of leading whitespace and the
//! `*`, `#`, `@`, `/` comment decorations WordPress accepts.

use crate::utils::parser;
use regex::Regex;

/// Comment-prefix-tolerant pattern for a single header field line.
/// Capture group 1 is the field value.
fn field_pattern(field: &str) -> String {
    format!(
        r"(?m)^[ \t*#@/]*{}[ \t]*:[ \t]*(.+?)[ \t]*$",
        regex::escape(field)
    )
}

/// Read the value of a header field, trimmed. None if the field is absent.
pub fn field(content: &str, name: &str) -> Option<String> {
    parser::extract_first(content, &field_pattern(name)).filter(|v| !v.is_empty())
}

/// True when the content carries a plugin or theme header field.
pub fn has_plugin_header(content: &str) -> bool {
    field(content, "Plugin Name").is_some() || field(content, "Theme Name").is_some()
}

/// Replace the value of an existing header field (first occurrence).
/// Returns None when the field is absent (nothing replaced).
pub fn set_field(content: &str, name: &str, value: &str) -> Option<String> {
    let re = Regex::new(&field_pattern(name)).ok()?;
    let span = re.captures(content)?.get(1)?;

    let mut out = content.to_string();
    out.replace_range(span.start()..span.end(), value);
    Some(out)
}

/// Insert a header field line directly after an existing anchor field,
/// reusing the anchor line's comment decoration.
/// Returns None when the anchor field is absent.
pub fn insert_field_after(content: &str, anchor: &str, name: &str, value: &str) -> Option<String> {
    let line_re = Regex::new(&format!(
        r"(?m)^(?P<prefix>[ \t*#@/]*){}[ \t]*:.*$",
        regex::escape(anchor)
    ))
    .ok()?;

    let caps = line_re.captures(content)?;
    let whole = caps.get(0)?;
    let prefix = caps.name("prefix").map(|m| m.as_str()).unwrap_or("");

    let mut out = String::with_capacity(content.len() + name.len() + value.len() + 8);
    out.push_str(&content[..whole.end()]);
    out.push('\n');
    out.push_str(prefix);
    out.push_str(name);
    out.push_str(": ");
    out.push_str(value);
    out.push_str(&content[whole.end()..]);
    Some(out)
}

/// Set a header field, inserting it after `anchor` when absent.
/// Returns None when neither the field nor the anchor exists.
pub fn set_or_insert_after(
    content: &str,
    name: &str,
    value: &str,
    anchor: &str,
) -> Option<String> {
    set_field(content, name, value).or_else(|| insert_field_after(content, anchor, name, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "<?php\n/**\n * Plugin Name: Old Plugin\n * Description: Does things.\n * Version: 1.2.0\n * Text Domain: old-plugin\n */\n";

    #[test]
    fn field_reads_values() {
        assert_eq!(field(HEADER, "Plugin Name").as_deref(), Some("Old Plugin"));
        assert_eq!(field(HEADER, "Text Domain").as_deref(), Some("old-plugin"));
        assert_eq!(field(HEADER, "Version").as_deref(), Some("1.2.0"));
        assert_eq!(field(HEADER, "Stable tag"), None);
    }

    #[test]
    fn field_tolerates_hash_and_at_prefixes() {
        let content = "# Plugin Name: Hashy\n@Text Domain: hashy\n";
        assert_eq!(field(content, "Plugin Name").as_deref(), Some("Hashy"));
        assert_eq!(field(content, "Text Domain").as_deref(), Some("hashy"));
    }

    #[test]
    fn set_field_rewrites_value_only() {
        let updated = set_field(HEADER, "Plugin Name", "New Plugin").unwrap();
        assert!(updated.contains(" * Plugin Name: New Plugin\n"));
        assert!(updated.contains(" * Description: Does things."));
    }

    #[test]
    fn set_field_returns_none_for_missing_field() {
        assert_eq!(set_field(HEADER, "Stable tag", "1.0.0"), None);
    }

    #[test]
    fn insert_field_after_copies_decoration() {
        let content = "<?php\n/**\n * Plugin Name: Bare\n */\n";
        let updated = insert_field_after(content, "Plugin Name", "Text Domain", "bare").unwrap();
        assert!(updated.contains(" * Plugin Name: Bare\n * Text Domain: bare\n"));
    }

    #[test]
    fn set_or_insert_prefers_existing_line() {
        let updated = set_or_insert_after(HEADER, "Text Domain", "new-plugin", "Plugin Name").unwrap();
        assert!(updated.contains(" * Text Domain: new-plugin"));
        assert_eq!(updated.matches("Text Domain").count(), 1);
    }

    #[test]
    fn set_or_insert_falls_back_to_insertion() {
        let content = "<?php\n/*\nPlugin Name: Minimal\n*/\n";
        let updated = set_or_insert_after(content, "Text Domain", "minimal", "Plugin Name").unwrap();
        assert!(updated.contains("Plugin Name: Minimal\nText Domain: minimal\n"));
    }
}
