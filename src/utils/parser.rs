//! Core parsing primitives for text extraction and replacement.
//!
//! All regex-driven parsing in wpmoo (plugin headers, version lines,
//! readme banners) is built on these primitives.

use regex::Regex;

/// Extract first match from content using regex pattern with capture group.
/// Pattern must contain exactly one capture group for the value to extract.
pub fn extract_first(content: &str, pattern: &str) -> Option<String> {
    let re = Regex::new(pattern).ok()?;
    re.captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extract all matches from content using regex pattern with capture group.
/// Returns None only on regex compile error.
pub fn extract_all(content: &str, pattern: &str) -> Option<Vec<String>> {
    let re = Regex::new(pattern).ok()?;
    let matches: Vec<String> = re
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect();
    Some(matches)
}

/// Replace all matches of the capture group with a new value.
/// Returns (new_content, replacement_count).
pub fn replace_all(content: &str, pattern: &str, replacement: &str) -> Option<(String, usize)> {
    let re = Regex::new(pattern).ok()?;
    let mut count = 0usize;

    let replaced = re
        .replace_all(content, |caps: &regex::Captures| {
            count += 1;
            let full_match = caps.get(0).map(|m| m.as_str()).unwrap_or("");
            let captured = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            full_match.replacen(captured, replacement, 1)
        })
        .to_string();

    Some((replaced, count))
}

/// Validate all extracted values are identical, return the canonical value.
/// Used for version consistency checks across multiple files.
pub fn require_identical<'a>(values: &'a [String]) -> Option<&'a str> {
    let first = values.first()?;
    if values.iter().all(|v| v == first) {
        Some(first)
    } else {
        None
    }
}
