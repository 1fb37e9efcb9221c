//! Word-boundary-aware replacement primitives for content passes.

/// Check if a byte is a boundary for matching purposes.
fn is_boundary_byte(b: u8) -> bool {
    !b.is_ascii_alphanumeric() && b != b'_'
}

/// Find all occurrences of `term` in `text` that sit at word boundaries.
///
/// A boundary exists at string edges and at any non-identifier character,
/// so "Old Plugin" matches in "the Old Plugin rocks" but not in
/// "Old Plugins" or "MyOld Plugin".
pub(crate) fn find_bounded(text: &str, term: &str) -> Vec<usize> {
    let text_bytes = text.as_bytes();
    let term_len = term.len();
    let mut matches = Vec::new();

    if term_len == 0 || term_len > text.len() {
        return matches;
    }

    let mut start = 0;
    while let Some(pos) = text[start..].find(term) {
        let abs = start + pos;
        let end = abs + term_len;

        let left_ok = abs == 0 || is_boundary_byte(text_bytes[abs - 1]);
        let right_ok = end >= text.len() || is_boundary_byte(text_bytes[end]);

        if left_ok && right_ok {
            matches.push(abs);
        }

        // Advance one full character so the next find starts on a boundary.
        start = abs
            + text[abs..]
                .chars()
                .next()
                .map(|c| c.len_utf8())
                .unwrap_or(1);
    }

    matches
}

/// Replace boundary-checked occurrences, returning the rewritten text and
/// the replacement count. Offsets are applied back-to-front so earlier
/// positions stay valid.
pub(crate) fn replace_bounded(text: &str, from: &str, to: &str) -> (String, usize) {
    let positions = find_bounded(text, from);
    if positions.is_empty() {
        return (text.to_string(), 0);
    }

    let mut out = text.to_string();
    for pos in positions.iter().rev() {
        out.replace_range(*pos..*pos + from.len(), to);
    }
    (out, positions.len())
}

/// Replace every exact occurrence (no boundary check). Used where the
/// term's own shape bounds it, like a namespace prefix ending in `\`.
pub(crate) fn replace_literal(text: &str, from: &str, to: &str) -> (String, usize) {
    let count = text.matches(from).count();
    if count == 0 {
        return (text.to_string(), 0);
    }
    (text.replace(from, to), count)
}

/// Rewrite PHP namespace references: the `Old\` prefix form, the exact
/// `namespace Old;` declaration, and `@package Old` doc-tags.
pub(crate) fn rewrite_namespace(content: &str, old: &str, new: &str) -> String {
    // Prefix form first so the declaration pass sees no stale prefixes.
    let (content, _) = replace_bounded_prefix(content, old, new);
    let (content, _) = replace_literal(
        &content,
        &format!("namespace {};", old),
        &format!("namespace {};", new),
    );
    let (content, _) = replace_bounded(
        &content,
        &format!("@package {}", old),
        &format!("@package {}", new),
    );
    content
}

/// Replace `Old\` namespace prefixes with a left boundary check so
/// `NotOld\` survives.
fn replace_bounded_prefix(text: &str, old: &str, new: &str) -> (String, usize) {
    let from = format!("{}\\", old);
    let to = format!("{}\\", new);
    let text_bytes = text.as_bytes();

    let mut positions = Vec::new();
    let mut start = 0;
    while let Some(pos) = text[start..].find(&from) {
        let abs = start + pos;
        let left_ok = abs == 0 || is_boundary_byte(text_bytes[abs - 1]);
        if left_ok {
            positions.push(abs);
        }
        start = abs
            + text[abs..]
                .chars()
                .next()
                .map(|c| c.len_utf8())
                .unwrap_or(1);
    }

    if positions.is_empty() {
        return (text.to_string(), 0);
    }

    let mut out = text.to_string();
    for pos in positions.iter().rev() {
        out.replace_range(*pos..*pos + from.len(), &to);
    }
    (out, positions.len())
}

/// Rewrite display-name doc-tags (`@package`, `@subpackage`) plus
/// boundary-checked literal occurrences of the old name.
pub(crate) fn rewrite_plugin_name(content: &str, old: &str, new: &str) -> String {
    let (content, _) = replace_bounded(
        content,
        &format!("@package {}", old),
        &format!("@package {}", new),
    );
    let (content, _) = replace_bounded(
        &content,
        &format!("@subpackage {}", old),
        &format!("@subpackage {}", new),
    );
    let (content, _) = replace_bounded(&content, old, new);
    content
}

/// Second pass for references the name pass does not own: `@since` and
/// `@version` annotation lines, and any remaining bare mentions.
pub(crate) fn rewrite_general_references(content: &str, old: &str, new: &str) -> String {
    let mut out = String::with_capacity(content.len());

    for line in content.split_inclusive('\n') {
        if line.contains("@since") || line.contains("@version") || line.contains(old) {
            let (rewritten, _) = replace_bounded(line, old, new);
            out.push_str(&rewritten);
        } else {
            out.push_str(line);
        }
    }

    out
}
