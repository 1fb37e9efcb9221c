//! Translation-call scanning and text-domain rewriting.
//!
//! The scanner finds gettext-family calls and walks their argument lists
//! with a quote- and paren-aware cursor, so only the quoted text-domain
//! literal is ever touched. Translatable message text passes through
//! untouched even when it happens to equal the domain.

use regex::Regex;

/// Call names whose domain argument is the last top-level string literal.
/// `wpmoo(...)` is the framework bootstrap call.
const TRAILING_DOMAIN_CALLS: &[&str] = &[
    "__", "_e", "_n", "_x", "_ex", "_nx", "_n_noop", "_nx_noop", "wpmoo",
];

/// `load_plugin_textdomain` carries the domain as its first argument.
const LEADING_DOMAIN_CALLS: &[&str] = &["load_plugin_textdomain"];

/// A quoted string argument at the call's top nesting level.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StringArg {
    /// Literal content between the quotes (escapes not decoded).
    pub value: String,
    /// Byte offset of the first content byte.
    pub start: usize,
    /// Byte offset one past the last content byte.
    pub end: usize,
}

/// A recognized translation/bootstrap call site.
#[derive(Debug, Clone)]
pub(crate) struct CallSite {
    pub name: String,
    /// Byte offset of the call name.
    pub offset: usize,
    /// Top-level string arguments, in order.
    pub args: Vec<StringArg>,
}

fn call_pattern() -> Option<Regex> {
    // Longest alternatives first so `_nx_noop` wins over `_n`.
    Regex::new(r"\b(load_plugin_textdomain|_nx_noop|_n_noop|_nx|_ex|_n|_x|_e|__|wpmoo)\s*\(").ok()
}

/// Scan content for recognized calls and their top-level string arguments.
///
/// Calls that never close their parenthesis (malformed or truncated
/// source) are skipped rather than guessed at.
pub(crate) fn scan_calls(content: &str) -> Vec<CallSite> {
    let Some(re) = call_pattern() else {
        return Vec::new();
    };
    let mut calls = Vec::new();

    for caps in re.captures_iter(content) {
        let (Some(whole), Some(name_match)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let open = whole.end() - 1;

        if let Some(args) = scan_arguments(content, open) {
            calls.push(CallSite {
                name: name_match.as_str().to_string(),
                offset: name_match.start(),
                args,
            });
        }
    }

    calls
}

/// Walk from the opening parenthesis to its matching close, collecting
/// top-level single- or double-quoted string spans. Returns None when the
/// call never closes.
fn scan_arguments(content: &str, open: usize) -> Option<Vec<StringArg>> {
    let bytes = content.as_bytes();
    let mut args = Vec::new();
    let mut depth = 1usize;
    let mut i = open + 1;

    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' => {
                let quote = bytes[i];
                let start = i + 1;
                let mut j = start;
                while j < bytes.len() && bytes[j] != quote {
                    if bytes[j] == b'\\' {
                        j += 1;
                    }
                    j += 1;
                }
                if j >= bytes.len() {
                    return None;
                }
                if depth == 1 {
                    args.push(StringArg {
                        value: content[start..j].to_string(),
                        start,
                        end: j,
                    });
                }
                i = j + 1;
                continue;
            }
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(args);
                }
            }
            _ => {}
        }
        i += 1;
    }

    None
}

/// Pick the domain argument for a call, per its shape.
fn domain_arg(call: &CallSite) -> Option<&StringArg> {
    if LEADING_DOMAIN_CALLS.contains(&call.name.as_str()) {
        return call.args.first();
    }
    if !TRAILING_DOMAIN_CALLS.contains(&call.name.as_str()) {
        return None;
    }
    // A gettext call with a single string argument carries a message on
    // the default domain, not a domain of its own. The bootstrap call's
    // single argument IS the domain.
    if call.name != "wpmoo" && call.args.len() < 2 {
        return None;
    }
    call.args.last()
}

/// Replace the text-domain literal in every recognized call.
/// Returns the rewritten content and the replacement count.
pub(crate) fn rewrite_text_domains(content: &str, old: &str, new: &str) -> (String, usize) {
    let calls = scan_calls(content);

    let mut spans: Vec<(usize, usize)> = calls
        .iter()
        .filter_map(domain_arg)
        .filter(|arg| arg.value == old)
        .map(|arg| (arg.start, arg.end))
        .collect();

    if spans.is_empty() {
        return (content.to_string(), 0);
    }

    spans.sort();
    spans.dedup();

    let mut out = content.to_string();
    for (start, end) in spans.iter().rev() {
        out.replace_range(*start..*end, new);
    }
    let count = spans.len();
    (out, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_simple_gettext_call() {
        let calls = scan_calls("<?php echo __('Hello', 'old-plugin');");
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "__");
        assert_eq!(calls[0].args.len(), 2);
        assert_eq!(calls[0].args[0].value, "Hello");
        assert_eq!(calls[0].args[1].value, "old-plugin");
    }

    #[test]
    fn nested_calls_keep_arguments_at_their_level() {
        let calls = scan_calls("printf( __( 'Found %s', 'old-plugin' ), $count );");
        let gettext = calls.iter().find(|c| c.name == "__").unwrap();
        assert_eq!(gettext.args.len(), 2);
        assert_eq!(gettext.args[1].value, "old-plugin");
    }

    #[test]
    fn unterminated_call_is_skipped() {
        assert!(scan_calls("__('Hello', 'old-plugin'").is_empty());
    }

    #[test]
    fn rewrites_domain_in_all_call_shapes() {
        let content = concat!(
            "<?php\n",
            "__( 'Text', 'old-plugin' );\n",
            "_e( 'Echo', 'old-plugin' );\n",
            "_x( 'Ctx', 'noun', 'old-plugin' );\n",
            "_n( 'One', 'Many', $n, 'old-plugin' );\n",
            "_nx( 'One', 'Many', $n, 'ctx', 'old-plugin' );\n",
            "_n_noop( 'One', 'Many', 'old-plugin' );\n",
            "load_plugin_textdomain( 'old-plugin', false, $dir );\n",
            "wpmoo( 'old-plugin' );\n",
        );
        let (out, count) = rewrite_text_domains(content, "old-plugin", "new-plugin");
        assert_eq!(count, 8);
        assert!(!out.contains("'old-plugin'"));
        assert_eq!(out.matches("'new-plugin'").count(), 8);
    }

    #[test]
    fn message_text_equal_to_domain_is_preserved() {
        let content = "__( 'old-plugin', 'old-plugin' );";
        let (out, count) = rewrite_text_domains(content, "old-plugin", "new-plugin");
        assert_eq!(out, "__( 'old-plugin', 'new-plugin' );");
        assert_eq!(count, 1);
    }

    #[test]
    fn other_domains_are_left_alone() {
        let content = "__( 'Text', 'some-other-plugin' );";
        let (out, count) = rewrite_text_domains(content, "old-plugin", "new-plugin");
        assert_eq!(count, 0);
        assert_eq!(out, content);
    }

    #[test]
    fn escaped_quotes_inside_messages_do_not_confuse_the_scanner() {
        let content = "__( 'It\\'s fine', 'old-plugin' );";
        let (out, count) = rewrite_text_domains(content, "old-plugin", "new-plugin");
        assert_eq!(count, 1);
        assert!(out.contains("'It\\'s fine'"));
        assert!(out.contains("'new-plugin'"));
    }

    #[test]
    fn multiline_calls_are_handled() {
        let content = "_n(\n    'One item',\n    '%d items',\n    $count,\n    'old-plugin'\n);";
        let (out, count) = rewrite_text_domains(content, "old-plugin", "new-plugin");
        assert_eq!(count, 1);
        assert!(out.contains("'new-plugin'"));
        assert!(out.contains("'One item'"));
    }

    #[test]
    fn double_quoted_domains_work_too() {
        let content = "__( \"Text\", \"old-plugin\" );";
        let (out, count) = rewrite_text_domains(content, "old-plugin", "new-plugin");
        assert_eq!(count, 1);
        assert!(out.contains("\"new-plugin\""));
    }

    #[test]
    fn similarly_named_functions_are_not_recognized() {
        let calls = scan_calls("my__( 'x', 'old-plugin' ); do_e( 'y', 'old-plugin' );");
        assert!(calls.is_empty());
    }

    #[test]
    fn single_argument_gettext_is_a_message_not_a_domain() {
        let content = "__( 'old-plugin' );";
        let (out, count) = rewrite_text_domains(content, "old-plugin", "new-plugin");
        assert_eq!(count, 0);
        assert_eq!(out, content);
    }

    #[test]
    fn bootstrap_call_single_argument_is_the_domain() {
        let content = "wpmoo( 'old-plugin' );";
        let (out, count) = rewrite_text_domains(content, "old-plugin", "new-plugin");
        assert_eq!(count, 1);
        assert_eq!(out, "wpmoo( 'new-plugin' );");
    }
}
