//! SCSS/CSS class-prefix rewriting.
//!
//! The text domain doubles as the CSS class-prefix root, so stylesheets
//! carry selectors like `.old-plugin-button` and a `$prefix` variable.
//! Both follow the domain when it changes.

use serde::Serialize;
use std::path::Path;

use crate::error::Result;
use crate::walker::{self, WalkFilter};
use regex::Regex;

#[derive(Debug, Serialize)]
pub struct PrefixRewrite {
    pub old_prefix: String,
    pub new_prefix: String,
    pub changed_files: Vec<String>,
}

/// Rewrite `.old` class selectors and the `$prefix` variable declaration.
///
/// A selector occurrence only matches when the prefix is followed by a
/// non-identifier character (`-` continues the class name and is allowed),
/// so `.old-pluginish` survives a rewrite of `old-plugin`.
pub(crate) fn rewrite_prefix(content: &str, old: &str, new: &str) -> (String, usize) {
    let mut count = 0usize;

    let Ok(selector_re) = Regex::new(&format!(
        r"\.{}(?P<after>[^A-Za-z0-9_]|$)",
        regex::escape(old)
    )) else {
        return (content.to_string(), 0);
    };

    let rewritten = selector_re
        .replace_all(content, |caps: &regex::Captures| {
            count += 1;
            format!(".{}{}", new, caps.name("after").map(|m| m.as_str()).unwrap_or(""))
        })
        .to_string();

    let Ok(variable_re) = Regex::new(&format!(
        r#"(?m)^(?P<lead>[ \t]*\$prefix[ \t]*:[ \t]*['"]){}(?P<trail>['"])"#,
        regex::escape(old)
    )) else {
        return (rewritten, count);
    };

    let rewritten = variable_re
        .replace_all(&rewritten, |caps: &regex::Captures| {
            count += 1;
            format!("{}{}{}", &caps["lead"], new, &caps["trail"])
        })
        .to_string();

    (rewritten, count)
}

/// Rewrite the prefix across every stylesheet under `dir`.
pub fn run(dir: &Path, old: &str, new: &str) -> Result<PrefixRewrite> {
    let mut changed = Vec::new();
    walker::rewrite_files(
        dir,
        &WalkFilter::new(&["scss", "css"]),
        &mut changed,
        move |c| rewrite_prefix(c, old, new).0,
    )?;

    Ok(PrefixRewrite {
        old_prefix: old.to_string(),
        new_prefix: new.to_string(),
        changed_files: changed,
    })
}
