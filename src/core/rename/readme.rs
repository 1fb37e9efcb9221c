//! readme.txt rewriting: banner lines plus leftover name/domain mentions.

use super::content::{replace_bounded, replace_literal};
use crate::identity::ProjectIdentity;
use regex::Regex;

/// Rewrite the `=== Name ===` / `== Name ==` banner lines, then sweep the
/// rest of the file for boundary-checked old-name and literal old-domain
/// occurrences. The `Stable tag:` value is a version and stays untouched.
pub(crate) fn rewrite_readme(content: &str, old: &ProjectIdentity, new: &ProjectIdentity) -> String {
    let mut out = rewrite_banner(content, &old.name, &new.name);

    if !old.name.is_empty() {
        let (replaced, _) = replace_bounded(&out, &old.name, &new.name);
        out = replaced;
    }
    if !old.text_domain.is_empty() && old.text_domain != new.text_domain {
        let (replaced, _) = replace_literal(&out, &old.text_domain, &new.text_domain);
        out = replaced;
    }

    out
}

fn rewrite_banner(content: &str, old_name: &str, new_name: &str) -> String {
    if old_name.is_empty() {
        return content.to_string();
    }

    let Ok(re) = Regex::new(&format!(
        r"(?m)^(=+[ \t]*){}([ \t]*=+[ \t]*)$",
        regex::escape(old_name)
    )) else {
        return content.to_string();
    };

    re.replace_all(content, |caps: &regex::Captures| {
        format!("{}{}{}", &caps[1], new_name, &caps[2])
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identities() -> (ProjectIdentity, ProjectIdentity) {
        (
            ProjectIdentity::new("Old Plugin", "OldNs", "old-plugin"),
            ProjectIdentity::new("New Plugin", "NewNs", "new-plugin"),
        )
    }

    #[test]
    fn banner_lines_are_rewritten() {
        let (old, new) = identities();
        let content = "=== Old Plugin ===\nContributors: someone\n\n== Old Plugin ==\n";
        let out = rewrite_readme(content, &old, &new);
        assert!(out.contains("=== New Plugin ==="));
        assert!(out.contains("== New Plugin =="));
    }

    #[test]
    fn stable_tag_version_is_untouched() {
        let (old, new) = identities();
        let content = "=== Old Plugin ===\nStable tag: 1.2.0\n";
        let out = rewrite_readme(content, &old, &new);
        assert!(out.contains("Stable tag: 1.2.0"));
    }

    #[test]
    fn body_mentions_and_domain_slugs_are_swept() {
        let (old, new) = identities();
        let content = "Old Plugin adds things.\nDownload from example.com/old-plugin/\n";
        let out = rewrite_readme(content, &old, &new);
        assert!(out.contains("New Plugin adds things."));
        assert!(out.contains("example.com/new-plugin/"));
    }

    #[test]
    fn unrelated_banner_is_kept() {
        let (old, new) = identities();
        let content = "== Installation ==\nSteps.\n";
        let out = rewrite_readme(content, &old, &new);
        assert_eq!(out, content);
    }
}
