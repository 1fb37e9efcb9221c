//! Translation template (`.pot`) generation.
//!
//! Walks the project's PHP sources, pulls msgids out of gettext-family
//! calls with the same argument scanner the rename engine uses, and emits
//! `languages/<text_domain>.pot`.

use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;
use crate::log_status;
use crate::rename::textdomain::{scan_calls, CallSite};
use crate::utils::io;
use crate::walker::{self, WalkFilter};

#[derive(Debug, Clone, Serialize)]
pub struct PotEntry {
    pub msgid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msgid_plural: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub references: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PotOutput {
    pub path: String,
    pub entries: usize,
}

/// Extracted strings for one call, before domain filtering.
struct Extraction {
    msgid: String,
    msgid_plural: Option<String>,
    context: Option<String>,
    domain: String,
}

/// Decode the PHP string escapes that matter for message text.
fn unescape_php(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('\\') => out.push('\\'),
                Some('\'') => out.push('\''),
                Some('"') => out.push('"'),
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Interpret a scanned call's arguments per the call shape.
/// Returns None for calls that carry no extractable message.
fn extract(call: &CallSite) -> Option<Extraction> {
    let arg = |i: usize| call.args.get(i).map(|a| unescape_php(&a.value));

    match call.name.as_str() {
        "__" | "_e" if call.args.len() >= 2 => Some(Extraction {
            msgid: arg(0)?,
            msgid_plural: None,
            context: None,
            domain: arg(call.args.len() - 1)?,
        }),
        "_x" | "_ex" if call.args.len() >= 3 => Some(Extraction {
            msgid: arg(0)?,
            msgid_plural: None,
            context: arg(1),
            domain: arg(call.args.len() - 1)?,
        }),
        "_n" | "_n_noop" if call.args.len() >= 3 => Some(Extraction {
            msgid: arg(0)?,
            msgid_plural: arg(1),
            context: None,
            domain: arg(call.args.len() - 1)?,
        }),
        "_nx" | "_nx_noop" if call.args.len() >= 4 => Some(Extraction {
            msgid: arg(0)?,
            msgid_plural: arg(1),
            context: arg(2),
            domain: arg(call.args.len() - 1)?,
        }),
        _ => None,
    }
}

/// Collect every translatable entry under `dir` for `text_domain`.
pub fn collect_entries(dir: &Path, text_domain: &str) -> Result<Vec<PotEntry>> {
    // Keyed by (context, msgid) so duplicates merge their references.
    let mut entries: BTreeMap<(String, String), PotEntry> = BTreeMap::new();

    for path in walker::walk(dir, &WalkFilter::new(&["php"])) {
        let content = io::read_file(&path, "read source")?;
        let relative = path
            .strip_prefix(dir)
            .unwrap_or(&path)
            .to_string_lossy()
            .to_string();

        for call in scan_calls(&content) {
            let Some(extraction) = extract(&call) else {
                continue;
            };
            if extraction.domain != text_domain {
                continue;
            }

            let line = 1 + content[..call.offset].matches('\n').count();
            let reference = format!("{}:{}", relative, line);

            let key = (
                extraction.context.clone().unwrap_or_default(),
                extraction.msgid.clone(),
            );
            let entry = entries.entry(key).or_insert_with(|| PotEntry {
                msgid: extraction.msgid,
                msgid_plural: None,
                context: extraction.context,
                references: Vec::new(),
            });
            if entry.msgid_plural.is_none() {
                entry.msgid_plural = extraction.msgid_plural;
            }
            if !entry.references.contains(&reference) {
                entry.references.push(reference);
            }
        }
    }

    Ok(entries.into_values().collect())
}

/// Escape a string for a POT literal.
fn pot_escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\t', "\\t")
}

fn render(entries: &[PotEntry], text_domain: &str) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        concat!(
            "# Translation template for the {domain} plugin.\n",
            "msgid \"\"\n",
            "msgstr \"\"\n",
            "\"Project-Id-Version: {domain}\\n\"\n",
            "\"MIME-Version: 1.0\\n\"\n",
            "\"Content-Type: text/plain; charset=UTF-8\\n\"\n",
            "\"Content-Transfer-Encoding: 8bit\\n\"\n",
            "\"POT-Creation-Date: {date}\\n\"\n",
            "\"X-Domain: {domain}\\n\"\n",
        ),
        domain = text_domain,
        date = Utc::now().format("%Y-%m-%d %H:%M%z"),
    ));

    for entry in entries {
        out.push('\n');
        for reference in &entry.references {
            out.push_str(&format!("#: {}\n", reference));
        }
        if let Some(context) = &entry.context {
            out.push_str(&format!("msgctxt \"{}\"\n", pot_escape(context)));
        }
        out.push_str(&format!("msgid \"{}\"\n", pot_escape(&entry.msgid)));
        match &entry.msgid_plural {
            Some(plural) => {
                out.push_str(&format!("msgid_plural \"{}\"\n", pot_escape(plural)));
                out.push_str("msgstr[0] \"\"\n");
                out.push_str("msgstr[1] \"\"\n");
            }
            None => out.push_str("msgstr \"\"\n"),
        }
    }

    out
}

/// Generate `languages/<text_domain>.pot` under `dir`.
pub fn generate(dir: &Path, text_domain: &str) -> Result<PotOutput> {
    let entries = collect_entries(dir, text_domain)?;

    let languages = dir.join("languages");
    if !languages.is_dir() {
        std::fs::create_dir_all(&languages).map_err(|e| {
            crate::error::Error::internal_io(e.to_string(), Some("create languages dir".to_string()))
        })?;
    }

    let path = languages.join(format!("{}.pot", text_domain));
    io::write_file(&path, &render(&entries, text_domain), "write pot")?;
    log_status!("pot", "Wrote {} entries to {}", entries.len(), path.display());

    Ok(PotOutput {
        path: path.to_string_lossy().to_string(),
        entries: entries.len(),
    })
}
