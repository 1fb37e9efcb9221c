//! Slug and identifier transforms matching WordPress sanitization semantics.

/// Produce a filesystem- and gettext-domain-safe slug.
///
/// Latin-1 accented letters are transliterated to ASCII, everything is
/// lowercased, runs of non-alphanumerics collapse to a single `-`, and
/// leading/trailing dashes are trimmed. Idempotent.
pub(crate) fn slugify(text: &str) -> String {
    fn push(c: char, out: &mut String, pending: &mut bool) {
        if *pending && !out.is_empty() {
            out.push('-');
        }
        *pending = false;
        out.push(c);
    }

    let mut out = String::new();
    let mut pending_dash = false;

    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            push(ch.to_ascii_lowercase(), &mut out, &mut pending_dash);
        } else if ch == '_' {
            // Underscore survives the `[-\w]` filter but reads as a separator.
            pending_dash = true;
        } else if ch.is_alphabetic() {
            match transliterate(ch) {
                Some(ascii) => {
                    for c in ascii.chars() {
                        push(c, &mut out, &mut pending_dash);
                    }
                }
                None => pending_dash = true,
            }
        } else {
            pending_dash = true;
        }
    }

    out
}

/// Fold a Latin-1 accented letter to its ASCII equivalent.
fn transliterate(ch: char) -> Option<&'static str> {
    let lowered = ch.to_lowercase().next().unwrap_or(ch);
    let folded = match lowered {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => "a",
        'æ' => "ae",
        'ç' => "c",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'ð' => "d",
        'ñ' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => "o",
        'ù' | 'ú' | 'û' | 'ü' => "u",
        'ý' | 'ÿ' => "y",
        'þ' => "th",
        'ß' => "ss",
        'œ' => "oe",
        _ => return None,
    };
    Some(folded)
}

/// PascalCase transform used to recommend a namespace from a display name.
///
/// Words are split on non-alphanumerics; a word that already contains an
/// uppercase letter is kept verbatim (so "WPMoo SEO Kit" keeps "SEO").
pub(crate) fn pascal_case(text: &str) -> String {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            if word.chars().any(|c| c.is_uppercase()) {
                word.to_string()
            } else {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                }
            }
        })
        .collect()
}
