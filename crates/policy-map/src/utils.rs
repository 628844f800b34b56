//! Text helpers for scanner output.

/// Uppercases and strips Spanish diacritics so that `Básico` and `BASICO`
/// compare equal.
pub fn fold_upper(raw: &str) -> String {
    raw.chars().flat_map(fold_char).collect()
}

fn fold_char(ch: char) -> std::char::ToUppercase {
    let base = match ch {
        'á' | 'à' | 'â' | 'ä' | 'Á' | 'À' | 'Â' | 'Ä' => 'A',
        'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' | 'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'ö' | 'Ó' | 'Ò' | 'Ô' | 'Ö' => 'O',
        'ú' | 'ù' | 'û' | 'ü' | 'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ñ' | 'Ñ' => 'N',
        other => other,
    };
    base.to_uppercase()
}

/// Case- and accent-insensitive containment.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    let needle = fold_upper(needle);
    !needle.is_empty() && fold_upper(haystack).contains(&needle)
}

/// Cleans a raw scanner value.
///
/// The scanner often echoes the field label next to the value and mixes in
/// line breaks and trailing punctuation (`"Combustible:\nNAFTA."`). Each line
/// has leading and trailing `labels` removed; the lines with content left are
/// joined with single spaces. Returns an empty string when nothing but labels
/// and punctuation was present.
pub fn clean_value(raw: &str, labels: &[&str]) -> String {
    raw.lines()
        .map(|line| strip_labels(line, labels))
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_labels<'t>(line: &'t str, labels: &[&str]) -> &'t str {
    let mut rest = trim_noise(line);
    loop {
        let before = rest.len();
        for label in labels {
            if let Some(stripped) = strip_label_prefix(rest, label) {
                rest = trim_noise(stripped);
            }
            if let Some(stripped) = strip_label_suffix(rest, label) {
                rest = trim_noise(stripped);
            }
        }
        if rest.len() == before {
            return rest;
        }
    }
}

fn trim_noise(text: &str) -> &str {
    text.trim_matches(|ch: char| {
        ch.is_whitespace() || matches!(ch, ':' | ';' | ',' | '.' | '-' | '_' | '|' | '*' | '=')
    })
}

/// Strips `label` from the start of `text` when it is followed by a word
/// boundary.
fn strip_label_prefix<'t>(text: &'t str, label: &str) -> Option<&'t str> {
    let end = folded_prefix_len(text.char_indices(), label.chars())?;
    let rest = &text[end..];
    match rest.chars().next() {
        Some(next) if next.is_alphanumeric() => None,
        _ => Some(rest),
    }
}

/// Strips `label` from the end of `text` when it is preceded by a word
/// boundary.
fn strip_label_suffix<'t>(text: &'t str, label: &str) -> Option<&'t str> {
    let mut matched = 0;
    let mut start = text.len();
    let label_chars: Vec<char> = label.chars().collect();
    for (idx, ch) in text.char_indices().rev() {
        if matched == label_chars.len() {
            break;
        }
        let expected = label_chars[label_chars.len() - 1 - matched];
        if !chars_match(ch, expected) {
            return None;
        }
        matched += 1;
        start = idx;
    }
    if matched < label_chars.len() {
        return None;
    }
    let rest = &text[..start];
    match rest.chars().next_back() {
        Some(prev) if prev.is_alphanumeric() => None,
        _ => Some(rest),
    }
}

fn folded_prefix_len(
    mut text: impl Iterator<Item = (usize, char)>,
    label: impl Iterator<Item = char>,
) -> Option<usize> {
    let mut end = 0;
    for expected in label {
        let (idx, ch) = text.next()?;
        if !chars_match(ch, expected) {
            return None;
        }
        end = idx + ch.len_utf8();
    }
    Some(end)
}

fn chars_match(a: char, b: char) -> bool {
    fold_char(a).eq(fold_char(b))
}
