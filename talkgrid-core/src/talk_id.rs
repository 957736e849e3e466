//! Stable talk identifiers and text normalization.

use unicode_normalization::UnicodeNormalization;

/// Identifier of a talk within the grid: `{slot}-{normalized title}` with
/// each run of whitespace turned into a single `-`.
///
/// Punctuation is kept, so titles differing only in symbols ("C++", "C#")
/// get different ids. Ids match those in links shared by the web app.
pub fn talk_id(slot: &str, title: &str) -> String {
    let mut id = String::with_capacity(slot.len() + title.len() + 1);
    id.push_str(slot);
    id.push('-');

    let mut in_space = false;
    for c in normalize(title).chars() {
        if c.is_whitespace() {
            if !in_space {
                id.push('-');
            }
            in_space = true;
        } else {
            id.push(c);
            in_space = false;
        }
    }

    id
}

/// Lowercase, decompose and drop combining accents (U+0300..U+036F).
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect()
}

/// Normalized substring match used by palette search.
pub fn matches_search(haystack: &str, needle: &str) -> bool {
    let needle = normalize(needle.trim());
    needle.is_empty() || normalize(haystack).contains(&needle)
}
