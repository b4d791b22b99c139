use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Canonical form of a player name, used as the join key across datasets.
/// Lowercases, strips diacritics (NFD + drop combining marks), and removes
/// periods and all whitespace, so "José Pérez" and "jose perez" compare equal.
pub fn canonical_name(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|&c| !is_combining_mark(c))
        .filter(|&c| c != '.' && !c.is_whitespace())
        .collect()
}
