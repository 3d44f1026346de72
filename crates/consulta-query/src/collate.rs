//! Locale-aware text ordering.
//!
//! Approximates a Spanish-friendly collation without ICU data: strings are
//! compared first on a diacritic-folded, lowercased key (so "Álvarez" sorts
//! next to "alvarez" rather than after "zeta"), and only then on their exact
//! text so the order stays total.

use std::cmp::Ordering;

use deunicode::deunicode;

/// Primary collation key: transliterated to ASCII and lowercased.
pub fn collation_key(s: &str) -> String {
    deunicode(s).to_lowercase()
}

/// Compares two strings with diacritic- and case-insensitive primary ordering.
pub fn collate(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}
