//! Free-text search over searchable fields.

use crate::value::Value;

/// Lowercased needle for a raw search term, or `None` when the term is blank.
///
/// Surrounding whitespace only decides blankness; a non-blank term is matched
/// as typed.
pub fn needle(term: &str) -> Option<String> {
    if term.trim().is_empty() {
        None
    } else {
        Some(term.to_lowercase())
    }
}

/// Returns `true` if the lowercased string form of `value` contains `needle`.
///
/// `needle` must already be lowercased (see [`needle`]). Tag lists match when
/// any element does; numbers match on their decimal rendering. Booleans,
/// timestamps, ranges and absent values are never searched.
pub fn value_contains(value: &Value<'_>, needle: &str) -> bool {
    match value {
        Value::Text(s) => s.to_lowercase().contains(needle),
        Value::Tags(tags) => tags.iter().any(|t| t.to_lowercase().contains(needle)),
        Value::Number(n) => n.to_string().contains(needle),
        _ => false,
    }
}
