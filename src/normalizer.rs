/*!
 * Business name normalization for search query fragments.
 *
 * Only used to build fallback search links. Similarity scoring works on the
 * original strings and must not go through this module.
 */

use once_cell::sync::Lazy;
use regex::Regex;

// Anything that is not an ASCII letter, digit, or whitespace
static NON_SEARCHABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9\s]").unwrap());

/// Strip every character that is not an ASCII letter, digit, or whitespace.
///
/// Removed characters are dropped, not replaced, so spacing is preserved
/// exactly as it was in the input.
pub fn search_safe_name(name: &str) -> String {
    NON_SEARCHABLE.replace_all(name, "").into_owned()
}

/// Normalized name with spaces joined by `+`, ready for a `find_desc` query value
pub fn search_query(name: &str) -> String {
    search_safe_name(name).replace(' ', "+")
}
