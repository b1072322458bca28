//! Text normalization for BR Code free-text fields.
//!
//! Merchant name, city and description are decomposed (NFD), stripped of
//! combining diacritical marks and restricted to printable ASCII before they
//! are clamped to their field limits.

use unicode_normalization::UnicodeNormalization;

/// Maximum characters kept for field 59.
pub const MERCHANT_NAME_MAX: usize = 25;

/// Maximum characters kept for field 60.
pub const MERCHANT_CITY_MAX: usize = 15;

/// Maximum characters kept for sub-field 05 of field 62.
pub const REFERENCE_LABEL_MAX: usize = 25;

fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

/// Decomposes `input` and removes combining diacritical marks.
///
/// Characters without such a decomposition pass through unchanged.
///
/// ```
/// use pix_brcode::normalize::strip_diacritics;
///
/// assert_eq!(strip_diacritics("José"), "Jose");
/// assert_eq!(strip_diacritics("São Paulo"), "Sao Paulo");
/// ```
pub fn strip_diacritics(input: &str) -> String {
    input.nfd().filter(|c| !is_combining_diacritic(*c)).collect()
}

/// Keeps at most the first `max_chars` characters of `input`.
pub fn clamp_chars(input: &str, max_chars: usize) -> String {
    input.chars().take(max_chars).collect()
}

/// Produces EMV-safe text: diacritics stripped, anything that is not
/// printable ASCII dropped, then clamped to `max_chars`.
pub fn to_emv_text(input: &str, max_chars: usize) -> String {
    let ascii: String = strip_diacritics(input)
        .chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control())
        .collect();
    clamp_chars(&ascii, max_chars)
}
