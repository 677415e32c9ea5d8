//! Mobile-number search helpers.

/// Characters stripped from stored mobile numbers before substring matching.
///
/// Must stay in sync with the `translate(...)` call in the reservation
/// repository's search query.
pub const PHONE_FORMATTING_CHARS: &str = "() -+.";

/// Reduce a user-entered phone fragment to its digits.
///
/// Returns `None` when no digits remain; such a query would match every row.
pub fn normalize_phone_query(query: &str) -> Option<String> {
    let digits: String = query.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}
