//! Leaf helpers for cleaning raw spreadsheet cells.
//!
//! The exports this crate consumes are irregular: numeric cells may carry
//! currency symbols, thousands separators, percent signs, or stray quotes,
//! and label cells may arrive quote-wrapped or HTML-escaped. Malformed
//! numeric cells degrade to zero rather than aborting the report.

/// Converts a raw spreadsheet cell into a number.
///
/// Strips `$`, `%`, `"`, thousands separators, and all whitespace before
/// attempting the conversion. Empty and unparseable input both yield `0.0`;
/// this function never fails.
pub fn parse_number(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | '%' | '"' | ',') && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return 0.0;
    }

    cleaned.parse::<f64>().unwrap_or(0.0)
}

/// Trims a row label, removing one wrapping quote pair if present.
pub fn clean_label(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    unquoted.trim().to_string()
}

/// Decodes the HTML entities that appear in entity-mode header cells.
pub fn decode_entities(raw: &str) -> String {
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
