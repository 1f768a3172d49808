//! Cell text cleanup utilities

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static ILO_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ILO\d+[:.]?\s*").unwrap());
static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());
static PURE_INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());

/// Trims a cell, mapping blank text to `None`.
pub fn non_blank(cell: &str) -> Option<&str> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Collapses every run of whitespace into a single space and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Removes a leading `ILO<digits>` label (with optional `:` or `.`) from an assessment tool cell.
pub fn strip_ilo_prefix(text: &str) -> String {
    ILO_PREFIX.replace(text.trim(), "").trim().to_string()
}

/// Whether the trimmed text consists only of ASCII digits.
pub fn is_integer(text: &str) -> bool {
    PURE_INTEGER.is_match(text.trim())
}

/// Every run of digits in the text, in order. Runs that overflow `u32` are skipped.
pub fn integers(text: &str) -> impl Iterator<Item = u32> + '_ {
    INTEGER
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<u32>().ok())
}

/// The first run of digits in the text.
pub fn first_integer(text: &str) -> Option<u32> {
    integers(text).next()
}
