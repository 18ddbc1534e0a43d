//! Text normalization for matching.

/// Normalize a string for matching: lowercase, keep only alphanumerics.
///
/// Every string the index compares runs through this first, both entity
/// names at build time and query prefixes at query time:
/// - "Frei, burG !?!" → "freiburg"
/// - "The Lord of the Rings" → "thelordoftherings"
///
/// Pure and idempotent: `normalize(normalize(x)) == normalize(x)`.
/// No locale folding beyond Unicode lowercasing; diacritics survive
/// ("café" → "café"), which keeps build and query sides consistent.
pub fn normalize(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}
