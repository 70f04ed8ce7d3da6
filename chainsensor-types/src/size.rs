//! Parsing of human-readable dataset size strings.
//!
//! Datasets declare their size as a display string ("2.4 MB", "500 KB").
//! Aggregate storage-used is always recomputed from these declarations,
//! never stored, so drift between the metric and the collection is
//! impossible.

/// Parses a human-readable size string into gigabytes.
///
/// Accepts a decimal number followed by an optional unit suffix
/// (`B`, `KB`, `MB`, `GB`, `TB`, case-insensitive, whitespace between
/// number and unit allowed). A bare number is treated as megabytes,
/// matching how upload forms declare sizes. Returns `None` when no
/// number can be extracted.
#[must_use]
pub fn parse_size_gb(size: &str) -> Option<f64> {
    let trimmed = size.trim();
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(trimmed.len());
    let (number, unit) = trimmed.split_at(digits_end);
    let value: f64 = number.parse().ok()?;

    let factor = match unit.trim().to_ascii_uppercase().as_str() {
        "B" => 1e-9,
        "KB" => 1e-6,
        "" | "MB" => 1e-3,
        "GB" => 1.0,
        "TB" => 1e3,
        _ => return None,
    };
    Some(value * factor)
}
