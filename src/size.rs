//! Conversion of human-readable size strings to byte counts.

/// 1024-based unit ladder used by the tracker's size column.
const UNITS: [(&str, i64); 6] = [
    ("B", 1),
    ("KB", 1 << 10),
    ("MB", 1 << 20),
    ("GB", 1 << 30),
    ("TB", 1 << 40),
    ("PB", 1 << 50),
];

/// Converts strings like "1.2 GB" to a byte count.
///
/// Returns `None` when the text has no recognizable number/unit pair; the
/// caller substitutes its own unknown-size sentinel.
pub fn convert_size(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    let unit_start = trimmed.find(|c: char| c.is_ascii_alphabetic())?;
    let (number, unit) = trimmed.split_at(unit_start);

    let value: f64 = number.trim().replace(',', "").parse().ok()?;
    if value < 0.0 {
        return None;
    }

    let unit = unit.trim().to_ascii_uppercase();
    let multiplier = UNITS
        .iter()
        .find(|(name, _)| *name == unit)
        .map(|(_, multiplier)| *multiplier)?;

    Some((value * multiplier as f64) as i64)
}
