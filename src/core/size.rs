//! Human readable byte sizes

use crate::core::constants::SIZE_UNITS;

/// Format a byte count with 1024-based units
///
/// The value is rounded to two decimals and always printed with at least
/// one decimal digit, e.g. `1.0 kB`, `1.5 kB` or `976.56 kB`.
pub fn convert_size(size_bytes: u64) -> String {
    if size_bytes == 0 {
        return format!("0 {}", SIZE_UNITS[0]);
    }

    let mut index = 0;
    let mut power: u128 = 1;
    while index + 1 < SIZE_UNITS.len() && u128::from(size_bytes) >= power * 1024 {
        power *= 1024;
        index += 1;
    }

    let scaled = (size_bytes as f64 / power as f64 * 100.0).round() / 100.0;
    if scaled.fract() == 0.0 {
        format!("{:.1} {}", scaled, SIZE_UNITS[index])
    } else {
        format!("{} {}", scaled, SIZE_UNITS[index])
    }
}
