//! Price cell normalization

use tracing::warn;

/// Strip every character that is not an ASCII digit.
///
/// The result is deliberately a string. A cell with no digits yields an
/// empty string and a warning, never an error.
pub fn normalize_price(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.is_empty() {
        warn!(raw = %raw, "Price cell contains no digits");
    }

    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rupiah_formatting_is_stripped() {
        assert_eq!(normalize_price("Rp 1.234.567,00"), "123456700");
        assert_eq!(normalize_price("Rp1.000.000"), "1000000");
    }

    #[test]
    fn test_no_digits_yields_empty() {
        assert_eq!(normalize_price("abc"), "");
        assert_eq!(normalize_price(""), "");
    }

    #[test]
    fn test_non_ascii_digits_are_dropped() {
        // Arabic-Indic digits are not decimal digits in the ASCII sense
        assert_eq!(normalize_price("١٢٣ 45"), "45");
    }

    #[test]
    fn test_leading_zeros_kept() {
        assert_eq!(normalize_price(" 007 "), "007");
    }
}
