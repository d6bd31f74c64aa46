//! Prices are stored as integer cents. These helpers convert between the
//! cents representation and the `"7.50"` decimal strings used on the wire.

/// Parses a decimal money string into cents.
///
/// Accepts at most two fractional digits and rejects negative amounts, so
/// `"5"`, `"2.5"` and `"2.50"` all parse while `"1.234"` and `"-1"` do not.
pub fn parse_cents(input: &str) -> Option<i64> {
    let s = input.trim();

    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if frac.len() > 2 {
        return None;
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let frac_cents: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().ok()? * 10,
        _ => frac.parse().ok()?,
    };

    whole.checked_mul(100)?.checked_add(frac_cents)
}

/// Formats cents as a decimal string with two fractional digits.
pub fn format_cents(cents: i64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::{format_cents, parse_cents};

    #[test]
    fn test_whole_amounts() {
        assert_eq!(parse_cents("5"), Some(500));
        assert_eq!(parse_cents("0"), Some(0));
        assert_eq!(parse_cents("  12 "), Some(1200));
    }

    #[test]
    fn test_fractional_amounts() {
        assert_eq!(parse_cents("2.50"), Some(250));
        assert_eq!(parse_cents("2.5"), Some(250));
        assert_eq!(parse_cents("2.05"), Some(205));
        assert_eq!(parse_cents(".5"), Some(50));
    }

    #[test]
    fn test_rejects_invalid() {
        assert_eq!(parse_cents(""), None);
        assert_eq!(parse_cents("."), None);
        assert_eq!(parse_cents("abc"), None);
        assert_eq!(parse_cents("-1"), None);
        assert_eq!(parse_cents("1.234"), None);
        assert_eq!(parse_cents("1.2.3"), None);
    }

    #[test]
    fn test_format() {
        assert_eq!(format_cents(750), "7.50");
        assert_eq!(format_cents(500), "5.00");
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(0), "0.00");
    }

    #[test]
    fn test_round_trip() {
        assert_eq!(parse_cents(&format_cents(1234)), Some(1234));
    }
}
