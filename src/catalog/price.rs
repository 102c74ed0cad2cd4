use regex::Regex;
use std::sync::LazyLock;

static NON_NUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^0-9.]").expect("static regex")
});

/// Parse a price cell such as `3000`, `3,000원`, `₩ 12,500` or `4500.0`.
///
/// Everything except ASCII digits and `.` is discarded and the remainder is
/// read as a decimal and truncated. Cells with nothing usable yield 0.
pub fn parse_price(cell: &str) -> u64 {
    let cleaned = NON_NUMERIC.replace_all(cell, "");
    if cleaned.is_empty() {
        return 0;
    }
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value.trunc() as u64,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_integer() {
        assert_eq!(parse_price("3000"), 3000);
    }

    #[test]
    fn test_currency_decoration() {
        assert_eq!(parse_price("3,000원"), 3000);
        assert_eq!(parse_price("₩12,500"), 12500);
        assert_eq!(parse_price(" 1 200 KRW "), 1200);
    }

    #[test]
    fn test_float_is_truncated() {
        assert_eq!(parse_price("4500.0"), 4500);
        assert_eq!(parse_price("99.99"), 99);
    }

    #[test]
    fn test_unparsable_defaults_to_zero() {
        assert_eq!(parse_price(""), 0);
        assert_eq!(parse_price("free"), 0);
        assert_eq!(parse_price("N/A"), 0);
        assert_eq!(parse_price("1.2.3"), 0);
        assert_eq!(parse_price("."), 0);
    }

    #[test]
    fn test_minus_sign_is_decoration() {
        assert_eq!(parse_price("-500"), 500);
    }
}
