//! Display formatting for computed values.
//!
//! Every function is total: invalid input renders a documented default
//! instead of failing.

use crate::types::{Ratio, NOT_AVAILABLE};
use serde_json::Value;

const QUANTITY_ROUNDING_LIMIT: f64 = 1e15;

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Insert `,` between groups of three integer digits.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Render `value.abs()` with a fixed number of decimals and digit grouping.
///
/// Returns the sign separately; a value that rounds to zero is unsigned.
fn fixed_parts(value: f64, decimals: usize, grouped: bool) -> (bool, String) {
    let rendered = format!("{:.*}", decimals, value.abs());
    let negative = value < 0.0 && rendered.chars().any(|c| c.is_ascii_digit() && c != '0');

    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (rendered.as_str(), None),
    };
    let int_part = if grouped {
        group_thousands(int_part)
    } else {
        int_part.to_string()
    };

    let body = match frac_part {
        Some(frac) => format!("{}.{}", int_part, frac),
        None => int_part,
    };
    (negative, body)
}

/// Format a currency amount: `$1,234.56`, `-$1,234.56`.
///
/// Non-finite input renders as `$0.00`.
pub fn format_currency(value: f64) -> String {
    let (negative, body) = fixed_parts(finite_or_zero(value), 2, true);
    if negative {
        format!("-${}", body)
    } else {
        format!("${}", body)
    }
}

/// Format a value already expressed in percent: `12.34%`.
///
/// Non-finite input renders as `0.00%`.
pub fn format_percent(value: f64) -> String {
    let (negative, body) = fixed_parts(finite_or_zero(value), 2, false);
    format!("{}{}%", if negative { "-" } else { "" }, body)
}

/// Format a quantity with between 2 and 4 fraction digits.
///
/// Values are rounded half-up at the fourth digit, then trailing zeros are
/// trimmed down to two decimals. Magnitudes of 1e15 and above are rendered
/// as-is.
///
/// ```rust
/// use folio_core::format::format_quantity;
///
/// assert_eq!(format_quantity(10.0), "10.00");
/// assert_eq!(format_quantity(0.123456), "0.1235");
/// assert_eq!(format_quantity(1234.5), "1,234.50");
/// ```
pub fn format_quantity(value: f64) -> String {
    let value = finite_or_zero(value);
    // Beyond f64 precision at the fourth decimal; scaling could also overflow.
    let rounded = if value.abs() < QUANTITY_ROUNDING_LIMIT {
        (value * 10_000.0).round() / 10_000.0
    } else {
        value
    };
    let (negative, body) = fixed_parts(rounded, 4, true);

    let mut body = body;
    while body.ends_with('0') && body.split_once('.').map_or(0, |(_, f)| f.len()) > 2 {
        body.pop();
    }

    format!("{}{}", if negative { "-" } else { "" }, body)
}

/// Format a number with two decimals, or `"N/A"` when missing or non-finite.
pub fn format_number(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => {
            let (negative, body) = fixed_parts(v, 2, false);
            format!("{}{}", if negative { "-" } else { "" }, body)
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Format a raw JSON value as a number.
///
/// Only JSON numbers are accepted; strings (even numeric ones) and other
/// values render as `"N/A"`.
pub fn format_value(value: &Value) -> String {
    format_number(value.as_f64())
}

/// Format a weighted ratio such as beta or Sharpe.
pub fn format_ratio(ratio: Ratio) -> String {
    format_number(ratio.value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(-98765.432), "-$98,765.43");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
    }

    #[test]
    fn test_format_currency_invalid() {
        assert_eq!(format_currency(f64::NAN), "$0.00");
        assert_eq!(format_currency(f64::INFINITY), "$0.00");
    }

    #[test]
    fn test_format_currency_negative_zero() {
        assert_eq!(format_currency(-0.001), "$0.00");
        assert_eq!(format_currency(-0.0), "$0.00");
    }

    #[test]
    fn test_format_currency_always_two_decimals() {
        for v in [0.0, 1.0, -1.5, 12.345, 1e9, -0.07, 123456.789] {
            let s = format_currency(v);
            assert_eq!(s.matches('.').count(), 1, "{}", s);
            let (_, frac) = s.split_once('.').unwrap();
            assert_eq!(frac.len(), 2, "{}", s);
            assert!(frac.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(20.0), "20.00%");
        assert_eq!(format_percent(-3.14159), "-3.14%");
        assert_eq!(format_percent(f64::NAN), "0.00%");
        assert_eq!(format_percent(12345.0), "12345.00%");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(10.0), "10.00");
        assert_eq!(format_quantity(1.5), "1.50");
        assert_eq!(format_quantity(0.125), "0.125");
        assert_eq!(format_quantity(0.123456), "0.1235");
        assert_eq!(format_quantity(2.00004), "2.00");
        assert_eq!(format_quantity(-0.5), "-0.50");
        assert_eq!(format_quantity(f64::NAN), "0.00");
    }

    #[test]
    fn test_format_quantity_large_values() {
        let huge = format_quantity(1e305);
        assert!(huge.starts_with("100,000,000"), "{}", huge);
        assert!(huge.ends_with(".00"), "{}", huge);

        assert_eq!(format_quantity(1e15), "1,000,000,000,000,000.00");
        assert_eq!(format_quantity(-2.5e16), "-25,000,000,000,000,000.00");
        assert!(format_quantity(f64::MAX).ends_with(".00"));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(Some(1.234)), "1.23");
        assert_eq!(format_number(Some(-0.5)), "-0.50");
        assert_eq!(format_number(Some(f64::NAN)), "N/A");
        assert_eq!(format_number(None), "N/A");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!(2.5)), "2.50");
        assert_eq!(format_value(&json!("2.5")), "N/A");
        assert_eq!(format_value(&Value::Null), "N/A");
    }

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(Ratio::Value(1.2345)), "1.23");
        assert_eq!(format_ratio(Ratio::NotAvailable), "N/A");
    }
}
