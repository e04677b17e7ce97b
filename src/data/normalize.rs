//! Numeric coercion and display formatting.
//!
//! Every value that reaches a card or a chart passes through [`to_number`]
//! first. Coercion is total: numbers pass through, numeric strings are parsed
//! and anything else becomes `0`.
//!
//! The formatters produce the fixed en-US style used across the dashboard
//! (`,` thousands separator, `.` decimal point, two decimals).

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// A raw value that can be coerced to a finite `f64`.
///
/// Implemented for JSON values, strings, floats and integers, references to
/// any of those, and `Option` (where `None` is a missing value).
pub trait Numeric {
    /// Coerce to a finite number, falling back to `0.0`.
    fn coerce(&self) -> f64;
}

impl Numeric for f64 {
    fn coerce(&self) -> f64 {
        finite_or_zero(*self)
    }
}

impl Numeric for i64 {
    fn coerce(&self) -> f64 {
        *self as f64
    }
}

impl Numeric for str {
    fn coerce(&self) -> f64 {
        parse_numeric_str(self)
    }
}

impl Numeric for String {
    fn coerce(&self) -> f64 {
        parse_numeric_str(self)
    }
}

impl Numeric for Value {
    fn coerce(&self) -> f64 {
        match self {
            Value::Number(n) => n.as_f64().map(finite_or_zero).unwrap_or(0.0),
            Value::String(s) => parse_numeric_str(s),
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Null | Value::Array(_) | Value::Object(_) => 0.0,
        }
    }
}

impl<T: Numeric + ?Sized> Numeric for &T {
    fn coerce(&self) -> f64 {
        (**self).coerce()
    }
}

impl<T: Numeric> Numeric for Option<T> {
    fn coerce(&self) -> f64 {
        self.as_ref().map(Numeric::coerce).unwrap_or(0.0)
    }
}

/// Coerce any raw value to a finite number.
///
/// Malformed input (non-numeric strings, null, arrays, objects, anything that
/// would produce NaN or infinity) maps to `0.0`.
///
/// ```
/// use findash::data::normalize::to_number;
/// use serde_json::json;
///
/// assert_eq!(to_number(&json!(3.75)), 3.75);
/// assert_eq!(to_number(&json!("5.22")), 5.22);
/// assert_eq!(to_number(&json!("invalid")), 0.0);
/// assert_eq!(to_number(&json!(null)), 0.0);
/// ```
pub fn to_number<T: Numeric + ?Sized>(value: &T) -> f64 {
    value.coerce()
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Parse a trimmed decimal, exponent or radix-prefixed string.
fn parse_numeric_str(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }

    // Radix prefixes are unsigned integers only
    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&s[2..], radix).map(|v| v as f64).unwrap_or(0.0);
    }

    // Rust accepts "inf"/"nan" spellings; the finiteness check rejects them
    s.parse::<f64>().map(finite_or_zero).unwrap_or(0.0)
}

/// Render `value` with a fixed number of decimals, split into sign and body.
///
/// A value that rounds to zero never carries a minus sign.
fn fixed_parts(value: f64, decimals: usize) -> (&'static str, String) {
    let body = format!("{:.*}", decimals, value.abs());
    let nonzero = body.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    let sign = if value < 0.0 && nonzero { "-" } else { "" };
    (sign, body)
}

/// Insert `,` separators into the integer part of an already-fixed number.
fn group_thousands(body: &str) -> String {
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (body, None),
    };

    let mut grouped = String::with_capacity(body.len() + int_part.len() / 3);
    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}

/// Two decimals with thousands separators, no currency symbol.
///
/// `3500.75` → `"3,500.75"`.
pub fn format_currency<T: Numeric + ?Sized>(value: &T) -> String {
    let (sign, body) = fixed_parts(to_number(value), 2);
    format!("{}{}", sign, group_thousands(&body))
}

/// Headline currency: like [`format_currency`] with a `$` symbol.
///
/// `189.45` → `"$189.45"`, `-12` → `"-$12.00"`.
pub fn format_headline_currency<T: Numeric + ?Sized>(value: &T) -> String {
    let (sign, body) = fixed_parts(to_number(value), 2);
    format!("{}${}", sign, group_thousands(&body))
}

/// Two decimals and a `%` suffix, keeping the sign.
pub fn format_percentage<T: Numeric + ?Sized>(value: &T) -> String {
    let (sign, body) = fixed_parts(to_number(value), 2);
    format!("{}{}%", sign, body)
}

/// Like [`format_percentage`] but always shows the direction: `+2.34%`.
///
/// Zero (including coercion failures) is rendered unsigned.
pub fn format_signed_percentage<T: Numeric + ?Sized>(value: &T) -> String {
    let n = to_number(value);
    let (sign, body) = fixed_parts(n, 2);
    let sign = if sign.is_empty() && n > 0.0 && body.bytes().any(|b| b.is_ascii_digit() && b != b'0')
    {
        "+"
    } else {
        sign
    };
    format!("{}{}%", sign, body)
}

/// Sentiment share as received, up to two decimals: `65%`, `65.5%`.
pub fn format_share_percentage<T: Numeric + ?Sized>(value: &T) -> String {
    let (sign, body) = fixed_parts(to_number(value), 2);
    let body = body.trim_end_matches('0').trim_end_matches('.');
    format!("{}{}%", sign, body)
}

/// `$`-prefixed currency abbreviated with `K`/`M` for large magnitudes.
///
/// Thresholds compare the absolute value and are inclusive:
///
/// ```
/// use findash::data::normalize::format_abbreviated_currency;
///
/// assert_eq!(format_abbreviated_currency(&999.0), "$999.00");
/// assert_eq!(format_abbreviated_currency(&1000.0), "$1.00K");
/// assert_eq!(format_abbreviated_currency(&1_000_000.0), "$1.00M");
/// ```
pub fn format_abbreviated_currency<T: Numeric + ?Sized>(value: &T) -> String {
    let n = to_number(value);
    let magnitude = n.abs();

    let (scaled, suffix) = if magnitude >= 1_000_000.0 {
        (n / 1_000_000.0, "M")
    } else if magnitude >= 1_000.0 {
        (n / 1_000.0, "K")
    } else {
        (n, "")
    };

    let (sign, body) = fixed_parts(scaled, 2);
    format!("{}${}{}", sign, body, suffix)
}

/// Direction of a period-over-period change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Flat,
    Down,
}

impl Direction {
    /// Arrow glyph for display; flat has none.
    pub fn symbol(&self) -> &'static str {
        match self {
            Direction::Up => "▲",
            Direction::Flat => "",
            Direction::Down => "▼",
        }
    }
}

/// A change value split into an unsigned magnitude and a direction.
///
/// The sign is never embedded in the numeral: `-3.75` becomes magnitude
/// `"3.75"` with `is_negative` set. A change that fails to coerce is treated
/// as zero and is therefore neutral (both flags false).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeIndicator {
    pub magnitude: String,
    pub is_positive: bool,
    pub is_negative: bool,
}

impl ChangeIndicator {
    /// Build an indicator from a raw change value.
    pub fn from_raw<T: Numeric + ?Sized>(change: &T) -> Self {
        let n = to_number(change);
        Self {
            magnitude: format!("{:.2}", n.abs()),
            is_positive: n > 0.0,
            is_negative: n < 0.0,
        }
    }

    pub fn direction(&self) -> Direction {
        if self.is_positive {
            Direction::Up
        } else if self.is_negative {
            Direction::Down
        } else {
            Direction::Flat
        }
    }
}

impl fmt::Display for ChangeIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.magnitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_number_passes_numbers_through() {
        assert_eq!(to_number(&json!(16789.45)), 16789.45);
        assert_eq!(to_number(&json!(-0.07)), -0.07);
        assert_eq!(to_number(&json!(42)), 42.0);
        assert_eq!(to_number(&-3.5), -3.5);
    }

    #[test]
    fn test_to_number_parses_numeric_strings() {
        assert_eq!(to_number(&json!("5.22")), 5.22);
        assert_eq!(to_number(&json!("  12 ")), 12.0);
        assert_eq!(to_number(&json!("-1e3")), -1000.0);
        assert_eq!(to_number(&json!(".5")), 0.5);
        assert_eq!(to_number(&json!("0x1A")), 26.0);
        assert_eq!(to_number(&json!("0b101")), 5.0);
        assert_eq!(to_number(""), 0.0);
    }

    #[test]
    fn test_to_number_is_total_and_finite() {
        let inputs = [
            json!("invalid"),
            json!("NaN"),
            json!("Infinity"),
            json!("-inf"),
            json!("1e400"),
            json!("12abc"),
            json!(null),
            json!([1, 2]),
            json!({"value": 3}),
            json!("0xZZ"),
        ];
        for input in &inputs {
            let n = to_number(input);
            assert!(n.is_finite(), "{input} produced {n}");
            assert_eq!(n, 0.0, "{input} should coerce to zero");
        }

        assert_eq!(to_number(&f64::NAN), 0.0);
        assert_eq!(to_number(&f64::INFINITY), 0.0);
        assert_eq!(to_number(&None::<Value>), 0.0);
    }

    #[test]
    fn test_to_number_booleans() {
        assert_eq!(to_number(&json!(true)), 1.0);
        assert_eq!(to_number(&json!(false)), 0.0);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(&3500.75), "3,500.75");
        assert_eq!(format_currency(&3200.5), "3,200.50");
        assert_eq!(format_currency(&16789.45), "16,789.45");
        assert_eq!(format_currency(&1_234_567.891), "1,234,567.89");
        assert_eq!(format_currency(&999.0), "999.00");
        assert_eq!(format_currency(&-38976.34), "-38,976.34");
        assert_eq!(format_currency(&json!("invalid")), "0.00");
        assert_eq!(format_currency(&-0.001), "0.00");
    }

    #[test]
    fn test_format_headline_currency() {
        assert_eq!(format_headline_currency(&189.45), "$189.45");
        assert_eq!(format_headline_currency(&1415.2), "$1,415.20");
        assert_eq!(format_headline_currency(&-12.0), "-$12.00");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(&3.25), "3.25%");
        assert_eq!(format_percentage(&-3.75), "-3.75%");
        assert_eq!(format_percentage(&json!("5.15")), "5.15%");
        assert_eq!(format_percentage(&json!("oops")), "0.00%");
    }

    #[test]
    fn test_format_signed_percentage() {
        assert_eq!(format_signed_percentage(&2.34), "+2.34%");
        assert_eq!(format_signed_percentage(&-1.23), "-1.23%");
        assert_eq!(format_signed_percentage(&0.0), "0.00%");
        assert_eq!(format_signed_percentage(&0.001), "0.00%");
    }

    #[test]
    fn test_format_share_percentage() {
        assert_eq!(format_share_percentage(&json!(65)), "65%");
        assert_eq!(format_share_percentage(&json!("20")), "20%");
        assert_eq!(format_share_percentage(&json!(65.5)), "65.5%");
        assert_eq!(format_share_percentage(&json!(100)), "100%");
        assert_eq!(format_share_percentage(&json!(0)), "0%");
        assert_eq!(format_share_percentage(&json!("33.25")), "33.25%");
    }

    #[test]
    fn test_format_abbreviated_currency_boundaries() {
        assert_eq!(format_abbreviated_currency(&999.0), "$999.00");
        assert_eq!(format_abbreviated_currency(&1000.0), "$1.00K");
        assert_eq!(format_abbreviated_currency(&1_000_000.0), "$1.00M");
        assert_eq!(format_abbreviated_currency(&12_567_890.0), "$12.57M");
        assert_eq!(format_abbreviated_currency(&567_890.0), "$567.89K");
        assert_eq!(format_abbreviated_currency(&json!("bad")), "$0.00");
    }

    #[test]
    fn test_format_abbreviated_currency_negative_uses_magnitude() {
        assert_eq!(format_abbreviated_currency(&-1500.0), "-$1.50K");
        assert_eq!(format_abbreviated_currency(&-2_000_000.0), "-$2.00M");
        assert_eq!(format_abbreviated_currency(&-5.0), "-$5.00");
    }

    #[test]
    fn test_change_indicator_splits_sign() {
        let change = ChangeIndicator::from_raw(&-3.75);
        assert_eq!(change.to_string(), "3.75%");
        assert!(change.is_negative);
        assert!(!change.is_positive);
        assert_eq!(change.direction(), Direction::Down);

        let change = ChangeIndicator::from_raw(&json!(2.5));
        assert_eq!(change.to_string(), "2.50%");
        assert_eq!(change.direction(), Direction::Up);
    }

    #[test]
    fn test_change_indicator_neutral_for_zero_and_garbage() {
        for raw in [json!(0), json!("n/a"), json!(null), json!({})] {
            let change = ChangeIndicator::from_raw(&raw);
            assert!(!change.is_positive);
            assert!(!change.is_negative);
            assert_eq!(change.direction(), Direction::Flat);
            assert_eq!(change.to_string(), "0.00%");
        }
    }
}
