//! Raw metric values and their coercion to floating point.

use serde::{Deserialize, Serialize};

/// A numeric field as it arrived from the record supplier.
///
/// Reporting queries hand over numbers, numeric strings (e.g. `NUMERIC`
/// columns serialized as text), or nulls. The value is kept as received and
/// only coerced when the decision matrix is built.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
    #[default]
    Missing,
    /// Any other JSON shape (booleans, arrays, objects). Coerces to the default.
    Unsupported(serde_json::Value),
}

impl MetricValue {
    /// Returns true when no value was supplied.
    pub fn is_missing(&self) -> bool {
        matches!(self, MetricValue::Missing)
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Number(value)
    }
}

impl From<i64> for MetricValue {
    fn from(value: i64) -> Self {
        MetricValue::Number(value as f64)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::Text(value.to_string())
    }
}

/// Coerces a metric to a finite `f64`, falling back to `default`.
///
/// - Finite numbers pass through.
/// - Text is parsed by its longest leading decimal prefix, so `" 1500.50"`
///   yields 1500.5, `"12%"` yields 12 and `"1,200"` yields 1.
/// - Missing, unsupported, unparseable and non-finite values yield `default`.
pub fn to_finite_float(value: &MetricValue, default: f64) -> f64 {
    let parsed = match value {
        MetricValue::Number(n) => Some(*n),
        MetricValue::Text(text) => leading_decimal(text),
        MetricValue::Missing | MetricValue::Unsupported(_) => None,
    };

    match parsed {
        Some(n) if n.is_finite() => n,
        _ => default,
    }
}

/// Parses the longest prefix of `text` (after leading whitespace) that forms
/// a decimal literal: optional sign, digits with an optional fraction, and an
/// optional exponent.
fn leading_decimal(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();
    let count_digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_digits = count_digits(end);
    end += int_digits;
    let mut mantissa_digits = int_digits;

    if end < len && bytes[end] == b'.' {
        let frac_digits = count_digits(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
            mantissa_digits += frac_digits;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    if end < len && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < len && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits = count_digits(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_pass_through() {
        assert_eq!(to_finite_float(&MetricValue::Number(42.5), 0.0), 42.5);
        assert_eq!(to_finite_float(&MetricValue::Number(-10.0), 0.0), -10.0);
    }

    #[test]
    fn non_finite_numbers_use_default() {
        assert_eq!(to_finite_float(&MetricValue::Number(f64::NAN), 0.0), 0.0);
        assert_eq!(to_finite_float(&MetricValue::Number(f64::INFINITY), 7.0), 7.0);
    }

    #[test]
    fn missing_uses_default() {
        assert_eq!(to_finite_float(&MetricValue::Missing, 0.0), 0.0);
        assert_eq!(to_finite_float(&MetricValue::Missing, 3.0), 3.0);
    }

    #[test]
    fn numeric_text_is_parsed() {
        assert_eq!(to_finite_float(&MetricValue::from("700000"), 0.0), 700000.0);
        assert_eq!(to_finite_float(&MetricValue::from(" 1500.50 "), 0.0), 1500.5);
        assert_eq!(to_finite_float(&MetricValue::from("-10000"), 0.0), -10000.0);
        assert_eq!(to_finite_float(&MetricValue::from(".5"), 0.0), 0.5);
        assert_eq!(to_finite_float(&MetricValue::from("2.5e3"), 0.0), 2500.0);
    }

    #[test]
    fn text_uses_leading_numeric_prefix() {
        assert_eq!(to_finite_float(&MetricValue::from("12%"), 0.0), 12.0);
        assert_eq!(to_finite_float(&MetricValue::from("1,200"), 0.0), 1.0);
        assert_eq!(to_finite_float(&MetricValue::from("3e"), 0.0), 3.0);
        assert_eq!(to_finite_float(&MetricValue::from("7.25.1"), 0.0), 7.25);
    }

    #[test]
    fn unparseable_text_uses_default() {
        assert_eq!(to_finite_float(&MetricValue::from("abc"), 0.0), 0.0);
        assert_eq!(to_finite_float(&MetricValue::from(""), 0.0), 0.0);
        assert_eq!(to_finite_float(&MetricValue::from("-"), 0.0), 0.0);
        assert_eq!(to_finite_float(&MetricValue::from("."), 0.0), 0.0);
        assert_eq!(to_finite_float(&MetricValue::from("Infinity"), 0.0), 0.0);
    }

    #[test]
    fn overflowing_text_uses_default() {
        assert_eq!(to_finite_float(&MetricValue::from("1e999"), 0.0), 0.0);
    }

    #[test]
    fn deserializes_every_supported_shape() {
        let values: Vec<MetricValue> =
            serde_json::from_str(r#"[12.5, "300", null, true]"#).unwrap();
        assert_eq!(values[0], MetricValue::Number(12.5));
        assert_eq!(values[1], MetricValue::Text("300".to_string()));
        assert!(values[2].is_missing());
        assert_eq!(values[3], MetricValue::Unsupported(serde_json::Value::Bool(true)));
        assert_eq!(to_finite_float(&values[3], 0.0), 0.0);
    }
}
