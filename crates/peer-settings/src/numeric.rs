//! Integer coercion for number-kind fields.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The value held by a number-kind field.
///
/// Input that does not start with an integer is kept as [`NumericValue::NotANumber`]
/// instead of being rejected, so the record stays complete and the receiving
/// service decides what to do with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericValue {
    Int(i64),
    NotANumber,
}

impl NumericValue {
    pub fn as_i64(self) -> Option<i64> {
        match self {
            NumericValue::Int(i) => Some(i),
            NumericValue::NotANumber => None,
        }
    }

    pub fn is_nan(self) -> bool {
        matches!(self, NumericValue::NotANumber)
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericValue::Int(i) => write!(f, "{}", i),
            NumericValue::NotANumber => write!(f, "NaN"),
        }
    }
}

impl Serialize for NumericValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NumericValue::Int(i) => serializer.serialize_i64(*i),
            NumericValue::NotANumber => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for NumericValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<i64>::deserialize(deserializer)?;
        Ok(value.map_or(NumericValue::NotANumber, NumericValue::Int))
    }
}

/// Parse the leading base-10 integer of `raw`.
///
/// Leading whitespace is skipped and one `+` or `-` sign is accepted, then the
/// longest run of ASCII digits is read; anything after it is ignored. Input
/// without digits, or whose digits overflow `i64`, yields `NotANumber`.
pub fn parse_int(raw: &str) -> NumericValue {
    let rest = raw.trim_start();
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };

    let digits_end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return NumericValue::NotANumber;
    }

    let mut value: i64 = 0;
    for b in rest[..digits_end].bytes() {
        let digit = i64::from(b - b'0');
        let next = value.checked_mul(10).and_then(|v| {
            if negative {
                v.checked_sub(digit)
            } else {
                v.checked_add(digit)
            }
        });
        match next {
            Some(v) => value = v,
            None => return NumericValue::NotANumber,
        }
    }

    NumericValue::Int(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_integers() {
        assert_eq!(parse_int("5432"), NumericValue::Int(5432));
        assert_eq!(parse_int("0"), NumericValue::Int(0));
        assert_eq!(parse_int("-7"), NumericValue::Int(-7));
        assert_eq!(parse_int("+22"), NumericValue::Int(22));
    }

    #[test]
    fn test_parse_uses_leading_digits_only() {
        assert_eq!(parse_int("  42"), NumericValue::Int(42));
        assert_eq!(parse_int("12ab"), NumericValue::Int(12));
        assert_eq!(parse_int("3.9"), NumericValue::Int(3));
        assert_eq!(parse_int("0x10"), NumericValue::Int(0));
    }

    #[test]
    fn test_parse_without_digits_is_nan() {
        assert!(parse_int("").is_nan());
        assert!(parse_int("abc").is_nan());
        assert!(parse_int("-").is_nan());
        assert!(parse_int("  ").is_nan());
        assert!(parse_int("a12").is_nan());
    }

    #[test]
    fn test_parse_overflow_is_nan() {
        assert!(parse_int("99999999999999999999").is_nan());
        assert_eq!(
            parse_int("-9223372036854775808"),
            NumericValue::Int(i64::MIN)
        );
    }

    #[test]
    fn test_parse_is_repeatable() {
        assert_eq!(parse_int("80x"), parse_int("80x"));
        assert_eq!(parse_int("nope"), parse_int("nope"));
    }

    #[test]
    fn test_display() {
        assert_eq!(NumericValue::Int(22).to_string(), "22");
        assert_eq!(NumericValue::NotANumber.to_string(), "NaN");
    }

    #[test]
    fn test_serde_uses_null_for_nan() {
        assert_eq!(serde_json::to_string(&NumericValue::Int(5)).unwrap(), "5");
        assert_eq!(
            serde_json::to_string(&NumericValue::NotANumber).unwrap(),
            "null"
        );

        let parsed: NumericValue = serde_json::from_str("null").unwrap();
        assert!(parsed.is_nan());
        let parsed: NumericValue = serde_json::from_str("5432").unwrap();
        assert_eq!(parsed.as_i64(), Some(5432));
    }
}
