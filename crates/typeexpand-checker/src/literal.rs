//! Literal values carried by literal types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Arbitrary precision integer in the checker's own encoding: a sign plus the
/// base-10 digits of the magnitude.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PseudoBigInt {
    pub negative: bool,
    #[serde(rename = "base10Value")]
    pub base10_value: String,
}

impl PseudoBigInt {
    pub fn new(negative: bool, base10_value: impl Into<String>) -> Self {
        PseudoBigInt {
            negative,
            base10_value: base10_value.into(),
        }
    }

    /// Parse source text such as `123n` or `-45n` (the `n` suffix is optional).
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (negative, rest) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let digits = rest.strip_suffix('n').unwrap_or(rest);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let trimmed = digits.trim_start_matches('0');
        let magnitude = if trimmed.is_empty() { "0" } else { trimmed };
        Some(PseudoBigInt {
            negative: negative && magnitude != "0",
            base10_value: magnitude.to_string(),
        })
    }
}

impl fmt::Display for PseudoBigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        write!(f, "{}n", self.base10_value)
    }
}

/// The runtime value of a literal type.
///
/// Serialized untagged so the JSON type of the value is the discriminant:
/// `20` and `"20"` stay distinct, and bigints use the
/// `{"negative", "base10Value"}` object so no precision is lost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    BigInt(PseudoBigInt),
}

impl LiteralValue {
    pub fn string(value: impl Into<String>) -> Self {
        LiteralValue::String(value.into())
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            LiteralValue::Null => "null",
            LiteralValue::Boolean(_) => "boolean",
            LiteralValue::Number(_) => "number",
            LiteralValue::String(_) => "string",
            LiteralValue::BigInt(_) => "bigint",
        }
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        LiteralValue::Boolean(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        LiteralValue::Number(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        LiteralValue::String(value.to_string())
    }
}

impl From<PseudoBigInt> for LiteralValue {
    fn from(value: PseudoBigInt) -> Self {
        LiteralValue::BigInt(value)
    }
}

/// Renders the value the way a checker prints the literal type.
impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Null => f.write_str("null"),
            LiteralValue::Boolean(value) => write!(f, "{value}"),
            LiteralValue::Number(value) => write!(f, "{value}"),
            LiteralValue::String(value) => write!(f, "\"{value}\""),
            LiteralValue::BigInt(value) => write!(f, "{value}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bigint_parse() {
        assert_eq!(PseudoBigInt::parse("123n"), Some(PseudoBigInt::new(false, "123")));
        assert_eq!(PseudoBigInt::parse("-0045n"), Some(PseudoBigInt::new(true, "45")));
        assert_eq!(PseudoBigInt::parse("-0n"), Some(PseudoBigInt::new(false, "0")));
        assert_eq!(PseudoBigInt::parse("12a"), None);
        assert_eq!(PseudoBigInt::parse("n"), None);
    }

    #[test]
    fn test_display_matches_checker_rendering() {
        assert_eq!(LiteralValue::from(20.0).to_string(), "20");
        assert_eq!(LiteralValue::from(1.5).to_string(), "1.5");
        assert_eq!(LiteralValue::from("hello").to_string(), "\"hello\"");
        assert_eq!(LiteralValue::from(true).to_string(), "true");
        assert_eq!(
            LiteralValue::from(PseudoBigInt::new(true, "9007199254740993")).to_string(),
            "-9007199254740993n"
        );
    }

    #[test]
    fn test_json_keeps_runtime_type() {
        let number = serde_json::to_string(&LiteralValue::from(20.0)).unwrap();
        let string = serde_json::to_string(&LiteralValue::from("20")).unwrap();
        assert_ne!(number, string);

        let back: LiteralValue = serde_json::from_str("20").unwrap();
        assert_eq!(back, LiteralValue::Number(20.0));
        let back: LiteralValue = serde_json::from_str("\"20\"").unwrap();
        assert_eq!(back, LiteralValue::string("20"));
        let back: LiteralValue = serde_json::from_str("null").unwrap();
        assert_eq!(back, LiteralValue::Null);

        let big = LiteralValue::from(PseudoBigInt::new(false, "123456789012345678901234567890"));
        let json = serde_json::to_string(&big).unwrap();
        assert_eq!(json, r#"{"negative":false,"base10Value":"123456789012345678901234567890"}"#);
        let back: LiteralValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, big);
    }
}
