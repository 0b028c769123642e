//! The two form-input normalizers.

use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Number, Value};

use super::{Coerced, Normalizer};
use crate::schema::{Schema, number_from_f64};
use crate::types::CoercionKind;
use crate::validators::{is_blank, trim_form_input};

/// Decimal literal accepted by [`parse_numeric_literal`]: optional sign,
/// digits with an optional fraction (`5.` and `.5` included), optional
/// exponent. ASCII digits only.
static NUMERIC_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
        .expect("numeric literal pattern is valid")
});

/// Parses a trimmed decimal literal into a finite JSON number.
///
/// Hex/octal/binary prefixes, `Infinity`, `NaN`, digit separators and values
/// that overflow to infinity are rejected.
pub fn parse_numeric_literal(text: &str) -> Option<Number> {
    let trimmed = trim_form_input(text);
    if !NUMERIC_LITERAL.is_match(trimmed) {
        return None;
    }
    let parsed: f64 = trimmed.parse().ok()?;
    number_from_f64(parsed)
}

/// Turns blank strings into absent values and numeric strings into numbers.
///
/// Blank wins over numeric parsing, and `"0"` becomes the number `0`.
/// Anything else, including strings that do not parse, is passed through so
/// the wrapped schema reports it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericCoercer;

impl NumericCoercer {
    pub fn wrap<S: Schema>(schema: S) -> Coerced<Self, S> {
        Coerced::new(Self, schema)
    }
}

impl Normalizer for NumericCoercer {
    fn normalize(&self, raw: Option<Value>) -> Option<Value> {
        match raw {
            Some(Value::String(text)) => {
                if is_blank(&text) {
                    trace!("numeric coercion: blank string -> absent");
                    return None;
                }
                match parse_numeric_literal(&text) {
                    Some(number) => {
                        trace!("numeric coercion: {text:?} -> {number}");
                        Some(Value::Number(number))
                    }
                    None => Some(Value::String(text)),
                }
            }
            other => other,
        }
    }

    fn kind(&self) -> CoercionKind {
        CoercionKind::Numeric
    }
}

/// Turns blank strings into absent values; everything else passes through.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyStringNormalizer;

impl EmptyStringNormalizer {
    pub fn wrap<S: Schema>(schema: S) -> Coerced<Self, S> {
        Coerced::new(Self, schema)
    }
}

impl Normalizer for EmptyStringNormalizer {
    fn normalize(&self, raw: Option<Value>) -> Option<Value> {
        match raw {
            Some(Value::String(text)) if is_blank(&text) => {
                trace!("empty-string coercion: blank string -> absent");
                None
            }
            other => other,
        }
    }

    fn kind(&self) -> CoercionKind {
        CoercionKind::EmptyAsAbsent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn numeric(raw: Value) -> Option<Value> {
        NumericCoercer.normalize(Some(raw))
    }

    #[test]
    fn numeric_literals_parse() {
        assert_eq!(numeric(json!("42")), Some(json!(42)));
        assert_eq!(numeric(json!("-3.5")), Some(json!(-3.5)));
        assert_eq!(numeric(json!("1e3")), Some(json!(1000)));
        assert_eq!(numeric(json!("+7")), Some(json!(7)));
        assert_eq!(numeric(json!(".5")), Some(json!(0.5)));
        assert_eq!(numeric(json!("5.")), Some(json!(5)));
        assert_eq!(numeric(json!("  12  ")), Some(json!(12)));
    }

    #[test]
    fn byte_order_mark_is_trimmed() {
        assert_eq!(numeric(json!("\u{feff}12")), Some(json!(12)));
        assert_eq!(numeric(json!("\u{feff}")), None);
        assert_eq!(EmptyStringNormalizer.normalize(Some(json!("\u{feff} "))), None);
    }

    #[test]
    fn zero_is_a_number_not_absent() {
        assert_eq!(numeric(json!("0")), Some(json!(0)));
        assert_eq!(numeric(json!("0.0")), Some(json!(0)));
    }

    #[test]
    fn blank_strings_become_absent() {
        for blank in ["", " ", "\t\n", "   "] {
            assert_eq!(numeric(json!(blank)), None, "{blank:?}");
            assert_eq!(EmptyStringNormalizer.normalize(Some(json!(blank))), None, "{blank:?}");
        }
    }

    #[test]
    fn non_numeric_strings_pass_through() {
        for text in ["abc", "0x1A", "Infinity", "NaN", "1_000", "1,5", "1 000", "e5", "1e", "1e400"] {
            assert_eq!(numeric(json!(text)), Some(json!(text)), "{text:?}");
        }
    }

    #[test]
    fn non_strings_pass_through() {
        for value in [json!(3), json!(true), json!(null), json!([1]), json!({"a": 1})] {
            assert_eq!(numeric(value.clone()), Some(value.clone()));
            assert_eq!(EmptyStringNormalizer.normalize(Some(value.clone())), Some(value));
        }
        assert_eq!(NumericCoercer.normalize(None), None);
        assert_eq!(EmptyStringNormalizer.normalize(None), None);
    }

    #[test]
    fn empty_normalizer_keeps_content_verbatim() {
        assert_eq!(
            EmptyStringNormalizer.normalize(Some(json!("  padded  "))),
            Some(json!("  padded  "))
        );
        assert_eq!(EmptyStringNormalizer.normalize(Some(json!("0"))), Some(json!("0")));
    }

    #[test]
    fn parse_rejects_overflow() {
        assert!(parse_numeric_literal("1e308").is_some());
        assert!(parse_numeric_literal("1e309").is_none());
    }
}
