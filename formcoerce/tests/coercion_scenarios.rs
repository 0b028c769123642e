use formcoerce::{
    EmptyStringNormalizer, Normalizer, NumberSchema, NumericCoercer, Schema, StringSchema, coerce_number,
    empty_as_absent,
};
use serde_json::{Value, json};

const BLANKS: &[&str] = &["", " ", "   ", "\t", "\n\r ", "\u{2003}"];

fn non_strings() -> Vec<Value> {
    vec![
        json!(0),
        json!(-12.75),
        json!(true),
        json!(false),
        json!(null),
        json!([]),
        json!(["1"]),
        json!({ "value": "1" }),
    ]
}

#[test]
fn non_string_values_pass_through_both_coercers() {
    for value in non_strings() {
        assert_eq!(NumericCoercer.normalize(Some(value.clone())), Some(value.clone()));
        assert_eq!(EmptyStringNormalizer.normalize(Some(value.clone())), Some(value));
    }
}

#[test]
fn whitespace_only_strings_become_absent() {
    for blank in BLANKS {
        let raw = Some(json!(blank));
        assert_eq!(NumericCoercer.normalize(raw.clone()), None, "{blank:?}");
        assert_eq!(EmptyStringNormalizer.normalize(raw), None, "{blank:?}");
    }
}

#[test]
fn numeric_strings_yield_their_number() {
    let schema = coerce_number(NumberSchema::new());
    for (text, expected) in [("42", 42.0), ("-3.5", -3.5), ("1e3", 1000.0), ("2.5E-1", 0.25), (" 8 ", 8.0)] {
        assert_eq!(schema.validate(Some(json!(text))).unwrap(), expected, "{text:?}");
    }
}

#[test]
fn zero_string_is_numeric_zero() {
    let schema = coerce_number(NumberSchema::new());
    assert_eq!(schema.validate(Some(json!("0"))).unwrap(), 0.0);
    assert_eq!(NumericCoercer.normalize(Some(json!("0"))), Some(json!(0)));
}

#[test]
fn non_numeric_string_is_forwarded_and_rejected_by_number_schema() {
    assert_eq!(NumericCoercer.normalize(Some(json!("abc"))), Some(json!("abc")));

    let err = coerce_number(NumberSchema::new()).validate(Some(json!("abc"))).unwrap_err();
    assert_eq!(err.issues.len(), 1);
    assert_eq!(err.issues[0].code, "validation.type");
    assert_eq!(err.issues[0].message, "expected number, received string");
}

#[test]
fn validated_output_is_stable_when_fed_back() {
    let schema = coerce_number(NumberSchema::new());
    let first = schema.validate(Some(json!("17"))).unwrap();
    let second = schema.validate(Some(json!(first))).unwrap();
    assert_eq!(first, second);

    let text = empty_as_absent(StringSchema::new().optional());
    let first = text.validate(Some(json!("gallery"))).unwrap();
    let second = text.validate(first.clone().map(Value::String)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn blank_number_fails_only_when_required() {
    let required = coerce_number(NumberSchema::new());
    let err = required.validate(Some(json!("  "))).unwrap_err();
    assert_eq!(err.codes(), vec!["validation.required"]);

    let optional = coerce_number(NumberSchema::new().optional());
    assert_eq!(optional.validate(Some(json!("  "))).unwrap(), None);
}

#[test]
fn blank_optional_string_succeeds_as_absent() {
    let schema = EmptyStringNormalizer::wrap(StringSchema::new().optional());
    assert_eq!(schema.validate(Some(json!("   "))).unwrap(), None);
    assert_eq!(schema.validate(Some(json!(" x "))).unwrap(), Some(" x ".to_string()));
}

#[test]
fn numeric_string_validates_to_number() {
    let schema = NumericCoercer::wrap(NumberSchema::new());
    assert_eq!(schema.validate(Some(json!("17"))).unwrap(), 17.0);
}

#[test]
fn wrapped_failures_keep_their_shape() {
    let inner = NumberSchema::integer().min(10.0);
    let direct = inner.validate(Some(json!(2.5))).unwrap_err();
    let coerced = NumericCoercer::wrap(inner).validate(Some(json!("2.5"))).unwrap_err();
    assert_eq!(direct, coerced);
    assert_eq!(coerced.codes(), vec!["validation.integer", "validation.range"]);
}

#[test]
fn coercers_are_shareable_across_threads() {
    let schema = std::sync::Arc::new(coerce_number(NumberSchema::new().optional()));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let schema = std::sync::Arc::clone(&schema);
            std::thread::spawn(move || schema.validate(Some(json!(i.to_string()))).unwrap())
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|handle| handle.join().unwrap()).collect();
    assert_eq!(results, vec![Some(0.0), Some(1.0), Some(2.0), Some(3.0)]);
}
