//! Validation schemas for raw form input.
//!
//! A schema accepts a raw value, where `None` means the field was not
//! submitted at all, and either produces a typed value or a
//! [`ValidationError`] listing every problem it found.

pub mod form;
pub mod primitives;

pub use form::FormSchema;
pub use primitives::{BooleanSchema, NumberSchema, StringSchema};

use serde_json::{Map, Number, Value};

use crate::errors::{ValidationError, ValidationResult};
use crate::types::FieldDescriptor;

/// Largest integer magnitude an `f64` represents exactly (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Validate-and-parse capability shared by every schema.
pub trait Schema: Send + Sync {
    type Output;

    fn validate(&self, raw: Option<Value>) -> ValidationResult<Self::Output>;

    fn descriptor(&self) -> FieldDescriptor;

    /// Accepts an absent value instead of reporting it as missing.
    fn optional(self) -> Optional<Self>
    where
        Self: Sized,
    {
        Optional::new(self)
    }
}

/// Schema wrapper that turns an absent value into `Ok(None)`.
#[derive(Debug, Clone)]
pub struct Optional<S> {
    inner: S,
}

impl<S> Optional<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: Schema> Schema for Optional<S> {
    type Output = Option<S::Output>;

    fn validate(&self, raw: Option<Value>) -> ValidationResult<Self::Output> {
        match raw {
            None => Ok(None),
            Some(value) => self.inner.validate(Some(value)).map(Some),
        }
    }

    fn descriptor(&self) -> FieldDescriptor {
        let mut descriptor = self.inner.descriptor();
        descriptor.required = false;
        descriptor
    }
}

/// Conversion of a schema's typed output back into a JSON field value.
///
/// `None` means the field is absent and is left out of the enclosing object.
pub trait IntoFieldValue {
    fn into_field_value(self) -> Option<Value>;
}

impl IntoFieldValue for f64 {
    fn into_field_value(self) -> Option<Value> {
        number_from_f64(self).map(Value::Number)
    }
}

impl IntoFieldValue for String {
    fn into_field_value(self) -> Option<Value> {
        Some(Value::String(self))
    }
}

impl IntoFieldValue for bool {
    fn into_field_value(self) -> Option<Value> {
        Some(Value::Bool(self))
    }
}

impl IntoFieldValue for Value {
    fn into_field_value(self) -> Option<Value> {
        Some(self)
    }
}

impl IntoFieldValue for Map<String, Value> {
    fn into_field_value(self) -> Option<Value> {
        Some(Value::Object(self))
    }
}

impl<T: IntoFieldValue> IntoFieldValue for Option<T> {
    fn into_field_value(self) -> Option<Value> {
        self.and_then(IntoFieldValue::into_field_value)
    }
}

/// Object-safe view of a schema, used where fields of different output
/// types live side by side.
pub trait FieldSchema: Send + Sync {
    fn validate_field(&self, raw: Option<Value>) -> ValidationResult<Option<Value>>;

    fn field_descriptor(&self) -> FieldDescriptor;
}

impl<S> FieldSchema for S
where
    S: Schema,
    S::Output: IntoFieldValue,
{
    fn validate_field(&self, raw: Option<Value>) -> ValidationResult<Option<Value>> {
        self.validate(raw).map(IntoFieldValue::into_field_value)
    }

    fn field_descriptor(&self) -> FieldDescriptor {
        self.descriptor()
    }
}

/// JSON number for a finite `f64`; integral values inside the exact range
/// are stored as integers so `"17"` and `17` compare equal downstream.
pub fn number_from_f64(value: f64) -> Option<Number> {
    if !value.is_finite() {
        return None;
    }
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        return Some(Number::from(value as i64));
    }
    Number::from_f64(value)
}

/// Human-readable kind of a raw value, as used in type mismatch messages.
pub fn received_kind(raw: &Option<Value>) -> &'static str {
    match raw {
        None => "absent",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

pub(crate) fn required_issue() -> ValidationError {
    ValidationError::here("validation.required", "field is required")
}

pub(crate) fn type_issue(expected: &str, raw: &Option<Value>) -> ValidationError {
    ValidationError::here(
        "validation.type",
        format!("expected {expected}, received {}", received_kind(raw)),
    )
}
