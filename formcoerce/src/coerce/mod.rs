//! Raw-input coercion applied in front of a schema.
//!
//! Browsers submit every form field as a string. The coercers here rewrite
//! those strings into the shape the wrapped schema expects and then hand the
//! result over unchanged in meaning: they never fail on their own and never
//! alter the wrapped schema's verdict.

pub mod normalizers;

pub use normalizers::*;

use serde_json::Value;

use crate::errors::ValidationResult;
use crate::schema::Schema;
use crate::types::{CoercionKind, FieldDescriptor};

/// Pure rewrite of a raw value. `None` is the absent sentinel.
pub trait Normalizer: Send + Sync {
    fn normalize(&self, raw: Option<Value>) -> Option<Value>;

    fn kind(&self) -> CoercionKind;
}

/// Schema that normalizes its input before delegating to `inner`.
#[derive(Debug, Clone)]
pub struct Coerced<N, S> {
    normalizer: N,
    inner: S,
}

impl<N, S> Coerced<N, S> {
    pub fn new(normalizer: N, inner: S) -> Self {
        Self { normalizer, inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn normalizer(&self) -> &N {
        &self.normalizer
    }
}

impl<N, S> Schema for Coerced<N, S>
where
    N: Normalizer,
    S: Schema,
{
    type Output = S::Output;

    fn validate(&self, raw: Option<Value>) -> ValidationResult<S::Output> {
        self.inner.validate(self.normalizer.normalize(raw))
    }

    fn descriptor(&self) -> FieldDescriptor {
        let mut descriptor = self.inner.descriptor();
        descriptor.coercion = self.normalizer.kind();
        descriptor
    }
}

/// Wraps `schema` so numeric strings reach it as numbers.
pub fn coerce_number<S: Schema>(schema: S) -> Coerced<NumericCoercer, S> {
    NumericCoercer::wrap(schema)
}

/// Wraps `schema` so blank strings reach it as absent values.
pub fn empty_as_absent<S: Schema>(schema: S) -> Coerced<EmptyStringNormalizer, S> {
    EmptyStringNormalizer::wrap(schema)
}
