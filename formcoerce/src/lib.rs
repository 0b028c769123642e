//! formcoerce core library.
//!
//! Form input arrives as strings. This crate provides the schemas that
//! validate submitted forms and the two coercers that sit in front of them:
//! [`NumericCoercer`] turns numeric strings into numbers and
//! [`EmptyStringNormalizer`] turns blank strings into absent values.
//!
//! ```
//! use formcoerce::{NumberSchema, NumericCoercer, Schema};
//! use serde_json::json;
//!
//! let age = NumericCoercer::wrap(NumberSchema::integer().min(0.0));
//! assert_eq!(age.validate(Some(json!("17"))).unwrap(), 17.0);
//! ```

pub mod coerce;
pub mod config;
pub mod errors;
pub mod registry;
pub mod schema;
pub mod types;
pub mod validators;

pub use coerce::{Coerced, EmptyStringNormalizer, Normalizer, NumericCoercer, coerce_number, empty_as_absent};
pub use config::{CONFIG_FILE_NAME, CoerceMode, FieldDefinition, FormDefinition, FormsConfig};
pub use errors::*;
pub use registry::FormRegistry;
pub use schema::{
    BooleanSchema, FieldSchema, FormSchema, IntoFieldValue, NumberSchema, Optional, Schema, StringSchema,
};
pub use types::{CoercionKind, FieldDescriptor, FieldKind, StringFormat, ValidationRule};
