use std::fmt;

use log::debug;
use serde_json::{Map, Value};

use super::{FieldSchema, Schema, required_issue, type_issue};
use crate::errors::{ValidationError, ValidationResult};
use crate::types::{FieldDescriptor, FieldKind};

/// Named set of field schemas validating one submitted form.
///
/// Every field is validated even after an earlier one fails, so a single
/// pass reports all problems. Issue paths are prefixed with the field name.
/// Keys without a matching field are dropped, and fields whose schema
/// yields an absent value are left out of the output object.
pub struct FormSchema {
    name: String,
    description: Option<String>,
    fields: Vec<(String, Box<dyn FieldSchema>)>,
}

impl FormSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field<S>(mut self, name: impl Into<String>, schema: S) -> Self
    where
        S: FieldSchema + 'static,
    {
        self.push_field(name, Box::new(schema));
        self
    }

    pub fn push_field(&mut self, name: impl Into<String>, schema: Box<dyn FieldSchema>) {
        self.fields.push((name.into(), schema));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|(field, _)| field == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Debug for FormSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormSchema")
            .field("name", &self.name)
            .field("fields", &self.field_names().collect::<Vec<_>>())
            .finish()
    }
}

impl Schema for FormSchema {
    type Output = Map<String, Value>;

    fn validate(&self, raw: Option<Value>) -> ValidationResult<Self::Output> {
        let mut submitted = match raw {
            None => return Err(required_issue()),
            Some(Value::Object(map)) => map,
            other => return Err(type_issue("object", &other)),
        };

        let mut output = Map::new();
        let mut issues = Vec::new();
        for (name, schema) in &self.fields {
            match schema.validate_field(submitted.remove(name)) {
                Ok(Some(value)) => {
                    output.insert(name.clone(), value);
                }
                Ok(None) => {}
                Err(err) => issues.extend(err.at(name).issues),
            }
        }

        if !submitted.is_empty() {
            debug!(
                "form '{}' ignored {} unknown key(s): {:?}",
                self.name,
                submitted.len(),
                submitted.keys().collect::<Vec<_>>()
            );
        }

        if issues.is_empty() {
            debug!("form '{}' validated {} field(s)", self.name, output.len());
            Ok(output)
        } else {
            debug!("form '{}' failed with {} issue(s)", self.name, issues.len());
            Err(ValidationError::new(issues))
        }
    }

    fn descriptor(&self) -> FieldDescriptor {
        let mut descriptor = FieldDescriptor::new(FieldKind::Form).named(self.name.clone());
        descriptor.fields = self
            .fields
            .iter()
            .map(|(name, schema)| schema.field_descriptor().named(name.clone()))
            .collect();
        descriptor
    }
}
