use std::collections::BTreeMap;

use log::debug;
use serde_json::{Map, Value};

use crate::config::FormsConfig;
use crate::errors::FormError;
use crate::schema::{FormSchema, Schema};

/// Forms available for validation, keyed by name.
#[derive(Debug, Default)]
pub struct FormRegistry {
    forms: BTreeMap<String, FormSchema>,
}

impl FormRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &FormsConfig) -> Result<Self, FormError> {
        let mut registry = Self::new();
        for form in config.build_forms()? {
            registry.register(form)?;
        }
        debug!("registered {} form(s)", registry.len());
        Ok(registry)
    }

    pub fn register(&mut self, form: FormSchema) -> Result<(), FormError> {
        if self.forms.contains_key(form.name()) {
            return Err(FormError::config(format!("form '{}' is already registered", form.name())));
        }
        self.forms.insert(form.name().to_string(), form);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FormSchema> {
        self.forms.get(name)
    }

    /// Registered form names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.forms.keys().map(String::as_str)
    }

    pub fn forms(&self) -> impl Iterator<Item = &FormSchema> {
        self.forms.values()
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    pub fn validate(&self, name: &str, raw: Option<Value>) -> Result<Map<String, Value>, FormError> {
        let form = self.get(name).ok_or_else(|| FormError::UnknownForm { name: name.to_string() })?;
        Ok(form.validate(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::coerce_number;
    use crate::schema::NumberSchema;
    use serde_json::json;

    fn registry() -> FormRegistry {
        let mut registry = FormRegistry::new();
        registry
            .register(FormSchema::new("rating").field("stars", coerce_number(NumberSchema::integer().min(1.0).max(5.0))))
            .unwrap();
        registry.register(FormSchema::new("about")).unwrap();
        registry
    }

    #[test]
    fn lists_names_sorted() {
        let registry = registry();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["about", "rating"]);
    }

    #[test]
    fn validates_by_name() {
        let output = registry().validate("rating", Some(json!({ "stars": "4" }))).unwrap();
        assert_eq!(output.get("stars"), Some(&json!(4)));

        let err = registry().validate("rating", Some(json!({ "stars": "9" }))).unwrap_err();
        match err {
            FormError::Validation(validation) => {
                assert_eq!(validation.issues[0].field, "stars");
                assert_eq!(validation.issues[0].code, "validation.range");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_and_duplicate_forms_are_errors() {
        let mut registry = registry();
        assert!(matches!(
            registry.validate("gallery", Some(json!({}))),
            Err(FormError::UnknownForm { name }) if name == "gallery"
        ));
        assert!(matches!(registry.register(FormSchema::new("about")), Err(FormError::Config { .. })));
    }
}
