//! Form definitions loaded from TOML.
//!
//! ```toml
//! [[forms]]
//! name = "gallery"
//!
//! [[forms.fields]]
//! name = "title"
//! kind = "string"
//! min_length = 1
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::coerce::{EmptyStringNormalizer, NumericCoercer};
use crate::errors::FormError;
use crate::schema::{BooleanSchema, FieldSchema, FormSchema, IntoFieldValue, NumberSchema, Schema, StringSchema};
use crate::types::{CoercionKind, FieldKind, StringFormat};

/// Default file name looked up by the CLI.
pub const CONFIG_FILE_NAME: &str = "forms.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormsConfig {
    #[serde(default)]
    pub forms: Vec<FormDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormDefinition {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDefinition {
    pub name: String,
    pub kind: FieldKind,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default)]
    pub coerce: CoerceMode,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub min_length: Option<usize>,
    #[serde(default)]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub format: Option<StringFormat>,
    #[serde(default)]
    pub allowed: Vec<String>,
    #[serde(default)]
    pub case_insensitive: bool,
}

fn default_required() -> bool {
    true
}

/// Coercion requested for a field; `auto` picks one from the field kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoerceMode {
    #[default]
    Auto,
    None,
    Numeric,
    EmptyAsAbsent,
}

impl CoerceMode {
    pub fn resolve(self, kind: FieldKind) -> CoercionKind {
        match self {
            CoerceMode::Auto => match kind {
                FieldKind::Number | FieldKind::Integer => CoercionKind::Numeric,
                FieldKind::String => CoercionKind::EmptyAsAbsent,
                FieldKind::Boolean | FieldKind::Form => CoercionKind::None,
            },
            CoerceMode::None => CoercionKind::None,
            CoerceMode::Numeric => CoercionKind::Numeric,
            CoerceMode::EmptyAsAbsent => CoercionKind::EmptyAsAbsent,
        }
    }
}

impl FormsConfig {
    pub fn load(path: &Path) -> Result<Self, FormError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, FormError> {
        Ok(toml::from_str(content)?)
    }

    pub fn find(&self, name: &str) -> Option<&FormDefinition> {
        self.forms.iter().find(|form| form.name == name)
    }

    /// Builds every form, failing on the first invalid definition.
    pub fn build_forms(&self) -> Result<Vec<FormSchema>, FormError> {
        let mut seen = HashSet::new();
        let mut built = Vec::with_capacity(self.forms.len());
        for form in &self.forms {
            if !seen.insert(form.name.as_str()) {
                return Err(FormError::config(format!("form '{}' is defined more than once", form.name)));
            }
            built.push(form.build()?);
        }
        Ok(built)
    }
}

impl FormDefinition {
    pub fn build(&self) -> Result<FormSchema, FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::config("form name must not be empty"));
        }
        let mut form = FormSchema::new(self.name.clone());
        if let Some(description) = &self.description {
            form = form.describe(description.clone());
        }
        for field in &self.fields {
            if form.has_field(&field.name) {
                return Err(FormError::config(format!(
                    "form '{}' defines field '{}' more than once",
                    self.name, field.name
                )));
            }
            let schema = field
                .build()
                .map_err(|message| FormError::config(format!("form '{}', field '{}': {message}", self.name, field.name)))?;
            form.push_field(field.name.clone(), schema);
        }
        Ok(form)
    }
}

impl FieldDefinition {
    /// Builds the field schema, or a description of what is wrong with it.
    pub fn build(&self) -> Result<Box<dyn FieldSchema>, String> {
        if self.name.trim().is_empty() {
            return Err("field name must not be empty".to_string());
        }
        self.check_options()?;
        let coercion = self.coerce.resolve(self.kind);

        match self.kind {
            FieldKind::Number | FieldKind::Integer => {
                let mut schema = if self.kind == FieldKind::Integer {
                    NumberSchema::integer()
                } else {
                    NumberSchema::new()
                };
                if let Some(min) = self.min {
                    schema = schema.min(min);
                }
                if let Some(max) = self.max {
                    schema = schema.max(max);
                }
                Ok(finish(schema, self.required, coercion))
            }
            FieldKind::String => {
                let mut schema = StringSchema::new();
                if let Some(min) = self.min_length {
                    schema = schema.min_length(min);
                }
                if let Some(max) = self.max_length {
                    schema = schema.max_length(max);
                }
                if let Some(pattern) = &self.pattern {
                    schema = schema
                        .pattern(pattern)
                        .map_err(|err| format!("invalid pattern: {err}"))?;
                }
                if let Some(format) = self.format {
                    schema = schema.format(format);
                }
                if !self.allowed.is_empty() {
                    schema = schema.one_of(self.allowed.iter().cloned(), self.case_insensitive);
                }
                Ok(finish(schema, self.required, coercion))
            }
            FieldKind::Boolean => Ok(finish(BooleanSchema::new(), self.required, coercion)),
            FieldKind::Form => Err("nested forms cannot be declared in configuration".to_string()),
        }
    }

    fn check_options(&self) -> Result<(), String> {
        let numeric = matches!(self.kind, FieldKind::Number | FieldKind::Integer);
        let textual = self.kind == FieldKind::String;

        if !numeric && (self.min.is_some() || self.max.is_some()) {
            return Err(format!("`min`/`max` do not apply to {} fields", self.kind));
        }
        if !textual
            && (self.min_length.is_some()
                || self.max_length.is_some()
                || self.pattern.is_some()
                || self.format.is_some()
                || !self.allowed.is_empty())
        {
            return Err(format!("string rules do not apply to {} fields", self.kind));
        }
        for (option, bound) in [("min", self.min), ("max", self.max)] {
            if let Some(bound) = bound
                && !bound.is_finite()
            {
                return Err(format!("`{option}` must be a finite number, got {bound}"));
            }
        }
        if let (Some(min), Some(max)) = (self.min, self.max)
            && min > max
        {
            return Err(format!("`min` ({min}) is greater than `max` ({max})"));
        }
        if let (Some(min), Some(max)) = (self.min_length, self.max_length)
            && min > max
        {
            return Err(format!("`min_length` ({min}) is greater than `max_length` ({max})"));
        }
        Ok(())
    }
}

fn finish<S>(schema: S, required: bool, coercion: CoercionKind) -> Box<dyn FieldSchema>
where
    S: Schema + 'static,
    S::Output: IntoFieldValue + 'static,
{
    if required {
        with_coercion(schema, coercion)
    } else {
        with_coercion(schema.optional(), coercion)
    }
}

fn with_coercion<S>(schema: S, coercion: CoercionKind) -> Box<dyn FieldSchema>
where
    S: Schema + 'static,
    S::Output: IntoFieldValue,
{
    match coercion {
        CoercionKind::None => Box::new(schema),
        CoercionKind::Numeric => Box::new(NumericCoercer::wrap(schema)),
        CoercionKind::EmptyAsAbsent => Box::new(EmptyStringNormalizer::wrap(schema)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BLOG: &str = r#"
[[forms]]
name = "blog"
description = "Blog post editor"

[[forms.fields]]
name = "title"
kind = "string"
min_length = 3
max_length = 120

[[forms.fields]]
name = "subtitle"
kind = "string"
required = false

[[forms.fields]]
name = "reading_minutes"
kind = "integer"
required = false
min = 1

[[forms.fields]]
name = "published"
kind = "boolean"
required = false
"#;

    #[test]
    fn parses_and_builds_forms() {
        let config = FormsConfig::from_toml_str(BLOG).unwrap();
        assert_eq!(config.forms.len(), 1);
        let definition = config.find("blog").unwrap();
        assert!(definition.fields[0].required);
        assert_eq!(definition.fields[2].coerce, CoerceMode::Auto);

        let forms = config.build_forms().unwrap();
        let output = forms[0]
            .validate(Some(json!({
                "title": "Hello",
                "subtitle": "  ",
                "reading_minutes": "4",
            })))
            .unwrap();
        assert_eq!(serde_json::Value::Object(output), json!({ "title": "Hello", "reading_minutes": 4 }));
    }

    #[test]
    fn auto_coercion_follows_kind() {
        assert_eq!(CoerceMode::Auto.resolve(FieldKind::Integer), CoercionKind::Numeric);
        assert_eq!(CoerceMode::Auto.resolve(FieldKind::Number), CoercionKind::Numeric);
        assert_eq!(CoerceMode::Auto.resolve(FieldKind::String), CoercionKind::EmptyAsAbsent);
        assert_eq!(CoerceMode::Auto.resolve(FieldKind::Boolean), CoercionKind::None);
        assert_eq!(CoerceMode::None.resolve(FieldKind::Number), CoercionKind::None);
    }

    #[test]
    fn explicit_none_leaves_strings_for_the_schema() {
        let config = FormsConfig::from_toml_str(
            r#"
[[forms]]
name = "raw"

[[forms.fields]]
name = "count"
kind = "number"
coerce = "none"
"#,
        )
        .unwrap();
        let forms = config.build_forms().unwrap();
        let err = forms[0].validate(Some(json!({ "count": "3" }))).unwrap_err();
        assert_eq!(err.codes(), vec!["validation.type"]);
    }

    #[test]
    fn rejects_invalid_definitions() {
        let cases = [
            (
                "[[forms]]\nname = \"a\"\n[[forms.fields]]\nname = \"x\"\nkind = \"string\"\npattern = \"(\"\n",
                "invalid pattern",
            ),
            (
                "[[forms]]\nname = \"a\"\n[[forms.fields]]\nname = \"x\"\nkind = \"string\"\nmin = 1.0\n",
                "do not apply to string fields",
            ),
            (
                "[[forms]]\nname = \"a\"\n[[forms.fields]]\nname = \"x\"\nkind = \"number\"\nmin = 5.0\nmax = 1.0\n",
                "greater than `max`",
            ),
            (
                "[[forms]]\nname = \"a\"\n[[forms.fields]]\nname = \"x\"\nkind = \"integer\"\nmin = nan\n",
                "`min` must be a finite number",
            ),
            (
                "[[forms]]\nname = \"a\"\n[[forms.fields]]\nname = \"x\"\nkind = \"number\"\nmax = -inf\n",
                "`max` must be a finite number",
            ),
            (
                "[[forms]]\nname = \"a\"\n[[forms.fields]]\nname = \"x\"\nkind = \"boolean\"\n[[forms.fields]]\nname = \"x\"\nkind = \"boolean\"\n",
                "more than once",
            ),
            ("[[forms]]\nname = \"a\"\n[[forms]]\nname = \"a\"\n", "defined more than once"),
        ];
        for (toml, expected) in cases {
            let config = FormsConfig::from_toml_str(toml).unwrap();
            let err = config.build_forms().unwrap_err();
            assert!(
                matches!(&err, FormError::Config { message } if message.contains(expected)),
                "{toml}: {err}"
            );
        }
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = FormsConfig::from_toml_str("[[forms]]\nname = \"a\"\ncolour = \"red\"\n").unwrap_err();
        assert!(matches!(err, FormError::Toml(_)));
    }
}
