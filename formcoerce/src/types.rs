use std::fmt;

use serde::{Deserialize, Serialize};

/// Value kind a field schema accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Number,
    Integer,
    String,
    Boolean,
    Form,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FieldKind::Number => "number",
            FieldKind::Integer => "integer",
            FieldKind::String => "string",
            FieldKind::Boolean => "boolean",
            FieldKind::Form => "form",
        };
        f.write_str(label)
    }
}

/// Normalization applied to raw input before the schema sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionKind {
    #[default]
    None,
    Numeric,
    EmptyAsAbsent,
}

impl fmt::Display for CoercionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CoercionKind::None => "none",
            CoercionKind::Numeric => "numeric",
            CoercionKind::EmptyAsAbsent => "empty_as_absent",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringFormat {
    Email,
    Url,
    Uuid,
}

impl StringFormat {
    pub fn code(self) -> &'static str {
        match self {
            StringFormat::Email => "validation.email",
            StringFormat::Url => "validation.url",
            StringFormat::Uuid => "validation.uuid",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StringFormat::Email => "email",
            StringFormat::Url => "url",
            StringFormat::Uuid => "uuid",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ValidationRule {
    Range { min: Option<f64>, max: Option<f64> },
    Integer,
    Length { min: Option<usize>, max: Option<usize> },
    Regex { pattern: String },
    Format { format: StringFormat },
    Enum { allowed: Vec<String>, case_insensitive: bool },
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationRule::Range { min, max } => write!(f, "range({})", bounds(min, max)),
            ValidationRule::Integer => f.write_str("integer"),
            ValidationRule::Length { min, max } => write!(f, "length({})", bounds(min, max)),
            ValidationRule::Regex { pattern } => write!(f, "regex = \"{pattern}\""),
            ValidationRule::Format { format } => f.write_str(format.label()),
            ValidationRule::Enum {
                allowed,
                case_insensitive,
            } => {
                write!(f, "enum[{}]", allowed.join(", "))?;
                if *case_insensitive {
                    f.write_str(" (case insensitive)")?;
                }
                Ok(())
            }
        }
    }
}

fn bounds<T: fmt::Display>(min: &Option<T>, max: &Option<T>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("min = {min}, max = {max}"),
        (Some(min), None) => format!("min = {min}"),
        (None, Some(max)) => format!("max = {max}"),
        (None, None) => String::new(),
    }
}

/// Shape of a schema, used for listings and diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    pub coercion: CoercionKind,
    pub rules: Vec<ValidationRule>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDescriptor>,
}

impl FieldDescriptor {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            name: String::new(),
            kind,
            required: true,
            coercion: CoercionKind::None,
            rules: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
