use regex::Regex;
use serde_json::Value;

use super::{Schema, required_issue, type_issue};
use crate::errors::{ValidationError, ValidationIssue, ValidationResult};
use crate::types::{FieldDescriptor, FieldKind, StringFormat, ValidationRule};
use crate::validators::{is_valid_email, is_valid_url, is_valid_uuid};

/// Accepts JSON numbers, optionally bounded and restricted to integers.
#[derive(Debug, Clone, Default)]
pub struct NumberSchema {
    min: Option<f64>,
    max: Option<f64>,
    integer: bool,
}

impl NumberSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn integer() -> Self {
        Self {
            integer: true,
            ..Self::default()
        }
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }
}

impl Schema for NumberSchema {
    type Output = f64;

    fn validate(&self, raw: Option<Value>) -> ValidationResult<f64> {
        let value = match &raw {
            None => return Err(required_issue()),
            Some(Value::Number(number)) => number.as_f64(),
            Some(_) => None,
        };
        let Some(value) = value else {
            return Err(type_issue("number", &raw));
        };

        let mut issues = Vec::new();
        if self.integer && value.fract() != 0.0 {
            issues.push(ValidationIssue::new(
                "",
                "validation.integer",
                "expected integer, received float",
            ));
        }
        if let Some(min) = self.min
            && value < min
        {
            issues.push(ValidationIssue::new(
                "",
                "validation.range",
                format!("value must be at least {min}"),
            ));
        }
        if let Some(max) = self.max
            && value > max
        {
            issues.push(ValidationIssue::new(
                "",
                "validation.range",
                format!("value must be at most {max}"),
            ));
        }

        if issues.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError::new(issues))
        }
    }

    fn descriptor(&self) -> FieldDescriptor {
        let kind = if self.integer { FieldKind::Integer } else { FieldKind::Number };
        let mut descriptor = FieldDescriptor::new(kind);
        if self.integer {
            descriptor.rules.push(ValidationRule::Integer);
        }
        if self.min.is_some() || self.max.is_some() {
            descriptor.rules.push(ValidationRule::Range {
                min: self.min,
                max: self.max,
            });
        }
        descriptor
    }
}

/// Accepts JSON strings with optional length, pattern, format, and
/// enumeration rules. All failing rules are reported together.
#[derive(Debug, Clone, Default)]
pub struct StringSchema {
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<Regex>,
    format: Option<StringFormat>,
    allowed: Vec<String>,
    case_insensitive: bool,
}

impl StringSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn pattern(self, pattern: &str) -> Result<Self, regex::Error> {
        Ok(self.with_regex(Regex::new(pattern)?))
    }

    pub fn with_regex(mut self, regex: Regex) -> Self {
        self.pattern = Some(regex);
        self
    }

    pub fn format(mut self, format: StringFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn one_of<I, T>(mut self, allowed: I, case_insensitive: bool) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.allowed = allowed.into_iter().map(Into::into).collect();
        self.case_insensitive = case_insensitive;
        self
    }

    fn is_allowed(&self, value: &str) -> bool {
        if self.case_insensitive {
            let lowered = value.to_lowercase();
            self.allowed.iter().any(|choice| choice.to_lowercase() == lowered)
        } else {
            self.allowed.iter().any(|choice| choice == value)
        }
    }
}

impl Schema for StringSchema {
    type Output = String;

    fn validate(&self, raw: Option<Value>) -> ValidationResult<String> {
        let value = match raw {
            None => return Err(required_issue()),
            Some(Value::String(value)) => value,
            other => return Err(type_issue("string", &other)),
        };

        let mut issues = Vec::new();
        let len = value.chars().count();
        if let Some(min) = self.min_length
            && len < min
        {
            issues.push(ValidationIssue::new(
                "",
                "validation.length",
                format!("length must be at least {min}"),
            ));
        }
        if let Some(max) = self.max_length
            && len > max
        {
            issues.push(ValidationIssue::new(
                "",
                "validation.length",
                format!("length must be at most {max}"),
            ));
        }
        if let Some(pattern) = &self.pattern
            && !pattern.is_match(&value)
        {
            issues.push(ValidationIssue::new(
                "",
                "validation.regex",
                format!("value must match pattern {}", pattern.as_str()),
            ));
        }
        if let Some(format) = self.format {
            let valid = match format {
                StringFormat::Email => is_valid_email(&value),
                StringFormat::Url => is_valid_url(&value),
                StringFormat::Uuid => is_valid_uuid(&value),
            };
            if !valid {
                issues.push(ValidationIssue::new(
                    "",
                    format.code(),
                    format!("value must be a valid {}", format.label()),
                ));
            }
        }
        if !self.allowed.is_empty() && !self.is_allowed(&value) {
            issues.push(ValidationIssue::new(
                "",
                "validation.enum",
                format!("value must be one of: {}", self.allowed.join(", ")),
            ));
        }

        if issues.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError::new(issues))
        }
    }

    fn descriptor(&self) -> FieldDescriptor {
        let mut descriptor = FieldDescriptor::new(FieldKind::String);
        if self.min_length.is_some() || self.max_length.is_some() {
            descriptor.rules.push(ValidationRule::Length {
                min: self.min_length,
                max: self.max_length,
            });
        }
        if let Some(pattern) = &self.pattern {
            descriptor.rules.push(ValidationRule::Regex {
                pattern: pattern.as_str().to_string(),
            });
        }
        if let Some(format) = self.format {
            descriptor.rules.push(ValidationRule::Format { format });
        }
        if !self.allowed.is_empty() {
            descriptor.rules.push(ValidationRule::Enum {
                allowed: self.allowed.clone(),
                case_insensitive: self.case_insensitive,
            });
        }
        descriptor
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanSchema;

impl BooleanSchema {
    pub fn new() -> Self {
        Self
    }
}

impl Schema for BooleanSchema {
    type Output = bool;

    fn validate(&self, raw: Option<Value>) -> ValidationResult<bool> {
        match raw {
            None => Err(required_issue()),
            Some(Value::Bool(value)) => Ok(value),
            other => Err(type_issue("boolean", &other)),
        }
    }

    fn descriptor(&self) -> FieldDescriptor {
        FieldDescriptor::new(FieldKind::Boolean)
    }
}
