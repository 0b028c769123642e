use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Top-level error type returned by formcoerce.
#[derive(Debug, Error)]
pub enum FormError {
    /// Validation failed for one or more fields.
    #[error("validation failed")]
    Validation(#[from] ValidationError),

    /// A form definition could not be turned into a schema.
    #[error("invalid form configuration: {message}")]
    Config { message: String },

    /// No form is registered under the requested name.
    #[error("unknown form '{name}'")]
    UnknownForm { name: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl FormError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Collection of validation issues produced by a schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation errors: ")?;
        for (index, issue) in self.issues.iter().enumerate() {
            if index > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn new<I>(issues: I) -> Self
    where
        I: IntoIterator<Item = ValidationIssue>,
    {
        Self {
            issues: issues.into_iter().collect(),
        }
    }

    /// Convenience helper for constructing a single-field validation error.
    pub fn single(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new([ValidationIssue::new(field, code, message)])
    }

    /// Single issue reported at the position of the value being validated.
    ///
    /// Leaf schemas do not know which field they belong to; the enclosing form
    /// attaches the path with [`ValidationError::at`].
    pub fn here(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::single("", code, message)
    }

    /// Prefixes every issue path with `field`.
    pub fn at(mut self, field: &str) -> Self {
        for issue in &mut self.issues {
            issue.field = if issue.field.is_empty() {
                field.to_string()
            } else {
                format!("{field}.{}", issue.field)
            };
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Codes of all issues, in report order.
    pub fn codes(&self) -> Vec<&str> {
        self.issues.iter().map(|issue| issue.code.as_str()).collect()
    }
}

/// Detailed validation failure for a single field or logical path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            write!(f, "{} ({})", self.message, self.code)
        } else {
            write!(f, "{}: {} ({})", self.field, self.message, self.code)
        }
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_prefixes_nested_paths() {
        let err = ValidationError::new([
            ValidationIssue::new("", "validation.required", "field is required"),
            ValidationIssue::new("zip", "validation.length", "length must be at least 5"),
        ])
        .at("address");
        assert_eq!(err.issues[0].field, "address");
        assert_eq!(err.issues[1].field, "address.zip");
    }

    #[test]
    fn display_lists_every_issue() {
        let err = ValidationError::new([
            ValidationIssue::new("title", "validation.length", "length must be at least 3"),
            ValidationIssue::new("", "validation.type", "expected object, received string"),
        ]);
        assert_eq!(
            err.to_string(),
            "validation errors: title: length must be at least 3 (validation.length); \
             expected object, received string (validation.type)"
        );
    }
}
