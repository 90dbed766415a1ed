//! Validation rules for metadata fields and the form validator

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::field_type::FieldType;
use super::types::FormFields;

/// Character class a coded field must consist of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// `^\d+$`
    Numeric,
    /// Letters and digits only, case-insensitive
    Alphanumeric,
}

impl Pattern {
    pub fn matches(&self, value: &str) -> bool {
        !value.is_empty()
            && match self {
                Pattern::Numeric => value.chars().all(|c| c.is_ascii_digit()),
                Pattern::Alphanumeric => value.chars().all(|c| c.is_ascii_alphanumeric()),
            }
    }
}

/// Validation rules for a field
/// Copy trait for efficient passing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationRules {
    pub required: bool,
    pub min_length: Option<usize>,
    pub pattern: Option<Pattern>,
    /// Replaces the default "is required" wording
    pub required_error: Option<&'static str>,
}

impl ValidationRules {
    /// Create empty validation rules (all optional, no constraints)
    pub const fn none() -> Self {
        Self {
            required: false,
            min_length: None,
            pattern: None,
            required_error: None,
        }
    }

    /// Create validation rules for required field
    pub const fn required() -> Self {
        Self {
            required: true,
            ..Self::none()
        }
    }

    /// Required reference chosen from a dropdown
    pub const fn selection() -> Self {
        Self {
            required: true,
            required_error: Some("must be selected"),
            ..Self::none()
        }
    }

    pub const fn numeric_code() -> Self {
        Self {
            required: true,
            min_length: Some(2),
            pattern: Some(Pattern::Numeric),
            required_error: None,
        }
    }

    pub const fn alphanumeric_code() -> Self {
        Self {
            required: true,
            min_length: Some(2),
            pattern: Some(Pattern::Alphanumeric),
            required_error: None,
        }
    }

    /// Check if field is required
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Validate a string value against the rules
    pub fn validate_string(&self, value: &str, field_label: &str) -> Result<(), String> {
        if self.required && value.trim().is_empty() {
            return Err(format!(
                "{} {}",
                field_label,
                self.required_error.unwrap_or("is required")
            ));
        }

        let min = self.min_length.unwrap_or(0);
        match self.pattern {
            Some(Pattern::Numeric) if !Pattern::Numeric.matches(value) || value.len() < min => {
                Err(format!(
                    "{} must be numeric and at least {} digits",
                    field_label, min
                ))
            }
            Some(Pattern::Alphanumeric)
                if !Pattern::Alphanumeric.matches(value) || value.len() < min =>
            {
                Err(format!(
                    "{} must be alphanumeric and at least {} characters",
                    field_label, min
                ))
            }
            None if value.trim().len() < min => Err(format!(
                "{} must contain at least {} characters",
                field_label, min
            )),
            _ => Ok(()),
        }
    }
}

/// Field-keyed validation messages. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Validate a form against its field table. Pure, never fails.
pub fn validate<T: FormFields>(form: &T) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for field in T::field_metadata() {
        if matches!(field.field_type, FieldType::Flag) {
            continue;
        }
        let value = form
            .field_value(field.name)
            .and_then(|v| v.as_text())
            .unwrap_or("");
        if let Err(message) = field.validation.validate_string(value, field.label()) {
            errors.insert(field.name, message);
        }
    }
    errors
}
