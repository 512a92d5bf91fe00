//! Error types for forms.

use std::collections::HashMap;
use thiserror::Error;

/// Form-specific errors.
#[derive(Debug, Error)]
pub enum FormError {
    /// A field declares a type that has no element dispatch.
    #[error("invalid element type: {kind} (field {field})")]
    UnsupportedType { field: String, kind: String },

    /// A select field has a missing or empty option source.
    #[error("invalid optionSource for {field}")]
    InvalidOptionSource { field: String },

    /// A select field names an option source the form type does not provide.
    #[error("unknown option source `{name}` for field {field}")]
    UnknownOptionSource { field: String, name: String },

    /// No element template is registered for a field type.
    #[error("no element template registered for type {0}")]
    MissingTemplate(String),

    /// A rule name resolves neither to an instance rule nor to the rule set.
    #[error("unknown validation rule `{rule}` on field {field}")]
    UnknownRule { field: String, rule: String },

    /// A rule was given parameters it cannot use.
    #[error("invalid parameters for rule `{rule}`: {message}")]
    InvalidRuleParam { rule: String, message: String },

    /// A rule was declared as an empty list.
    #[error("empty rule specification on field {0}")]
    EmptyRule(String),

    /// A `regex` rule carried a pattern that does not compile.
    #[error("invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    /// Form document or message catalog could not be parsed.
    #[error("failed to parse form data: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FormError {
    /// Returns whether the error is a mistake in the form declaration rather
    /// than a problem with the rules engine or its input.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedType { .. }
                | Self::InvalidOptionSource { .. }
                | Self::UnknownOptionSource { .. }
                | Self::MissingTemplate(_)
        )
    }
}

/// Validation errors keyed by field name, one message per failing field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    /// Errors keyed by field name.
    pub errors: HashMap<String, String>,
}

impl ValidationErrors {
    /// Creates a new empty ValidationErrors.
    pub fn new() -> Self {
        Self {
            errors: HashMap::new(),
        }
    }

    /// Adds an error for a field. The first message recorded for a field wins.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    /// Returns whether there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns the error for a specific field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Returns whether a field has an error.
    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Iterates over `(field, message)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    /// Removes every error.
    pub fn clear(&mut self) {
        self.errors.clear();
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut fields: Vec<_> = self.errors.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));
        for (field, message) in fields {
            writeln!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;
