//! Field definitions and the helpers that build them.

mod select;
mod submit;
mod text;

pub use select::select;
pub use submit::submit;
pub use text::{password, text, textarea};

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

use crate::data::value_text;

/// Input type of a field.
///
/// Unknown names are kept as [`FieldKind::Other`] so that a form can be
/// declared with them; rendering such a field fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum FieldKind {
    #[default]
    Text,
    Password,
    Textarea,
    Select,
    Submit,
    Other(String),
}

impl FieldKind {
    /// Returns the type name used to look up element templates.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Password => "password",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Submit => "submit",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for FieldKind {
    fn from(name: &str) -> Self {
        match name {
            "text" => Self::Text,
            "password" => Self::Password,
            "textarea" => Self::Textarea,
            "select" => Self::Select,
            "submit" => Self::Submit,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for FieldKind {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule as declared on a field.
///
/// In JSON this is either `"not_empty"` or `["max_length", 50]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RuleSpec {
    /// A rule identifier without parameters.
    Name(String),
    /// Identifier followed by its parameters.
    List(Vec<Value>),
}

/// A normalized rule: identifier plus ordered parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Rule identifier.
    pub id: String,
    /// Parameters in declaration order.
    pub params: Vec<String>,
}

impl RuleSpec {
    /// Creates a rule without parameters.
    pub fn name(id: impl Into<String>) -> Self {
        Self::Name(id.into())
    }

    /// Creates a rule with parameters.
    pub fn with_params<I, P>(id: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let mut list = vec![Value::String(id.into())];
        list.extend(params.into_iter().map(|p| Value::String(p.into())));
        Self::List(list)
    }

    /// Splits the rule into identifier and parameters.
    ///
    /// Returns `None` for an empty list.
    pub fn normalize(&self) -> Option<Rule> {
        match self {
            Self::Name(id) => Some(Rule {
                id: id.clone(),
                params: Vec::new(),
            }),
            Self::List(items) => {
                let (first, rest) = items.split_first()?;
                Some(Rule {
                    id: value_text(first).unwrap_or_default(),
                    params: rest
                        .iter()
                        .map(|p| value_text(p).unwrap_or_default())
                        .collect(),
                })
            }
        }
    }
}

impl From<&str> for RuleSpec {
    fn from(id: &str) -> Self {
        Self::name(id)
    }
}

impl From<String> for RuleSpec {
    fn from(id: String) -> Self {
        Self::Name(id)
    }
}

/// Definition of a form field. The field name is its key in the registry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Display label; the field name is used when absent.
    pub label: Option<String>,
    /// Input type.
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Validation rules in evaluation order.
    pub rules: Vec<RuleSpec>,
    /// Whether the field is marked as required in the markup.
    pub required: bool,
    /// CSS classes.
    pub class: Option<String>,
    /// Maximum length for text and password inputs.
    pub maxlength: Option<u32>,
    /// Columns for textareas.
    pub cols: Option<u32>,
    /// Rows for textareas.
    pub rows: Option<u32>,
    /// Name of the option source a select field draws its options from.
    pub option_source: Option<String>,
    /// Key of the option value in each option item.
    pub option_value: Option<String>,
    /// Key of the option label in each option item.
    pub option_label: Option<String>,
    /// Placeholder option for selects.
    pub placeholder: Option<String>,
}

impl FieldDefinition {
    /// Creates a definition of the given type.
    pub fn new(kind: impl Into<FieldKind>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Returns the label, falling back to the field name.
    pub fn label_or<'a>(&'a self, name: &'a str) -> &'a str {
        self.label.as_deref().unwrap_or(name)
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Adds a rule.
    #[must_use]
    pub fn rule(mut self, rule: impl Into<RuleSpec>) -> Self {
        self.rules.push(rule.into());
        self
    }

    /// Adds a rule with parameters.
    #[must_use]
    pub fn rule_with<I, P>(mut self, id: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.rules.push(RuleSpec::with_params(id, params));
        self
    }

    /// Marks the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets CSS classes.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Sets the maximum length.
    #[must_use]
    pub fn maxlength(mut self, maxlength: u32) -> Self {
        self.maxlength = Some(maxlength);
        self
    }

    /// Sets textarea dimensions.
    #[must_use]
    pub fn size(mut self, cols: u32, rows: u32) -> Self {
        self.cols = Some(cols);
        self.rows = Some(rows);
        self
    }

    /// Sets the option source.
    #[must_use]
    pub fn option_source(mut self, name: impl Into<String>) -> Self {
        self.option_source = Some(name.into());
        self
    }

    /// Sets the keys read from each option item.
    #[must_use]
    pub fn option_keys(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.option_value = Some(value.into());
        self.option_label = Some(label.into());
        self
    }

    /// Sets the placeholder.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_rule_has_no_params() {
        let rule = RuleSpec::name("not_empty").normalize().unwrap();
        assert_eq!(rule.id, "not_empty");
        assert!(rule.params.is_empty());
    }

    #[test]
    fn test_list_rule_splits_params_in_order() {
        let spec: RuleSpec = serde_json::from_value(json!(["range", 1, "10"])).unwrap();
        let rule = spec.normalize().unwrap();
        assert_eq!(rule.id, "range");
        assert_eq!(rule.params, vec!["1", "10"]);
    }

    #[test]
    fn test_empty_list_rule() {
        assert_eq!(RuleSpec::List(Vec::new()).normalize(), None);
    }

    #[test]
    fn test_field_kind_names() {
        assert_eq!(FieldKind::from("textarea"), FieldKind::Textarea);
        assert_eq!(
            FieldKind::from("essay"),
            FieldKind::Other("essay".to_string())
        );
        assert_eq!(FieldKind::Other("essay".into()).as_str(), "essay");
        assert_eq!(FieldKind::default(), FieldKind::Text);
    }

    #[test]
    fn test_definition_from_json() {
        let def: FieldDefinition = serde_json::from_value(json!({
            "label": "Colour",
            "type": "select",
            "optionSource": "colors",
            "optionLabel": "title",
            "rules": ["not_empty", ["max_length", 3]],
        }))
        .unwrap();

        assert_eq!(def.kind, FieldKind::Select);
        assert_eq!(def.option_source.as_deref(), Some("colors"));
        assert_eq!(def.option_label.as_deref(), Some("title"));
        assert_eq!(def.rules.len(), 2);
        assert!(!def.required);
    }

    #[test]
    fn test_label_fallback() {
        let def = FieldDefinition::new("text");
        assert_eq!(def.label_or("email"), "email");
        assert_eq!(def.label("E-mail").label_or("email"), "E-mail");
    }
}
