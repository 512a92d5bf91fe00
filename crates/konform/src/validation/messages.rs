//! Error message catalogs.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::Result;

/// Namespace whose entries act as rule-level defaults for every form.
pub const DEFAULT_NAMESPACE: &str = "validation";

/// Messages keyed by namespace, then field, then rule name.
///
/// A field may carry a `default` entry used for any rule without its own
/// message, or a single string used for all of its rules. Templates may
/// reference `:field`, `:value` and `:param1`..`:paramN`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct MessageCatalog {
    namespaces: HashMap<String, HashMap<String, MessageEntry>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum MessageEntry {
    Field(HashMap<String, String>),
    Rule(String),
}

impl MessageCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a catalog from JSON.
    ///
    /// ```json
    /// {
    ///   "konform/contact": { "email": { "email": "Please check :field" } },
    ///   "validation": { "not_empty": ":field is mandatory" }
    /// }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`crate::FormError::Parse`] if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the message for a rule on a field within a namespace.
    pub fn insert(
        &mut self,
        namespace: impl Into<String>,
        field: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> &mut Self {
        let (rule, message) = (rule.into(), message.into());
        let entry = self
            .namespaces
            .entry(namespace.into())
            .or_default()
            .entry(field.into())
            .or_insert_with(|| MessageEntry::Field(HashMap::new()));
        match *entry {
            MessageEntry::Field(ref mut rules) => {
                rules.insert(rule, message);
            }
            MessageEntry::Rule(_) => {
                *entry = MessageEntry::Field(HashMap::from([(rule, message)]));
            }
        }
        self
    }

    /// Sets the default message of a rule for every namespace.
    pub fn insert_default(&mut self, rule: impl Into<String>, message: impl Into<String>) -> &mut Self {
        self.namespaces
            .entry(DEFAULT_NAMESPACE.to_string())
            .or_default()
            .insert(rule.into(), MessageEntry::Rule(message.into()));
        self
    }

    /// Merges another catalog into this one; entries of `other` win.
    pub fn merge(&mut self, other: Self) {
        for (namespace, entries) in other.namespaces {
            self.namespaces.entry(namespace).or_default().extend(entries);
        }
    }

    /// Returns the unformatted message for a failed rule.
    ///
    /// Lookup order: `namespace.field.rule`, `namespace.field.default`, the
    /// catalog's `validation.rule`, the built-in default, then the key path
    /// `namespace.field.rule` itself.
    pub fn template(&self, namespace: &str, field: &str, rule: &str) -> String {
        let field_entry = self
            .namespaces
            .get(namespace)
            .and_then(|fields| fields.get(field));
        match field_entry {
            Some(MessageEntry::Field(rules)) => {
                if let Some(message) = rules.get(rule).or_else(|| rules.get("default")) {
                    return message.clone();
                }
            }
            Some(MessageEntry::Rule(message)) => return message.clone(),
            None => {}
        }

        let catalog_default = self
            .namespaces
            .get(DEFAULT_NAMESPACE)
            .and_then(|rules| rules.get(rule));
        if let Some(MessageEntry::Rule(message)) = catalog_default {
            return message.clone();
        }

        builtin_message(rule).map_or_else(|| format!("{namespace}.{field}.{rule}"), str::to_string)
    }

    /// Returns the formatted message for a failed rule.
    pub fn message(
        &self,
        namespace: &str,
        field: &str,
        rule: &str,
        label: &str,
        value: &str,
        params: &[String],
    ) -> String {
        interpolate(&self.template(namespace, field, rule), label, value, params)
    }
}

/// Built-in message for a rule name.
pub fn builtin_message(rule: &str) -> Option<&'static str> {
    let message = match rule {
        "not_empty" => ":field must not be empty",
        "min_length" => ":field must be at least :param1 characters long",
        "max_length" => ":field must not exceed :param1 characters long",
        "exact_length" => ":field must be exactly :param1 characters long",
        "email" => ":field must be an email address",
        "url" => ":field must be a url",
        "regex" => ":field does not match the required format",
        "digit" => ":field must be a digit",
        "numeric" => ":field must be numeric",
        "decimal" => ":field must be a decimal with :param1 places",
        "alpha" => ":field must contain only letters",
        "alpha_numeric" => ":field must contain only letters and numbers",
        "alpha_dash" => ":field must contain only numbers, letters and dashes",
        "range" => ":field must be within the range of :param1 to :param2",
        "matches" => ":field must be the same as :param1",
        "equals" => ":field must equal :param1",
        _ => return None,
    };
    Some(message)
}

fn interpolate(template: &str, label: &str, value: &str, params: &[String]) -> String {
    // Highest index first so `:param1` does not clobber `:param10`.
    let mut message = template.to_string();
    for (i, param) in params.iter().enumerate().rev() {
        message = message.replace(&format!(":param{}", i + 1), param);
    }
    message.replace(":field", label).replace(":value", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_builtin_fallback() {
        let catalog = MessageCatalog::new();
        assert_eq!(
            catalog.message("konform/contact", "name", "not_empty", "Name", "", &[]),
            "Name must not be empty"
        );
        assert_eq!(
            catalog.message("konform/contact", "age", "range", "Age", "7", &params(&["18", "99"])),
            "Age must be within the range of 18 to 99"
        );
    }

    #[test]
    fn test_unknown_rule_falls_back_to_key_path() {
        let catalog = MessageCatalog::new();
        assert_eq!(
            catalog.template("konform/contact", "name", "is_unique"),
            "konform/contact.name.is_unique"
        );
    }

    #[test]
    fn test_lookup_order() {
        let catalog = MessageCatalog::from_json(
            r#"{
                "konform/contact": {
                    "email": {"email": "Check your :field", "default": "Bad :field"}
                },
                "validation": {"not_empty": ":field is mandatory"}
            }"#,
        )
        .unwrap();

        assert_eq!(catalog.template("konform/contact", "email", "email"), "Check your :field");
        assert_eq!(catalog.template("konform/contact", "email", "max_length"), "Bad :field");
        assert_eq!(catalog.template("konform/contact", "name", "not_empty"), ":field is mandatory");
        assert_eq!(catalog.template("other/form", "email", "email"), ":field must be an email address");
    }

    #[test]
    fn test_insert_and_merge() {
        let mut catalog = MessageCatalog::new();
        catalog.insert("ns", "name", "not_empty", "Who are you?");
        let mut other = MessageCatalog::new();
        other.insert_default("email", "Not an address: :value");
        catalog.merge(other);

        assert_eq!(catalog.template("ns", "name", "not_empty"), "Who are you?");
        assert_eq!(
            catalog.message("ns", "email", "email", "Email", "nope", &[]),
            "Not an address: nope"
        );
    }

    #[test]
    fn test_interpolate_many_params() {
        let values: Vec<String> = (1..=10).map(|i| format!("p{i}")).collect();
        assert_eq!(interpolate(":param10 :param1", "", "", &values), "p10 p1");
    }
}
