//! Ordered field registry.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::fields::FieldDefinition;

/// Field definitions keyed by name, in first-insertion order.
///
/// Deserializes from a JSON object in document order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct FieldRegistry {
    fields: IndexMap<String, FieldDefinition>,
}

impl FieldRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a field.
    ///
    /// A new name is appended; replacing an existing name keeps its position.
    pub fn add_field(&mut self, name: impl Into<String>, definition: FieldDefinition) -> &mut Self {
        self.fields.insert(name.into(), definition);
        self
    }

    /// Returns the definition of a field.
    pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.get(name)
    }

    /// Returns whether a field is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Iterates over fields in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDefinition)> {
        self.fields.iter().map(|(n, d)| (n.as_str(), d))
    }

    /// Iterates over field names in registry order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{self, FieldKind};

    #[test]
    fn test_insertion_order() {
        let mut registry = FieldRegistry::new();
        registry
            .add_field("name", fields::text("Name"))
            .add_field("email", fields::text("Email"))
            .add_field("send", fields::submit("Send"));

        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, ["name", "email", "send"]);
    }

    #[test]
    fn test_readd_keeps_position() {
        let mut registry = FieldRegistry::new();
        registry
            .add_field("name", fields::text("Name"))
            .add_field("email", fields::text("Email"))
            .add_field("name", fields::textarea("Full name", 60, 2));

        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, ["name", "email"]);
        assert_eq!(registry.get("name").unwrap().kind, FieldKind::Textarea);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_deserialize_preserves_order() {
        let registry: FieldRegistry = serde_json::from_str(
            r#"{
                "subject": {"rules": ["not_empty"]},
                "body": {"type": "textarea"},
                "go": {"type": "submit", "label": "Go"}
            }"#,
        )
        .unwrap();

        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, ["subject", "body", "go"]);
        assert!(registry.contains("body"));
        assert!(!registry.contains("missing"));
    }

    #[test]
    fn test_deserialize_repeated_key_keeps_position() {
        let registry: FieldRegistry = serde_json::from_str(
            r#"{"a": {}, "b": {}, "a": {"type": "password"}}"#,
        )
        .unwrap();

        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(registry.get("a").unwrap().kind, FieldKind::Password);
    }
}
