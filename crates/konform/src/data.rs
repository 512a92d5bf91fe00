//! Form data binding.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::Result;
use crate::registry::FieldRegistry;

/// Current values of a form, keyed by exactly the registered field names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    values: HashMap<String, Option<String>>,
}

impl FormData {
    /// Creates data for the registry with every value absent.
    pub fn empty(registry: &FieldRegistry) -> Self {
        Self {
            values: registry.names().map(|n| (n.to_string(), None)).collect(),
        }
    }

    /// Binds input to the registry.
    ///
    /// Keys not in the registry are dropped; registered names missing from
    /// the input are left absent.
    pub fn bind<I, K, V>(registry: &FieldRegistry, input: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut data = Self::empty(registry);
        for (key, value) in input {
            let key: String = key.into();
            if let Some(slot) = data.values.get_mut(&key) {
                *slot = Some(value.into());
            }
        }
        data
    }

    /// Binds a JSON object to the registry.
    ///
    /// Scalars are stored in their textual form and `null` as absent.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FormError::Parse`] when `input` is not an object.
    pub fn bind_json(registry: &FieldRegistry, input: &Value) -> Result<Self> {
        let object: serde_json::Map<String, Value> = serde_json::from_value(input.clone())?;
        let mut data = Self::empty(registry);
        for (key, value) in &object {
            if let Some(slot) = data.values.get_mut(key) {
                *slot = value_text(value);
            }
        }
        Ok(data)
    }

    /// Returns the value of a field, if present and set.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Option::as_deref)
    }

    /// Returns whether `name` is one of the bound keys.
    pub fn contains_key(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterates over the bound keys in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Returns the number of bound keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether no keys are bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Textual form of a JSON scalar; `null` has none.
pub(crate) fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;
    use serde_json::json;

    fn registry() -> FieldRegistry {
        let mut registry = FieldRegistry::new();
        registry
            .add_field("name", fields::text("Name"))
            .add_field("age", fields::text("Age"));
        registry
    }

    #[test]
    fn test_bind_filters_extra_keys() {
        let data = FormData::bind(&registry(), [("name", "Alice"), ("extra", "ignored")]);
        assert_eq!(data.len(), 2);
        assert_eq!(data.get("name"), Some("Alice"));
        assert!(data.contains_key("age"));
        assert_eq!(data.get("age"), None);
        assert!(!data.contains_key("extra"));
    }

    #[test]
    fn test_bind_json_scalars() {
        let data =
            FormData::bind_json(&registry(), &json!({"name": null, "age": 42, "x": 1})).unwrap();
        assert_eq!(data.get("name"), None);
        assert_eq!(data.get("age"), Some("42"));
        assert!(!data.contains_key("x"));
    }

    #[test]
    fn test_bind_json_rejects_non_object() {
        assert!(FormData::bind_json(&registry(), &json!(["name"])).is_err());
    }
}
