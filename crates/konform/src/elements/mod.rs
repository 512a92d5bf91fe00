//! Element templates for rendering individual fields.

mod templates;

pub use templates::{SelectElement, SubmitElement, TextInput, TextareaElement};

use std::collections::HashMap;

use serde_json::Value;

use crate::data::value_text;

/// Type-specific properties of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementProps {
    /// Single-line input.
    Text { maxlength: Option<u32> },
    /// Password input.
    Password { maxlength: Option<u32> },
    /// Multi-line input.
    Textarea { cols: u32, rows: u32 },
    /// Dropdown.
    Select {
        placeholder: Option<String>,
        options: Vec<Value>,
        option_value: String,
        option_label: String,
        selected: Option<String>,
    },
    /// Submit button.
    Submit,
}

/// Everything a template needs to render one field.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Field name.
    pub name: String,
    /// Display label.
    pub label: String,
    /// Whether the field is required.
    pub required: bool,
    /// Current value, empty when unset.
    pub value: String,
    /// CSS classes, including `error` when the field failed validation.
    pub class: String,
    /// Validation error message.
    pub error: Option<String>,
    /// Type-specific properties.
    pub props: ElementProps,
}

impl Element {
    /// Returns the DOM id of the element.
    pub fn id(&self) -> String {
        format!("id_{}", self.name)
    }
}

/// Renders a single field to an HTML fragment.
pub trait ElementTemplate: Send + Sync {
    /// Renders the element.
    fn render(&self, element: &Element) -> String;
}

/// Element templates keyed by field type name.
pub struct Templates {
    templates: HashMap<String, Box<dyn ElementTemplate>>,
}

impl std::fmt::Debug for Templates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut types: Vec<_> = self.templates.keys().collect();
        types.sort();
        f.debug_struct("Templates").field("types", &types).finish()
    }
}

impl Default for Templates {
    fn default() -> Self {
        let mut templates = Self::empty();
        templates
            .register("text", TextInput::new("text"))
            .register("password", TextInput::new("password"))
            .register("textarea", TextareaElement)
            .register("select", SelectElement)
            .register("submit", SubmitElement);
        templates
    }
}

impl Templates {
    /// Creates the default template set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set without templates.
    pub fn empty() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Registers a template for a type, replacing any existing one.
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        template: impl ElementTemplate + 'static,
    ) -> &mut Self {
        self.templates.insert(kind.into(), Box::new(template));
        self
    }

    /// Returns the template for a type.
    pub fn get(&self, kind: &str) -> Option<&dyn ElementTemplate> {
        self.templates.get(kind).map(|t| t.as_ref())
    }
}

/// Reads `key` from an option item as display text.
pub fn option_text(item: &Value, key: &str) -> String {
    item.get(key).and_then(value_text).unwrap_or_default()
}

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
