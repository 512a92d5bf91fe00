//! Forms declared entirely in JSON.
//!
//! ```json
//! {
//!   "namespace": "konform/contact",
//!   "action": "/contact",
//!   "attributes": {"class": "contact"},
//!   "fields": {
//!     "name": {"label": "Name", "rules": ["not_empty"]},
//!     "topic": {"type": "select", "optionSource": "topics"},
//!     "send": {"type": "submit", "label": "Send"}
//!   },
//!   "sources": {"topics": [{"pk": 1, "name": "Sales"}]},
//!   "messages": {"konform/contact": {"name": {"not_empty": "Who are you?"}}}
//! }
//! ```

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::form::{Capabilities, Form, FormOptions, FormType};
use crate::registry::FieldRegistry;
use crate::validation::MessageCatalog;

/// A form type whose fields, settings, option lists and messages come from
/// a JSON document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDocument {
    /// Message namespace; derived from the type path when absent or empty.
    #[serde(default)]
    pub namespace: Option<String>,
    /// Form-level settings.
    #[serde(flatten)]
    pub options: FormOptions,
    /// Fields in declaration order.
    pub fields: FieldRegistry,
    /// Static option lists for select fields.
    #[serde(default)]
    pub sources: HashMap<String, Vec<Value>>,
    /// Error messages.
    #[serde(default)]
    pub messages: MessageCatalog,
}

impl FormDocument {
    /// Parses a document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FormError::Parse`] if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds a form from the document, using its message catalog.
    ///
    /// # Errors
    ///
    /// See [`Form::new`].
    pub fn into_form(self) -> Result<Form<Self>> {
        let messages = self.messages.clone();
        Ok(Form::new(self)?.with_messages(messages))
    }
}

impl FormType for FormDocument {
    fn init(&self, fields: &mut FieldRegistry) {
        for (name, definition) in self.fields.iter() {
            fields.add_field(name, definition.clone());
        }
    }

    fn options(&self) -> FormOptions {
        self.options.clone()
    }

    fn capabilities(&self, capabilities: &mut Capabilities<Self>) {
        for name in self.sources.keys() {
            let key = name.clone();
            capabilities.option_source(name.clone(), move |document: &Self| {
                document.sources.get(&key).cloned().unwrap_or_default()
            });
        }
    }

    fn message_namespace(&self) -> String {
        match self.namespace.as_deref() {
            Some(namespace) if !namespace.is_empty() => namespace.to_string(),
            _ => crate::form::derive_message_namespace(std::any::type_name::<Self>()),
        }
    }
}
