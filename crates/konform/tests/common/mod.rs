#![allow(dead_code)]

use konform::{fields, Capabilities, FieldDefinition, FieldRegistry, Form, FormType};
use serde_json::json;

/// A form whose fields are supplied at construction.
pub struct Fields(pub Vec<(&'static str, FieldDefinition)>);

impl FormType for Fields {
    fn init(&self, registry: &mut FieldRegistry) {
        for (name, definition) in &self.0 {
            registry.add_field(*name, definition.clone());
        }
    }
}

/// A form with one select field fed by `get_colors`.
pub struct Palette;

impl Palette {
    pub fn get_colors(&self) -> Vec<serde_json::Value> {
        vec![json!({"pk": 1, "name": "Red"})]
    }
}

impl FormType for Palette {
    fn init(&self, registry: &mut FieldRegistry) {
        registry.add_field("color", fields::select("Colour", "getColors"));
    }

    fn capabilities(&self, capabilities: &mut Capabilities<Self>) {
        capabilities.option_source("getColors", Self::get_colors);
    }
}

pub fn form(fields: Vec<(&'static str, FieldDefinition)>) -> Form<Fields> {
    Form::new(Fields(fields)).unwrap_or_else(|e| panic!("Failed to build form: {e}"))
}

pub fn render(form: &Form<impl FormType>) -> String {
    form.render()
        .unwrap_or_else(|e| panic!("Failed to render: {e}"))
}

/// Field names in the order their elements appear in the markup.
pub fn rendered_names(html: &str) -> Vec<String> {
    html.match_indices(" name=\"")
        .map(|(i, m)| {
            let rest = &html[i + m.len()..];
            rest[..rest.find('"').unwrap_or(0)].to_string()
        })
        .collect()
}
