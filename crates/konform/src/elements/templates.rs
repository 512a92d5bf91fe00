//! Default element templates.

use ironhtml::html;
use ironhtml_elements::Div;

use super::{html_escape, option_text, Element, ElementProps, ElementTemplate};

/// Wraps a control with its label and error message.
fn field_wrapper(element: &Element, control: &str) -> String {
    let id = element.id();
    let required_marker = if element.required { " *" } else { "" };
    let label_text = format!("{}{}", element.label, required_marker);

    let label_el = html! {
        label.for_(#id) { #label_text }
    };

    let error = element.error.clone();

    html! { div.class("konform-field") }
        .raw(label_el.render())
        .raw(control)
        .when(error.is_some(), |d| {
            d.child::<Div, _>(|e| {
                e.class("konform-error")
                    .text(error.as_deref().unwrap_or(""))
            })
        })
        .render()
}

/// Common trailing attributes: class and required.
fn trailing_attrs(element: &Element) -> String {
    let mut attrs = String::new();
    if !element.class.is_empty() {
        attrs.push_str(&format!(r#" class="{}""#, html_escape(&element.class)));
    }
    if element.required {
        attrs.push_str(" required");
    }
    attrs
}

/// `<input>` for text and password fields.
#[derive(Debug, Clone)]
pub struct TextInput {
    /// The HTML input type.
    pub input_type: String,
    /// Whether the current value is written back into the markup.
    pub keep_value: bool,
}

impl TextInput {
    /// Creates an input of the given type. Password inputs never echo their value.
    pub fn new(input_type: &str) -> Self {
        Self {
            input_type: input_type.to_string(),
            keep_value: input_type != "password",
        }
    }
}

impl ElementTemplate for TextInput {
    fn render(&self, element: &Element) -> String {
        let value_attr = if self.keep_value {
            format!(r#" value="{}""#, html_escape(&element.value))
        } else {
            String::new()
        };

        let maxlength_attr = match element.props {
            ElementProps::Text {
                maxlength: Some(max),
            }
            | ElementProps::Password {
                maxlength: Some(max),
            } => format!(r#" maxlength="{max}""#),
            _ => String::new(),
        };

        let control = format!(
            r#"<input type="{}" id="{}" name="{}"{value_attr}{maxlength_attr}{}>"#,
            self.input_type,
            html_escape(&element.id()),
            html_escape(&element.name),
            trailing_attrs(element)
        );
        field_wrapper(element, &control)
    }
}

/// `<textarea>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextareaElement;

impl ElementTemplate for TextareaElement {
    fn render(&self, element: &Element) -> String {
        let (cols, rows) = match element.props {
            ElementProps::Textarea { cols, rows } => (cols, rows),
            _ => (60, 10),
        };

        let control = format!(
            r#"<textarea id="{}" name="{}" cols="{cols}" rows="{rows}"{}>{}</textarea>"#,
            html_escape(&element.id()),
            html_escape(&element.name),
            trailing_attrs(element),
            html_escape(&element.value)
        );
        field_wrapper(element, &control)
    }
}

/// `<select>` with an optional placeholder option.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectElement;

impl ElementTemplate for SelectElement {
    fn render(&self, element: &Element) -> String {
        let mut options = String::new();

        if let ElementProps::Select {
            placeholder,
            options: items,
            option_value,
            option_label,
            selected,
        } = &element.props
        {
            if let Some(placeholder) = placeholder {
                options.push_str(&format!(
                    r#"<option value="">{}</option>"#,
                    html_escape(placeholder)
                ));
            }

            for item in items {
                let value = option_text(item, option_value);
                let label = option_text(item, option_label);
                let selected_attr = if selected.as_deref() == Some(value.as_str()) {
                    " selected"
                } else {
                    ""
                };
                options.push_str(&format!(
                    r#"<option value="{}"{selected_attr}>{}</option>"#,
                    html_escape(&value),
                    html_escape(&label)
                ));
            }
        }

        let control = format!(
            r#"<select id="{}" name="{}"{}>{options}</select>"#,
            html_escape(&element.id()),
            html_escape(&element.name),
            trailing_attrs(element)
        );
        field_wrapper(element, &control)
    }
}

/// Submit button. The label is the button text unless the field has a value.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmitElement;

impl ElementTemplate for SubmitElement {
    fn render(&self, element: &Element) -> String {
        let text = if element.value.is_empty() {
            &element.label
        } else {
            &element.value
        };

        let control = format!(
            r#"<input type="submit" id="{}" name="{}" value="{}"{}>"#,
            html_escape(&element.id()),
            html_escape(&element.name),
            html_escape(text),
            trailing_attrs(element)
        );

        html! { div.class("konform-field konform-submit") }
            .raw(&control)
            .render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn element(props: ElementProps) -> Element {
        Element {
            name: "field".into(),
            label: "Field".into(),
            required: false,
            value: String::new(),
            class: String::new(),
            error: None,
            props,
        }
    }

    #[test]
    fn test_text_input() {
        let mut el = element(ElementProps::Text {
            maxlength: Some(20),
        });
        el.value = "<b>hi</b>".into();
        el.required = true;

        let html = TextInput::new("text").render(&el);
        assert!(html.contains(r#"type="text""#));
        assert!(html.contains(r#"name="field""#));
        assert!(html.contains(r#"value="&lt;b&gt;hi&lt;/b&gt;""#));
        assert!(html.contains(r#"maxlength="20""#));
        assert!(html.contains(" required"));
        assert!(html.contains("Field *"));
    }

    #[test]
    fn test_password_does_not_echo_value() {
        let mut el = element(ElementProps::Password { maxlength: None });
        el.value = "hunter2".into();

        let html = TextInput::new("password").render(&el);
        assert!(html.contains(r#"type="password""#));
        assert!(!html.contains("hunter2"));
    }

    #[test]
    fn test_error_state() {
        let mut el = element(ElementProps::Text { maxlength: None });
        el.class = "wide error".into();
        el.error = Some("Field must not be empty".into());

        let html = TextInput::new("text").render(&el);
        assert!(html.contains(r#"class="wide error""#));
        assert!(html.contains("konform-error"));
        assert!(html.contains("Field must not be empty"));
    }

    #[test]
    fn test_textarea() {
        let mut el = element(ElementProps::Textarea { cols: 40, rows: 6 });
        el.value = "Hello".into();

        let html = TextareaElement.render(&el);
        assert!(html.contains(r#"cols="40""#));
        assert!(html.contains(r#"rows="6""#));
        assert!(html.contains(">Hello</textarea>"));
    }

    #[test]
    fn test_select() {
        let el = element(ElementProps::Select {
            placeholder: Some("Choose".into()),
            options: vec![json!({"pk": 1, "name": "Red"}), json!({"pk": 2, "name": "Blue"})],
            option_value: "pk".into(),
            option_label: "name".into(),
            selected: Some("2".into()),
        });

        let html = SelectElement.render(&el);
        assert!(html.contains(r#"<option value="">Choose</option>"#));
        assert!(html.contains(r#"<option value="1">Red</option>"#));
        assert!(html.contains(r#"<option value="2" selected>Blue</option>"#));
    }

    #[test]
    fn test_submit() {
        let el = element(ElementProps::Submit);
        let html = SubmitElement.render(&el);
        assert!(html.contains(r#"type="submit""#));
        assert!(html.contains(r#"value="Field""#));
    }

    #[test]
    fn test_quoted_name_stays_inside_attributes() {
        let templates: [(&dyn ElementTemplate, ElementProps); 4] = [
            (&TextInput::new("text"), ElementProps::Text { maxlength: None }),
            (&TextareaElement, ElementProps::Textarea { cols: 10, rows: 2 }),
            (
                &SelectElement,
                ElementProps::Select {
                    placeholder: None,
                    options: Vec::new(),
                    option_value: "pk".into(),
                    option_label: "name".into(),
                    selected: None,
                },
            ),
            (&SubmitElement, ElementProps::Submit),
        ];

        for (template, props) in templates {
            let mut el = element(props);
            el.name = r#"a"onfocus="x"#.into();
            let html = template.render(&el);
            assert!(!html.contains(r#""onfocus"#), "{html}");
            assert!(html.contains(r#"id="id_a&quot;onfocus=&quot;x""#), "{html}");
        }
    }
}
