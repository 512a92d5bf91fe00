//! A contact form with a custom rule and a select fed by the form itself.
//!
//! Run with `cargo run --example contact`.

use konform::{
    fields, Capabilities, FieldRegistry, Form, FormOptions, FormType, MessageCatalog, RuleInput,
};
use serde_json::{json, Value};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

struct Contact {
    departments: Vec<(u32, &'static str)>,
    banned_words: Vec<&'static str>,
}

impl Contact {
    fn departments(&self) -> Vec<Value> {
        self.departments
            .iter()
            .map(|(id, name)| json!({"pk": id, "name": name}))
            .collect()
    }
}

impl FormType for Contact {
    fn init(&self, registry: &mut FieldRegistry) {
        registry
            .add_field(
                "name",
                fields::text("Your name")
                    .maxlength(80)
                    .required()
                    .rule("not_empty")
                    .rule_with("max_length", ["80"]),
            )
            .add_field(
                "email",
                fields::text("E-mail")
                    .required()
                    .rule("not_empty")
                    .rule("email"),
            )
            .add_field(
                "department",
                fields::select("Department", "departments").placeholder("Choose a department"),
            )
            .add_field(
                "message",
                fields::textarea("Message", 60, 8)
                    .class("wide")
                    .rule("not_empty")
                    .rule("polite"),
            )
            .add_field("send", fields::submit("Send message"));
    }

    fn options(&self) -> FormOptions {
        FormOptions::default()
            .action("/contact")
            .attribute("class", "contact-form")
            .attribute("novalidate", "novalidate")
    }

    fn capabilities(&self, capabilities: &mut Capabilities<Self>) {
        capabilities
            .rule("polite", |form: &Self, input: &RuleInput<'_>| {
                let text = input.value().to_lowercase();
                !form.banned_words.iter().any(|w| text.contains(w))
            })
            .option_source("departments", Self::departments);
    }
}

fn main() -> konform::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .without_time()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let contact = Contact {
        departments: vec![(1, "Sales"), (2, "Support")],
        banned_words: vec!["darn"],
    };

    let mut messages = MessageCatalog::new();
    messages.insert(
        "contact",
        "message",
        "polite",
        "Please keep your :field polite.",
    );

    let mut form = Form::with_data(
        contact,
        [
            ("name", "Ada"),
            ("email", "ada@example"),
            ("department", "2"),
            ("message", "This darn form!"),
            ("csrf", "dropped"),
        ],
    )?
    .with_messages(messages);
    form.options_mut().error_message_file = Some("contact".to_string());

    if !form.validate()? {
        info!("invalid submission:\n{}", form.errors());
    }

    println!("{}", form.render()?);
    Ok(())
}
