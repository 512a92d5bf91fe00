//! # konform
//!
//! Declarative forms: a form type registers named fields with labels, input
//! types and validation rules; the form binds incoming data to those fields,
//! validates it rule by rule and renders HTML reflecting values and errors.
//!
//! This crate provides:
//! - An ordered field registry built by each form type
//! - Data binding that keeps only registered fields
//! - Rule-chain validation with built-in rules, instance rules and message
//!   catalogs
//! - Per-type element templates for rendering
//! - Forms declared entirely in JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use konform::{fields, Capabilities, FieldRegistry, Form, FormOptions, FormType};
//! use serde_json::json;
//!
//! struct Contact;
//!
//! impl FormType for Contact {
//!     fn init(&self, registry: &mut FieldRegistry) {
//!         registry
//!             .add_field("name", fields::text("Name").rule("not_empty").required())
//!             .add_field(
//!                 "email",
//!                 fields::text("Email").rule("not_empty").rule("email"),
//!             )
//!             .add_field("topic", fields::select("Topic", "topics"))
//!             .add_field("send", fields::submit("Send"));
//!     }
//!
//!     fn options(&self) -> FormOptions {
//!         FormOptions::default().action("/contact")
//!     }
//!
//!     fn capabilities(&self, capabilities: &mut Capabilities<Self>) {
//!         capabilities.option_source("topics", |_: &Self| {
//!             vec![json!({"pk": 1, "name": "Sales"}), json!({"pk": 2, "name": "Support"})]
//!         });
//!     }
//! }
//!
//! let mut form = Form::with_data(Contact, [("name", "Ada"), ("email", "nope")]).unwrap();
//! assert!(!form.validate().unwrap());
//! assert_eq!(form.errors().get("email"), Some("Email must be an email address"));
//!
//! let html = form.render().unwrap();
//! assert!(html.starts_with(r#"<form method="post" action="/contact">"#));
//! ```
//!
//! ## Instance rules
//!
//! A rule identifier registered through [`Capabilities::rule`] is resolved
//! against the form instance instead of the [`RuleSet`]:
//!
//! ```rust
//! use konform::{fields, Capabilities, FieldRegistry, Form, FormType, RuleInput};
//!
//! struct Invite {
//!     code: String,
//! }
//!
//! impl FormType for Invite {
//!     fn init(&self, registry: &mut FieldRegistry) {
//!         registry.add_field("code", fields::text("Invite code").rule("valid_code"));
//!     }
//!
//!     fn capabilities(&self, capabilities: &mut Capabilities<Self>) {
//!         capabilities.rule("valid_code", |form: &Self, input: &RuleInput<'_>| {
//!             input.value() == form.code
//!         });
//!     }
//! }
//!
//! let mut form = Form::with_data(Invite { code: "XYZ".into() }, [("code", "XYZ")]).unwrap();
//! assert!(form.validate().unwrap());
//! ```

mod data;
pub mod document;
pub mod elements;
mod error;
pub mod fields;
mod form;
mod registry;
pub mod validation;

pub use data::FormData;
pub use document::FormDocument;
pub use error::{FormError, Result, ValidationErrors};
pub use fields::{FieldDefinition, FieldKind, Rule, RuleSpec};
pub use form::{
    default_engine, derive_message_namespace, Capabilities, EngineFactory, Form, FormOptions,
    FormType, DEFAULT_COLS, DEFAULT_OPTION_LABEL, DEFAULT_OPTION_VALUE, DEFAULT_ROWS,
};
pub use registry::FieldRegistry;
pub use validation::{MessageCatalog, RuleInput, RuleSet, ValidationEngine};
