//! Form types and the form lifecycle: bind, validate, render.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::data::FormData;
use crate::elements::{html_escape, Element, ElementProps, Templates};
use crate::error::{FormError, Result, ValidationErrors};
use crate::fields::{FieldDefinition, FieldKind};
use crate::registry::FieldRegistry;
use crate::validation::{
    MessageCatalog, RuleInput, RuleRef, RuleSet, Validation, ValidationEngine,
};

/// Default textarea width.
pub const DEFAULT_COLS: u32 = 60;
/// Default textarea height.
pub const DEFAULT_ROWS: u32 = 10;
/// Default option key read for select values.
pub const DEFAULT_OPTION_VALUE: &str = "pk";
/// Default option key read for select labels.
pub const DEFAULT_OPTION_LABEL: &str = "name";

/// Form-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormOptions {
    /// Submit method.
    pub method: String,
    /// Submit target.
    pub action: String,
    /// Extra attributes on the form tag, in output order.
    pub attributes: IndexMap<String, String>,
    /// Message namespace overriding [`FormType::message_namespace`].
    pub error_message_file: Option<String>,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            method: "post".to_string(),
            action: String::new(),
            attributes: IndexMap::new(),
            error_message_file: None,
        }
    }
}

impl FormOptions {
    /// Sets the submit method.
    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Sets the submit target.
    #[must_use]
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    /// Sets an attribute on the form tag. Resetting one keeps its position.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Overrides the message namespace.
    #[must_use]
    pub fn error_message_file(mut self, namespace: impl Into<String>) -> Self {
        self.error_message_file = Some(namespace.into());
        self
    }
}

/// Builds the engine a form validates with.
pub type EngineFactory = for<'a> fn(
    &'a FormData,
    &'a RuleSet,
    &'a MessageCatalog,
) -> Box<dyn ValidationEngine<'a> + 'a>;

/// The default [`EngineFactory`]: a [`Validation`] over the form's rule set.
pub fn default_engine<'a>(
    data: &'a FormData,
    rule_set: &'a RuleSet,
    messages: &'a MessageCatalog,
) -> Box<dyn ValidationEngine<'a> + 'a> {
    Box::new(Validation::new(data, rule_set, messages))
}

type RuleCheck<T> = Box<dyn Fn(&T, &RuleInput<'_>) -> bool>;
type OptionSource<T> = Box<dyn Fn(&T) -> Vec<Value>>;

/// Rules and option sources a form type provides by name.
pub struct Capabilities<T> {
    rules: HashMap<String, RuleCheck<T>>,
    sources: HashMap<String, OptionSource<T>>,
}

impl<T> Default for Capabilities<T> {
    fn default() -> Self {
        Self {
            rules: HashMap::new(),
            sources: HashMap::new(),
        }
    }
}

impl<T> std::fmt::Debug for Capabilities<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities")
            .field("rules", &self.rules.keys().collect::<Vec<_>>())
            .field("sources", &self.sources.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<T> Capabilities<T> {
    /// Registers a rule bound to the form instance.
    ///
    /// A field rule with this identifier resolves here before the rule set.
    pub fn rule<F>(&mut self, name: impl Into<String>, check: F) -> &mut Self
    where
        F: Fn(&T, &RuleInput<'_>) -> bool + 'static,
    {
        self.rules.insert(name.into(), Box::new(check));
        self
    }

    /// Registers a named source of select options.
    pub fn option_source<F>(&mut self, name: impl Into<String>, source: F) -> &mut Self
    where
        F: Fn(&T) -> Vec<Value> + 'static,
    {
        self.sources.insert(name.into(), Box::new(source));
        self
    }

    /// Returns whether an instance rule is registered.
    pub fn has_rule(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Returns whether an option source is registered.
    pub fn has_option_source(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }
}

/// A concrete form: declares its fields and what it provides by name.
pub trait FormType: Sized {
    /// Registers the form's fields. Runs once, before any data is bound.
    fn init(&self, fields: &mut FieldRegistry);

    /// Form-level settings.
    fn options(&self) -> FormOptions {
        FormOptions::default()
    }

    /// Registers instance rules and option sources.
    fn capabilities(&self, _capabilities: &mut Capabilities<Self>) {}

    /// Namespace for error messages.
    ///
    /// Defaults to the type path, lowercased, with `::` turned into `/`.
    fn message_namespace(&self) -> String {
        derive_message_namespace(std::any::type_name::<Self>())
    }
}

/// Derives a message namespace from a type path: `konform::Contact` becomes
/// `konform/contact`.
pub fn derive_message_namespace(type_name: &str) -> String {
    type_name.replace("::", "/").to_lowercase()
}

/// A form instance: the field registry, the bound data and the errors of the
/// last validation.
///
/// [`Form::bind_data`] and [`Form::validate`] update the instance in place;
/// [`Form::render`] reflects whatever the last validation produced.
pub struct Form<T: FormType> {
    form_type: T,
    fields: FieldRegistry,
    options: FormOptions,
    capabilities: Capabilities<T>,
    data: FormData,
    errors: ValidationErrors,
    rule_set: RuleSet,
    messages: MessageCatalog,
    templates: Templates,
    engine: EngineFactory,
}

impl<T: FormType> std::fmt::Debug for Form<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("type", &std::any::type_name::<T>())
            .field("fields", &self.fields)
            .field("options", &self.options)
            .field("data", &self.data)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

impl<T: FormType> Form<T> {
    /// Creates a form with no data bound.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownOptionSource`] if a field names an option
    /// source the form type does not register.
    pub fn new(form_type: T) -> Result<Self> {
        let mut fields = FieldRegistry::new();
        form_type.init(&mut fields);

        let mut capabilities = Capabilities::default();
        form_type.capabilities(&mut capabilities);

        for (name, definition) in fields.iter() {
            if let Some(source) = definition.option_source.as_deref() {
                if !source.is_empty() && !capabilities.has_option_source(source) {
                    warn!(field = name, source, "option source is not registered");
                    return Err(FormError::UnknownOptionSource {
                        field: name.to_string(),
                        name: source.to_string(),
                    });
                }
            }
        }

        let options = form_type.options();
        let data = FormData::empty(&fields);
        debug!(
            form = std::any::type_name::<T>(),
            fields = fields.len(),
            "form created"
        );

        Ok(Self {
            form_type,
            fields,
            options,
            capabilities,
            data,
            errors: ValidationErrors::new(),
            rule_set: RuleSet::default(),
            messages: MessageCatalog::default(),
            templates: Templates::default(),
            engine: default_engine,
        })
    }

    /// Creates a form and binds `input` to it.
    ///
    /// # Errors
    ///
    /// See [`Form::new`].
    pub fn with_data<I, K, V>(form_type: T, input: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut form = Self::new(form_type)?;
        form.bind_data(input);
        Ok(form)
    }

    /// Replaces the rule set used for named rules.
    #[must_use]
    pub fn with_rule_set(mut self, rule_set: RuleSet) -> Self {
        self.rule_set = rule_set;
        self
    }

    /// Replaces the message catalog.
    #[must_use]
    pub fn with_messages(mut self, messages: MessageCatalog) -> Self {
        self.messages = messages;
        self
    }

    /// Replaces the element templates.
    #[must_use]
    pub fn with_templates(mut self, templates: Templates) -> Self {
        self.templates = templates;
        self
    }

    /// Replaces the validation engine.
    #[must_use]
    pub fn with_engine(mut self, engine: EngineFactory) -> Self {
        self.engine = engine;
        self
    }

    /// Returns the form type.
    pub fn form_type(&self) -> &T {
        &self.form_type
    }

    /// Returns the field registry.
    pub fn fields(&self) -> &FieldRegistry {
        &self.fields
    }

    /// Returns the form settings.
    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    /// Returns the form settings for modification.
    pub fn options_mut(&mut self) -> &mut FormOptions {
        &mut self.options
    }

    /// Returns the errors of the last validation.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Returns the bound data.
    pub fn data(&self) -> &FormData {
        &self.data
    }

    /// Binds new data, keeping only registered field names.
    pub fn bind_data<I, K, V>(&mut self, input: I) -> &FormData
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.data = FormData::bind(&self.fields, input);
        trace!(fields = self.data.len(), "data bound");
        &self.data
    }

    /// Binds a JSON object, keeping only registered field names.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Parse`] when `input` is not an object.
    pub fn bind_json(&mut self, input: &Value) -> Result<&FormData> {
        self.data = FormData::bind_json(&self.fields, input)?;
        trace!(fields = self.data.len(), "data bound");
        Ok(&self.data)
    }

    /// Resolves the namespace error messages are read from.
    pub fn message_namespace(&self) -> String {
        match self.options.error_message_file.as_deref() {
            Some(namespace) if !namespace.is_empty() => namespace.to_string(),
            _ => self.form_type.message_namespace(),
        }
    }

    /// Validates the bound data, replacing the stored errors.
    ///
    /// Returns `Ok(false)` when a rule failed; the messages are then available
    /// through [`Form::errors`].
    ///
    /// # Errors
    ///
    /// Returns an error when a rule cannot run: an empty rule list, an
    /// unknown rule name or malformed rule parameters.
    pub fn validate(&mut self) -> Result<bool> {
        let outcome = {
            let mut engine = (self.engine)(&self.data, &self.rule_set, &self.messages);
            self.register_rules(engine.as_mut())?;

            if engine.check()? {
                None
            } else {
                Some(engine.errors(&self.message_namespace()))
            }
        };

        match outcome {
            None => {
                debug!("validation passed");
                self.errors.clear();
                Ok(true)
            }
            Some(errors) => {
                debug!(failed = errors.len(), "validation failed");
                self.errors = errors;
                Ok(false)
            }
        }
    }

    fn register_rules<'a>(&'a self, engine: &mut (dyn ValidationEngine<'a> + 'a)) -> Result<()> {
        for (name, definition) in self.fields.iter() {
            engine.label(name, definition.label_or(name));
            for spec in &definition.rules {
                let rule = spec
                    .normalize()
                    .ok_or_else(|| FormError::EmptyRule(name.to_string()))?;

                let rule_ref = match self.capabilities.rules.get(&rule.id) {
                    Some(check) => {
                        let form_type = &self.form_type;
                        RuleRef::Instance {
                            name: rule.id.clone(),
                            check: Box::new(move |input: &RuleInput<'_>| check(form_type, input)),
                        }
                    }
                    None => RuleRef::Named(rule.id.clone()),
                };

                trace!(field = name, rule = %rule.id, "registering rule");
                engine.rule(name, rule_ref, &rule.params);
            }
        }
        Ok(())
    }

    /// Renders the form.
    ///
    /// # Errors
    ///
    /// Fails on a field with an unsupported type, a select field without a
    /// usable option source, or a type without a registered template. No
    /// partial markup is returned.
    pub fn render(&self) -> Result<String> {
        let mut html = format!(
            r#"<form method="{}" action="{}""#,
            html_escape(&self.options.method),
            html_escape(&self.options.action)
        );
        for (name, value) in &self.options.attributes {
            html.push_str(&format!(r#" {name}="{}""#, html_escape(value)));
        }
        html.push_str(">\n");

        for (name, definition) in self.fields.iter() {
            let element = self.element(name, definition).inspect_err(|e| {
                warn!(field = name, error = %e, "cannot render field");
            })?;
            let kind = definition.kind.as_str();
            let template = self
                .templates
                .get(kind)
                .ok_or_else(|| FormError::MissingTemplate(kind.to_string()))?;
            trace!(field = name, kind, "rendering element");
            html.push_str(&template.render(&element));
            html.push('\n');
        }

        html.push_str("</form>\n");
        Ok(html)
    }

    fn element(&self, name: &str, definition: &FieldDefinition) -> Result<Element> {
        let error = self.errors.get(name);
        let mut class = definition.class.clone().unwrap_or_default();
        if error.is_some() {
            class.push_str(" error");
        }

        let value = self.data.get(name).unwrap_or_default().to_string();

        let props = match &definition.kind {
            FieldKind::Select => {
                let source = definition
                    .option_source
                    .as_deref()
                    .filter(|s| !s.is_empty())
                    .ok_or_else(|| FormError::InvalidOptionSource {
                        field: name.to_string(),
                    })?;
                let fetch = self.capabilities.sources.get(source).ok_or_else(|| {
                    FormError::UnknownOptionSource {
                        field: name.to_string(),
                        name: source.to_string(),
                    }
                })?;
                ElementProps::Select {
                    placeholder: definition.placeholder.clone(),
                    options: fetch(&self.form_type),
                    option_value: definition
                        .option_value
                        .clone()
                        .unwrap_or_else(|| DEFAULT_OPTION_VALUE.to_string()),
                    option_label: definition
                        .option_label
                        .clone()
                        .unwrap_or_else(|| DEFAULT_OPTION_LABEL.to_string()),
                    selected: self.data.get(name).map(str::to_string),
                }
            }
            FieldKind::Text => ElementProps::Text {
                maxlength: definition.maxlength,
            },
            FieldKind::Password => ElementProps::Password {
                maxlength: definition.maxlength,
            },
            FieldKind::Textarea => ElementProps::Textarea {
                cols: definition.cols.unwrap_or(DEFAULT_COLS),
                rows: definition.rows.unwrap_or(DEFAULT_ROWS),
            },
            FieldKind::Submit => ElementProps::Submit,
            FieldKind::Other(kind) => {
                return Err(FormError::UnsupportedType {
                    field: name.to_string(),
                    kind: kind.clone(),
                })
            }
        };

        Ok(Element {
            name: name.to_string(),
            label: definition.label_or(name).to_string(),
            required: definition.required,
            value,
            class: class.trim().to_string(),
            error: error.map(str::to_string),
            props,
        })
    }
}
