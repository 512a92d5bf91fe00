//! Validation engine.
//!
//! A form registers each of its rules against a [`ValidationEngine`], runs
//! [`ValidationEngine::check`] once, and on failure asks the engine for error
//! messages from a namespace. [`Validation`] is the default engine.

mod messages;
mod rules;

pub use messages::{builtin_message, MessageCatalog, DEFAULT_NAMESPACE};
pub use rules::{RuleFn, RuleSet};

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, trace};

use crate::data::FormData;
use crate::error::{FormError, Result, ValidationErrors};

/// Named rules that still run when the value is empty.
pub const EMPTY_RULES: &[&str] = &["not_empty", "matches"];

/// Whether a value counts as empty for validation: blank or whitespace only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// What a rule sees when it runs.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    /// Field being validated.
    pub field: &'a str,
    /// Current value of the field.
    pub value: Option<&'a str>,
    /// Rule parameters in declaration order.
    pub params: &'a [String],
    /// All bound data, for rules comparing fields.
    pub data: &'a FormData,
}

impl<'a> RuleInput<'a> {
    /// Returns the value, or an empty string when absent.
    pub fn value(&self) -> &'a str {
        self.value.unwrap_or("")
    }

    /// Returns a parameter by position.
    pub fn param(&self, index: usize) -> Option<&'a str> {
        self.params.get(index).map(String::as_str)
    }
}

/// A rule resolved for a field: either a rule set entry or a rule bound to
/// the form instance.
pub enum RuleRef<'a> {
    /// A rule looked up by name in the engine's rule set.
    Named(String),
    /// A rule provided by the form type itself.
    Instance {
        /// Identifier used for error messages.
        name: String,
        /// The bound check.
        check: Box<dyn Fn(&RuleInput<'_>) -> bool + 'a>,
    },
}

impl RuleRef<'_> {
    /// Returns the rule identifier.
    pub fn name(&self) -> &str {
        match self {
            Self::Named(name) | Self::Instance { name, .. } => name,
        }
    }
}

impl fmt::Debug for RuleRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Self::Instance { name, .. } => f
                .debug_struct("Instance")
                .field("name", name)
                .finish_non_exhaustive(),
        }
    }
}

/// Contract between a form and the engine that runs its rules.
pub trait ValidationEngine<'a> {
    /// Registers a rule with its parameters against a field.
    fn rule(&mut self, field: &str, rule: RuleRef<'a>, params: &[String]);

    /// Sets the label used for a field in error messages.
    fn label(&mut self, field: &str, label: &str);

    /// Runs every registered rule.
    ///
    /// # Errors
    ///
    /// Fails when a rule cannot run, e.g. an unknown rule name.
    fn check(&mut self) -> Result<bool>;

    /// Returns messages for the failures of the last check.
    fn errors(&self, namespace: &str) -> ValidationErrors;
}

#[derive(Debug)]
struct Failure {
    field: String,
    rule: String,
    params: Vec<String>,
}

/// Default engine.
///
/// Rules of a field run in registration order and stop at the field's first
/// failure. Named rules other than [`EMPTY_RULES`] are skipped for empty
/// values; instance rules always run.
#[derive(Debug)]
pub struct Validation<'a> {
    data: &'a FormData,
    rule_set: &'a RuleSet,
    messages: &'a MessageCatalog,
    rules: Vec<(String, Vec<(RuleRef<'a>, Vec<String>)>)>,
    labels: HashMap<String, String>,
    failures: Vec<Failure>,
}

impl<'a> Validation<'a> {
    /// Creates an engine over the given data.
    pub fn new(data: &'a FormData, rule_set: &'a RuleSet, messages: &'a MessageCatalog) -> Self {
        Self {
            data,
            rule_set,
            messages,
            rules: Vec::new(),
            labels: HashMap::new(),
            failures: Vec::new(),
        }
    }

    /// Returns the position of the field's first failing rule.
    fn first_failure(
        &self,
        field: &str,
        rules: &[(RuleRef<'a>, Vec<String>)],
    ) -> Result<Option<usize>> {
        let value = self.data.get(field);
        let empty = value.is_none_or(is_blank);

        for (index, (rule, params)) in rules.iter().enumerate() {
            let input = RuleInput {
                field,
                value,
                params,
                data: self.data,
            };
            let passed = match rule {
                RuleRef::Named(name) => {
                    if empty && !EMPTY_RULES.contains(&name.as_str()) {
                        trace!(field, rule = %name, "skipping rule for empty value");
                        continue;
                    }
                    let f = self
                        .rule_set
                        .get(name)
                        .ok_or_else(|| FormError::UnknownRule {
                            field: field.to_string(),
                            rule: name.clone(),
                        })?;
                    f(&input)?
                }
                RuleRef::Instance { check, .. } => check(&input),
            };
            if !passed {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }
}

impl<'a> ValidationEngine<'a> for Validation<'a> {
    fn rule(&mut self, field: &str, rule: RuleRef<'a>, params: &[String]) {
        let entry = (rule, params.to_vec());
        match self.rules.iter_mut().find(|(f, _)| f == field) {
            Some((_, rules)) => rules.push(entry),
            None => self.rules.push((field.to_string(), vec![entry])),
        }
    }

    fn label(&mut self, field: &str, label: &str) {
        self.labels.insert(field.to_string(), label.to_string());
    }

    fn check(&mut self) -> Result<bool> {
        let mut failures = Vec::new();
        for (field, rules) in &self.rules {
            if let Some(index) = self.first_failure(field, rules)? {
                let (rule, params) = &rules[index];
                debug!(field = %field, rule = rule.name(), "rule failed");
                failures.push(Failure {
                    field: field.clone(),
                    rule: rule.name().to_string(),
                    params: params.clone(),
                });
            }
        }
        self.failures = failures;
        Ok(self.failures.is_empty())
    }

    fn errors(&self, namespace: &str) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for failure in &self.failures {
            let label = self
                .labels
                .get(&failure.field)
                .map_or(failure.field.as_str(), String::as_str);
            let value = self.data.get(&failure.field).unwrap_or("");
            // A parameter naming another field reads as that field's label.
            let params: Vec<String> = failure
                .params
                .iter()
                .map(|p| self.labels.get(p).unwrap_or(p).clone())
                .collect();
            let message = self.messages.message(
                namespace,
                &failure.field,
                &failure.rule,
                label,
                value,
                &params,
            );
            errors.add(&failure.field, message);
        }
        errors
    }
}
