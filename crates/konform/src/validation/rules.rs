//! Built-in validation rules.

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use super::{is_blank, RuleInput};
use crate::error::{FormError, Result};

/// A globally registered rule. Returns whether the value passes.
pub type RuleFn = fn(&RuleInput<'_>) -> Result<bool>;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern")
});

static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+(?:\.[0-9]+)?$").expect("numeric pattern"));

/// Named rules available to every form.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: HashMap<String, RuleFn>,
}

impl Default for RuleSet {
    fn default() -> Self {
        let mut set = Self::empty();
        set.register("not_empty", not_empty)
            .register("min_length", min_length)
            .register("max_length", max_length)
            .register("exact_length", exact_length)
            .register("email", email)
            .register("url", url)
            .register("regex", regex)
            .register("digit", digit)
            .register("numeric", numeric)
            .register("decimal", decimal)
            .register("alpha", alpha)
            .register("alpha_numeric", alpha_numeric)
            .register("alpha_dash", alpha_dash)
            .register("range", range)
            .register("matches", matches)
            .register("equals", equals);
        set
    }
}

impl RuleSet {
    /// Creates a rule set with the built-in rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a rule set without any rules.
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Registers a rule, replacing any rule of the same name.
    pub fn register(&mut self, name: impl Into<String>, rule: RuleFn) -> &mut Self {
        self.rules.insert(name.into(), rule);
        self
    }

    /// Looks up a rule.
    pub fn get(&self, name: &str) -> Option<RuleFn> {
        self.rules.get(name).copied()
    }

    /// Returns whether a rule is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }
}

fn param<T>(input: &RuleInput<'_>, index: usize, rule: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = input.param(index).ok_or_else(|| FormError::InvalidRuleParam {
        rule: rule.to_string(),
        message: format!("missing parameter {}", index + 1),
    })?;
    raw.trim().parse().map_err(|e| FormError::InvalidRuleParam {
        rule: rule.to_string(),
        message: format!("parameter {} ({raw}): {e}", index + 1),
    })
}

fn not_empty(input: &RuleInput<'_>) -> Result<bool> {
    Ok(!is_blank(input.value()))
}

fn min_length(input: &RuleInput<'_>) -> Result<bool> {
    let min: usize = param(input, 0, "min_length")?;
    Ok(input.value().chars().count() >= min)
}

fn max_length(input: &RuleInput<'_>) -> Result<bool> {
    let max: usize = param(input, 0, "max_length")?;
    Ok(input.value().chars().count() <= max)
}

fn exact_length(input: &RuleInput<'_>) -> Result<bool> {
    let length: usize = param(input, 0, "exact_length")?;
    Ok(input.value().chars().count() == length)
}

fn email(input: &RuleInput<'_>) -> Result<bool> {
    Ok(EMAIL.is_match(input.value()))
}

fn url(input: &RuleInput<'_>) -> Result<bool> {
    let value = input.value();
    let rest = value
        .strip_prefix("http://")
        .or_else(|| value.strip_prefix("https://"));
    Ok(rest.is_some_and(|r| !r.is_empty() && !r.contains(char::is_whitespace)))
}

fn regex(input: &RuleInput<'_>) -> Result<bool> {
    let pattern: String = param(input, 0, "regex")?;
    Ok(Regex::new(&pattern)?.is_match(input.value()))
}

fn digit(input: &RuleInput<'_>) -> Result<bool> {
    let value = input.value();
    Ok(!value.is_empty() && value.chars().all(|c| c.is_ascii_digit()))
}

fn numeric(input: &RuleInput<'_>) -> Result<bool> {
    Ok(NUMERIC.is_match(input.value()))
}

fn decimal(input: &RuleInput<'_>) -> Result<bool> {
    let places: usize = if input.params.is_empty() {
        2
    } else {
        param(input, 0, "decimal")?
    };
    let digits = if input.params.len() > 1 {
        let digits: usize = param(input, 1, "decimal")?;
        format!("{{{digits}}}")
    } else {
        "+".to_string()
    };
    let pattern = format!(r"^[+-]?[0-9]{digits}\.[0-9]{{{places}}}$");
    Ok(Regex::new(&pattern)?.is_match(input.value()))
}

fn alpha(input: &RuleInput<'_>) -> Result<bool> {
    let value = input.value();
    Ok(!value.is_empty() && value.chars().all(char::is_alphabetic))
}

fn alpha_numeric(input: &RuleInput<'_>) -> Result<bool> {
    let value = input.value();
    Ok(!value.is_empty() && value.chars().all(char::is_alphanumeric))
}

fn alpha_dash(input: &RuleInput<'_>) -> Result<bool> {
    let value = input.value();
    Ok(!value.is_empty()
        && value
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_'))
}

fn range(input: &RuleInput<'_>) -> Result<bool> {
    let min: f64 = param(input, 0, "range")?;
    let max: f64 = param(input, 1, "range")?;
    Ok(input
        .value()
        .trim()
        .parse::<f64>()
        .is_ok_and(|n| n >= min && n <= max))
}

fn matches(input: &RuleInput<'_>) -> Result<bool> {
    let other: String = param(input, 0, "matches")?;
    Ok(input.value() == input.data.get(&other).unwrap_or(""))
}

fn equals(input: &RuleInput<'_>) -> Result<bool> {
    let required: String = param(input, 0, "equals")?;
    Ok(input.value() == required)
}
