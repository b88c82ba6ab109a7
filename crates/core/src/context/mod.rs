//! Context predicates guarding snippet templates
//!
//! A snippet may carry a `context` list of rules in the familiar key-binding
//! shape (`{"key": ..., "operator": ..., "operand": ...}`). Every rule must
//! hold for the snippet to be chosen.

pub mod editor;

pub use editor::EditorContext;

use crate::{
    error::{Error, Result},
    impl_case_insensitive_deserialize,
};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextOperator {
    #[default]
    Equal,
    NotEqual,
    RegexMatch,
    NotRegexMatch,
    RegexContains,
    NotRegexContains,
}

impl_case_insensitive_deserialize!(
    ContextOperator,
    Equal => "equal",
    NotEqual => "not_equal",
    RegexMatch => "regex_match",
    NotRegexMatch => "not_regex_match",
    RegexContains => "regex_contains",
    NotRegexContains => "not_regex_contains"
);

/// A single `{key, operator, operand}` rule
#[derive(Debug, Clone, PartialEq, Serialize, serde::Deserialize)]
pub struct ContextRule {
    pub key: String,
    #[serde(default)]
    pub operator: ContextOperator,
    #[serde(default = "default_operand")]
    pub operand: Value,
    /// With several values for a key, require all of them to pass
    #[serde(default)]
    pub match_all: bool,
}

fn default_operand() -> Value {
    Value::Bool(true)
}

/// Something that can answer context queries, typically an editor view
pub trait ContextSubject {
    /// Values of `key`, one per selection; empty when the key is unknown
    fn query(&self, key: &str) -> Vec<Value>;
}

/// Check that every rule holds for `subject`
pub fn check(subject: &dyn ContextSubject, rules: &[ContextRule]) -> Result<bool> {
    for rule in rules {
        if !check_rule(subject, rule)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn check_rule(subject: &dyn ContextSubject, rule: &ContextRule) -> Result<bool> {
    let values = subject.query(&rule.key);
    if values.is_empty() {
        return Ok(false);
    }

    let mut results = Vec::with_capacity(values.len());
    for value in &values {
        results.push(evaluate(rule, value)?);
    }

    Ok(if rule.match_all {
        results.iter().all(|passed| *passed)
    } else {
        results.iter().any(|passed| *passed)
    })
}

fn evaluate(rule: &ContextRule, value: &Value) -> Result<bool> {
    match rule.operator {
        ContextOperator::Equal => Ok(value == &rule.operand),
        ContextOperator::NotEqual => Ok(value != &rule.operand),
        ContextOperator::RegexMatch => regex_test(rule, value, true),
        ContextOperator::NotRegexMatch => regex_test(rule, value, true).map(|found| !found),
        ContextOperator::RegexContains => regex_test(rule, value, false),
        ContextOperator::NotRegexContains => regex_test(rule, value, false).map(|found| !found),
    }
}

fn regex_test(rule: &ContextRule, value: &Value, whole: bool) -> Result<bool> {
    let operand = rule.operand.as_str().ok_or_else(|| {
        Error::ConfigError(format!(
            "Context rule for \"{}\" needs a string operand for {:?}",
            rule.key, rule.operator
        ))
    })?;
    let pattern = if whole {
        format!("^(?:{operand})$")
    } else {
        operand.to_string()
    };
    let regex = Regex::new(&pattern).map_err(|e| Error::InvalidPattern {
        pattern: operand.to_string(),
        message: e.to_string(),
    })?;

    let text = match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    Ok(regex.is_match(&text))
}
