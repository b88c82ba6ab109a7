//! Snippet templates and their rendering against a keyword value

pub mod selection;

pub use selection::{SnippetSelector, resolve_snippets};

use crate::context::ContextRule;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::LazyLock;

static FIELD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\\$|\$\{\d+:([^}]*)\}|\$\{\d+\}|\$\d+").expect("snippet field pattern compiles")
});

/// A configured snippet; `contents` may use `$value` and `$word0`, `$word1`, ...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnippetTemplate {
    pub contents: String,
    /// Rules that must hold for this template to be picked by context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<ContextRule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Any other keys are carried along untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SnippetTemplate {
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
            context: None,
            description: None,
            extra: Map::new(),
        }
    }

    pub fn with_context(mut self, rules: Vec<ContextRule>) -> Self {
        self.context = Some(rules);
        self
    }

    /// Copy of this template whose contents are `contents` rendered for `value`
    pub fn rendered_with(&self, contents: &str, value: &str) -> Self {
        Self {
            contents: render(contents, value),
            ..self.clone()
        }
    }

    /// Contents ready for plain-text insertion
    pub fn text(&self) -> String {
        expand_fields(&self.contents)
    }
}

/// Substitute `$value` with `value`, then `$wordN` with its N-th whitespace-separated token
pub fn render(template: &str, value: &str) -> String {
    let mut contents = template.replace("$value", value);
    let words: Vec<&str> = value.split_whitespace().collect();
    // highest index first so `$word1` cannot eat the prefix of `$word10`
    for (index, word) in words.iter().enumerate().rev() {
        contents = contents.replace(&format!("$word{index}"), word);
    }
    contents
}

/// Flatten snippet fields: `${1:default}` keeps `default`, bare tab stops vanish, `\$` is a dollar
pub fn expand_fields(contents: &str) -> String {
    FIELD_REGEX
        .replace_all(contents, |captures: &Captures| {
            if &captures[0] == "\\$" {
                "$".to_string()
            } else {
                captures
                    .get(1)
                    .map_or_else(String::new, |default| default.as_str().to_string())
            }
        })
        .into_owned()
}
