use crate::{
    error::{Error, Result},
    impl_case_insensitive_deserialize_or_unknown,
    snippet::SnippetTemplate,
};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Granularity used when deleting a keyword
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteMode {
    /// Remove the whole enclosing statement
    #[default]
    Statement,
    /// Remove only the token at the keyword's start
    Token,
    /// Anything else; rejected when a deletion is attempted
    Unknown(String),
}

impl_case_insensitive_deserialize_or_unknown!(
    DeleteMode,
    Unknown,
    Statement => "statement",
    Token => "token"
);

impl DeleteMode {
    pub fn as_str(&self) -> &str {
        match self {
            DeleteMode::Statement => "statement",
            DeleteMode::Token => "token",
            DeleteMode::Unknown(other) => other,
        }
    }
}

impl Serialize for DeleteMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Remedial command run when `new_place` finds nothing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPlaceFallback {
    pub command: String,
    #[serde(default)]
    pub args: Value,
}

/// One alias string or several for the same keyword value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AliasEntry {
    One(String),
    Many(Vec<String>),
}

impl AliasEntry {
    pub fn values(&self) -> &[String] {
        match self {
            AliasEntry::One(alias) => std::slice::from_ref(alias),
            AliasEntry::Many(aliases) => aliases,
        }
    }
}

/// A single, partial settings source for one keyword type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct KeywordConfigLayer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<DeleteMode>,
    /// Any non-null value turns cleanup on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanup: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_place_fallback: Option<NewPlaceFallback>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippets: Option<Vec<SnippetTemplate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aliases: Option<BTreeMap<String, AliasEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl KeywordConfigLayer {
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| Error::ConfigError(format!("Failed to parse keyword settings: {e}")))
    }
}

/// Fully merged settings for one keyword type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordConfig {
    pub keyword_type: String,
    /// Pattern locating container regions
    pub place: String,
    /// Pattern whose group 1 is the keyword value, searched inside each place
    pub definition: String,
    pub delete: DeleteMode,
    /// Collapse the container when its last keyword is deleted
    pub cleanup: bool,
    pub new_place: Option<String>,
    pub new_place_fallback: Option<NewPlaceFallback>,
    pub snippets: Vec<SnippetTemplate>,
    pub aliases: BTreeMap<String, AliasEntry>,
    /// Used by alias harvesting only
    pub search: Option<String>,
}

impl KeywordConfig {
    /// Merge `layers` in order and validate the result
    ///
    /// No layers at all means the keyword type is unknown.
    pub fn from_layers<I>(keyword_type: &str, layers: I) -> Result<Self>
    where
        I: IntoIterator<Item = KeywordConfigLayer>,
    {
        let layers: Vec<KeywordConfigLayer> = layers.into_iter().collect();
        if layers.is_empty() {
            return Err(Error::UnknownKeywordType(keyword_type.to_string()));
        }

        Self::from_layer(keyword_type, super::merge_layers(layers))
    }

    pub fn from_layer(keyword_type: &str, layer: KeywordConfigLayer) -> Result<Self> {
        let required = |value: Option<String>, field: &str| {
            value.ok_or_else(|| {
                Error::ConfigError(format!(
                    "Keyword type \"{keyword_type}\" has no \"{field}\" pattern"
                ))
            })
        };

        Ok(Self {
            keyword_type: keyword_type.to_string(),
            place: required(layer.place, "place")?,
            definition: required(layer.definition, "definition")?,
            delete: layer.delete.unwrap_or_default(),
            cleanup: layer.cleanup.is_some(),
            new_place: layer.new_place,
            new_place_fallback: layer.new_place_fallback,
            snippets: layer.snippets.unwrap_or_default(),
            aliases: layer.aliases.unwrap_or_default(),
            search: layer.search,
        })
    }

    /// Alias strings registered for `value`, if any
    pub fn aliases_for(&self, value: &str) -> Option<&[String]> {
        self.aliases.get(value).map(AliasEntry::values)
    }
}
