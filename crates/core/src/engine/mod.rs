//! The keyword engine: locate places and occurrences, compute where a new
//! keyword goes and what a deletion should erase.
//!
//! All lookups that come up empty return `Ok(None)` (or an empty list);
//! `Err` is reserved for configuration mistakes such as a bad pattern or an
//! unknown delete mode.

mod delete;
mod insert;

pub use insert::InsertInfo;

use crate::{
    config::KeywordConfig,
    document::Document,
    error::{Error, Result},
    matcher::{FindOptions, PatternMatcher},
    statement::StatementResolver,
    types::{Occurrence, Place},
};
use tracing::debug;

/// A keyword to act on, either already located or given by value
#[derive(Debug, Clone, Copy)]
pub enum KeywordRef<'a> {
    Occurrence(&'a Occurrence),
    Value(&'a str),
}

impl<'a> From<&'a Occurrence> for KeywordRef<'a> {
    fn from(occurrence: &'a Occurrence) -> Self {
        KeywordRef::Occurrence(occurrence)
    }
}

impl<'a> From<&'a str> for KeywordRef<'a> {
    fn from(value: &'a str) -> Self {
        KeywordRef::Value(value)
    }
}

/// One keyword type bound to its configuration and search collaborators
pub struct Keyword<'a> {
    config: &'a KeywordConfig,
    matcher: &'a dyn PatternMatcher,
    statements: &'a dyn StatementResolver,
}

impl<'a> Keyword<'a> {
    pub fn new(
        config: &'a KeywordConfig,
        matcher: &'a dyn PatternMatcher,
        statements: &'a dyn StatementResolver,
    ) -> Self {
        Self {
            config,
            matcher,
            statements,
        }
    }

    pub fn keyword_type(&self) -> &str {
        &self.config.keyword_type
    }

    pub fn config(&self) -> &KeywordConfig {
        self.config
    }

    /// Every `place` match in the document, in document order
    pub fn get_places(&self, document: &Document) -> Result<Vec<Place>> {
        let places: Vec<Place> = self
            .matcher
            .find(document, 0, &self.config.place, &FindOptions::default())?
            .into_iter()
            .filter_map(|found| {
                Some(Place {
                    range: found.range(0)?,
                    value: found.group(0)?.to_string(),
                })
            })
            .collect();

        debug!("Found {} \"{}\" places", places.len(), self.keyword_type());
        Ok(places)
    }

    /// All occurrences across all places
    pub fn get(&self, document: &Document) -> Result<Vec<Occurrence>> {
        let places = self.get_places(document)?;
        self.get_in(document, &places)
    }

    /// All occurrences inside the given places
    pub fn get_in(&self, document: &Document, places: &[Place]) -> Result<Vec<Occurrence>> {
        let mut occurrences = Vec::new();
        self.scan(document, places, |occurrence| {
            occurrences.push(occurrence);
            false
        })?;
        Ok(occurrences)
    }

    /// First occurrence whose value is exactly `value`
    pub fn find(&self, document: &Document, value: &str) -> Result<Option<Occurrence>> {
        let places = self.get_places(document)?;
        self.find_in(document, &places, value)
    }

    pub fn find_in(
        &self,
        document: &Document,
        places: &[Place],
        value: &str,
    ) -> Result<Option<Occurrence>> {
        let mut found = None;
        self.scan(document, places, |occurrence| {
            if occurrence.value == value {
                found = Some(occurrence);
                return true;
            }
            false
        })?;
        Ok(found)
    }

    /// Walk `definition` matches place by place; `visit` returns true to stop
    fn scan<F>(&self, document: &Document, places: &[Place], mut visit: F) -> Result<()>
    where
        F: FnMut(Occurrence) -> bool,
    {
        for place in places {
            let matches = self.matcher.find(
                document,
                place.range.start,
                &self.config.definition,
                &FindOptions::within(place.range),
            )?;

            for found in matches {
                let (Some(range), Some(value)) = (found.range(1), found.group(1)) else {
                    if found.group_count() < 2 {
                        return Err(Error::ConfigError(format!(
                            "Definition pattern for \"{}\" must capture the keyword in group 1",
                            self.keyword_type()
                        )));
                    }
                    continue;
                };

                let occurrence = Occurrence {
                    place: place.clone(),
                    range,
                    value: value.to_string(),
                };
                if visit(occurrence) {
                    return Ok(());
                }
            }
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::config;
    use super::*;
    use crate::matcher::RegexMatcher;
    use crate::statement::LineStatementResolver;
    use crate::types::TextRange;
    use serde_json::json;

    const DOC: &str = "\
class A {
  # foo
  # bar
}

class B {
  # baz
}
";

    fn class_config() -> KeywordConfig {
        config(json!({
            "place": "class \\w+ \\{[^}]*\\}",
            "definition": "  # (\\w+)"
        }))
    }

    #[test]
    fn test_get_places_in_document_order() {
        let config = class_config();
        let matcher = RegexMatcher::new();
        let keyword = Keyword::new(&config, &matcher, &LineStatementResolver);
        let doc = Document::new(DOC);

        let places = keyword.get_places(&doc).unwrap();
        assert_eq!(places.len(), 2);
        assert!(places[0].value.starts_with("class A"));
        assert!(places[1].value.starts_with("class B"));
        assert_eq!(places[0].range, TextRange::new(0, 27));
    }

    #[test]
    fn test_occurrences_lie_inside_their_places() {
        let config = class_config();
        let matcher = RegexMatcher::new();
        let keyword = Keyword::new(&config, &matcher, &LineStatementResolver);
        let doc = Document::new(DOC);

        let occurrences = keyword.get(&doc).unwrap();
        let values: Vec<&str> = occurrences.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, ["foo", "bar", "baz"]);

        let places = keyword.get_places(&doc).unwrap();
        for occurrence in &occurrences {
            assert!(occurrence.place.range.contains_range(&occurrence.range));
            assert!(places.contains(&occurrence.place));
            assert_eq!(doc.substr(occurrence.range), occurrence.value);
        }
    }

    #[test]
    fn test_find_is_consistent_with_get() {
        let config = class_config();
        let matcher = RegexMatcher::new();
        let keyword = Keyword::new(&config, &matcher, &LineStatementResolver);
        let doc = Document::new(DOC);

        let all = keyword.get(&doc).unwrap();
        for value in ["foo", "baz", "qux", "fo"] {
            let found = keyword.find(&doc, value).unwrap();
            let expected = all.iter().find(|o| o.value == value).cloned();
            assert_eq!(found, expected, "lookup of {value}");
        }
    }

    #[test]
    fn test_get_in_restricts_to_places() {
        let config = class_config();
        let matcher = RegexMatcher::new();
        let keyword = Keyword::new(&config, &matcher, &LineStatementResolver);
        let doc = Document::new(DOC);

        let places = keyword.get_places(&doc).unwrap();
        let second = keyword.get_in(&doc, &places[1..]).unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].value, "baz");
    }

    #[test]
    fn test_definition_without_group_is_config_error() {
        let config = config(json!({"place": "class \\w+ \\{[^}]*\\}", "definition": "  # \\w+"}));
        let matcher = RegexMatcher::new();
        let keyword = Keyword::new(&config, &matcher, &LineStatementResolver);

        let err = keyword.get(&Document::new(DOC)).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_no_places_means_no_occurrences() {
        let config = class_config();
        let matcher = RegexMatcher::new();
        let keyword = Keyword::new(&config, &matcher, &LineStatementResolver);
        let doc = Document::new("nothing to see\n");

        assert!(keyword.get(&doc).unwrap().is_empty());
        assert_eq!(keyword.find(&doc, "foo").unwrap(), None);
    }
}
