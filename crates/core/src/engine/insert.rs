use super::Keyword;
use crate::{
    document::Document,
    error::Result,
    fallback::FallbackRunner,
    matcher::{FindOptions, Match},
    snippet::{SnippetSelector, SnippetTemplate, resolve_snippets},
};
use serde::Serialize;
use tracing::{debug, info};

/// Where to insert a new keyword and the snippets that could be inserted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsertInfo {
    pub position: usize,
    pub snippets: Vec<SnippetTemplate>,
}

impl Keyword<'_> {
    /// Insertion point and candidate snippets for a new `keyword`.
    ///
    /// With existing keywords the new one goes on the line after the last
    /// one's statement. Otherwise `new_place` is searched, running
    /// `new_place_fallback` once if it is missing. `None` when there is no
    /// insertion point, no snippet applies, or a candidate is already
    /// present in one of the places.
    pub fn get_insert_info(
        &self,
        document: &mut Document,
        fallbacks: &dyn FallbackRunner,
        selector: SnippetSelector<'_>,
        keyword: &str,
    ) -> Result<Option<InsertInfo>> {
        let occurrences = self.get(document)?;

        let position = match occurrences.last() {
            None => {
                let Some(found) = self.find_new_place(document, fallbacks)? else {
                    return Ok(None);
                };
                new_place_position(&found)
            }
            Some(last) => {
                let Some(statement) = self.statements.get_statement(document, last.range) else {
                    debug!("No statement around last keyword {:?}", last.value);
                    return Ok(None);
                };
                let line = document.line(statement.start);
                (line.end + 1).min(document.len())
            }
        };

        let Some(snippets) = resolve_snippets(self.config, selector, keyword)? else {
            return Ok(None);
        };
        if self.is_definition_exist(document, &snippets)? {
            debug!("Snippet for {:?} already present", keyword);
            return Ok(None);
        }

        Ok(Some(InsertInfo { position, snippets }))
    }

    fn find_new_place(
        &self,
        document: &mut Document,
        fallbacks: &dyn FallbackRunner,
    ) -> Result<Option<Match>> {
        let Some(pattern) = &self.config.new_place else {
            debug!("No keywords and no new_place for \"{}\"", self.keyword_type());
            return Ok(None);
        };

        let options = FindOptions::default();
        let found = self.matcher.find_match(document, 0, pattern, &options)?;
        if found.is_some() {
            return Ok(found);
        }

        let Some(fallback) = &self.config.new_place_fallback else {
            return Ok(None);
        };
        info!("new_place not found, running fallback \"{}\"", fallback.command);
        fallbacks.run(document, fallback)?;
        self.matcher.find_match(document, 0, pattern, &options)
    }

    /// True when any candidate's text already appears inside a place
    fn is_definition_exist(&self, document: &Document, snippets: &[SnippetTemplate]) -> Result<bool> {
        let places = self.get_places(document)?;

        for snippet in snippets {
            let pattern = self.matcher.escape(&snippet.text());
            for place in &places {
                let found = self.matcher.find_match(
                    document,
                    place.range.start,
                    &pattern,
                    &FindOptions::within(place.range),
                )?;
                if found.is_some() {
                    return Ok(true);
                }
            }
        }

        Ok(false)
    }
}

/// Group 1 start when the `new_place` pattern captured one, else the match end
fn new_place_position(found: &Match) -> usize {
    found
        .range(1)
        .map(|group| group.start)
        .or_else(|| found.end(0))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use crate::context::EditorContext;
    use crate::document::Document;
    use crate::engine::{Keyword, test_support::config};
    use crate::error::Error;
    use crate::fallback::BuiltinFallbacks;
    use crate::matcher::RegexMatcher;
    use crate::snippet::SnippetSelector;
    use crate::statement::LineStatementResolver;
    use crate::types::TextRange;
    use serde_json::{Value, json};

    fn class_settings(extra: Value) -> Value {
        let mut settings = json!({
            "place": "class X \\{[^}]*\\}",
            "definition": "  # (\\w+)",
            "new_place": "class X \\{\\n()",
            "snippets": [{"contents": "  # $value"}]
        });
        if let (Some(settings), Some(extra)) = (settings.as_object_mut(), extra.as_object()) {
            settings.extend(extra.clone());
        }
        settings
    }

    fn insert_info(settings: Value, doc: &mut Document, value: &str) -> Option<(usize, Vec<String>)> {
        let config = config(settings);
        let matcher = RegexMatcher::new();
        let keyword = Keyword::new(&config, &matcher, &LineStatementResolver);
        let fallbacks = BuiltinFallbacks::new(&matcher);
        keyword
            .get_insert_info(doc, &fallbacks, SnippetSelector::ByIndex(0), value)
            .unwrap()
            .map(|info| {
                (
                    info.position,
                    info.snippets.into_iter().map(|s| s.contents).collect(),
                )
            })
    }

    #[test]
    fn test_appends_after_last_keyword_line() {
        let mut doc = Document::new("class X {\n  # foo\n  # bar\n}\n");
        let info = insert_info(class_settings(json!({})), &mut doc, "baz");
        // line "  # bar" ends at 25, new keyword starts the following line
        assert_eq!(info, Some((26, vec!["  # baz".to_string()])));
    }

    #[test]
    fn test_empty_container_uses_new_place() {
        // an empty body is not a place here, so there are no keywords yet
        let mut doc = Document::new("class X {\n}\n");
        let settings = class_settings(json!({"place": "class X \\{\\n[^}]+\\}"}));
        let info = insert_info(settings, &mut doc, "foo");
        assert_eq!(info, Some((10, vec!["  # foo".to_string()])));
    }

    #[test]
    fn test_new_place_without_group_inserts_after_match() {
        let mut doc = Document::new("header\nrest\n");
        let settings = json!({
            "place": "^never$",
            "definition": "(x)",
            "new_place": "^header\\n",
            "snippets": [{"contents": "x"}]
        });
        assert_eq!(insert_info(settings, &mut doc, "x").map(|i| i.0), Some(7));
    }

    #[test]
    fn test_missing_new_place_without_fallback_is_none() {
        let mut doc = Document::new("nothing here\n");
        assert_eq!(insert_info(class_settings(json!({})), &mut doc, "foo"), None);
        assert_eq!(doc.text(), "nothing here\n");
    }

    #[test]
    fn test_no_new_place_configured_is_none() {
        let mut doc = Document::new("nothing here\n");
        let settings = json!({"place": "p", "definition": "(d)", "snippets": [{"contents": "x"}]});
        assert_eq!(insert_info(settings, &mut doc, "foo"), None);
    }

    #[test]
    fn test_fallback_runs_once_then_retries() {
        let mut doc = Document::new("print()\n");
        let settings = class_settings(json!({
            "new_place_fallback": {"command": "append", "args": {"characters": "class X {\n}\n"}}
        }));

        let info = insert_info(settings, &mut doc, "foo");
        assert_eq!(doc.text(), "print()\nclass X {\n}\n");
        assert_eq!(info, Some((18, vec!["  # foo".to_string()])));
    }

    #[test]
    fn test_fallback_that_does_not_help_is_none() {
        let mut doc = Document::new("print()\n");
        let settings = class_settings(json!({
            "new_place_fallback": {"command": "append", "args": {"characters": "other\n"}}
        }));

        assert_eq!(insert_info(settings, &mut doc, "foo"), None);
        assert_eq!(doc.text(), "print()\nother\n");
    }

    #[test]
    fn test_existing_snippet_text_blocks_insert() {
        let mut doc = Document::new("class X {\n  # foo\n}\n");
        assert_eq!(insert_info(class_settings(json!({})), &mut doc, "foo"), None);
    }

    #[test]
    fn test_existing_expanded_snippet_blocks_insert() {
        // the definition pattern never sees "bar", only the snippet text does
        let mut doc = Document::new("class X {\n  # foo\n  // bar\n}\n");
        let settings = class_settings(json!({"snippets": [{"contents": "  // ${1:$value}"}]}));
        assert_eq!(insert_info(settings, &mut doc, "bar"), None);
    }

    #[test]
    fn test_aliases_give_several_candidates() {
        let mut doc = Document::new("class X {\n  # foo\n}\n");
        let settings = class_settings(json!({
            "aliases": {"np": ["  # numpy as np", "  # np from numpy"]}
        }));

        let (position, snippets) = insert_info(settings, &mut doc, "np").unwrap();
        assert_eq!(position, 18);
        assert_eq!(snippets, ["  # numpy as np", "  # np from numpy"]);
    }

    #[test]
    fn test_position_clamped_at_unterminated_end() {
        let mut doc = Document::new("class X {\n  # foo}");
        let settings = class_settings(json!({}));
        assert_eq!(insert_info(settings, &mut doc, "bar").map(|i| i.0), Some(doc.len()));
    }

    #[test]
    fn test_snippet_index_out_of_range_propagates() {
        let config = config(class_settings(json!({})));
        let matcher = RegexMatcher::new();
        let keyword = Keyword::new(&config, &matcher, &LineStatementResolver);
        let fallbacks = BuiltinFallbacks::new(&matcher);
        let mut doc = Document::new("class X {\n  # foo\n}\n");

        let err = keyword
            .get_insert_info(&mut doc, &fallbacks, SnippetSelector::ByIndex(3), "bar")
            .unwrap_err();
        assert!(matches!(err, Error::SnippetIndexOutOfRange { index: 3, .. }));
    }

    #[test]
    fn test_context_selector() {
        let settings = class_settings(json!({"snippets": [
            {"contents": "  # $value"},
            {"contents": "  #! $value", "context": [{"key": "selection_empty", "operand": false}]}
        ]}));
        let config = config(settings);
        let matcher = RegexMatcher::new();
        let keyword = Keyword::new(&config, &matcher, &LineStatementResolver);
        let fallbacks = BuiltinFallbacks::new(&matcher);
        let mut doc = Document::new("class X {\n  # foo\n}\nuse bar\n");

        let caret = EditorContext::capture(&doc, TextRange::point(24));
        let info = keyword
            .get_insert_info(&mut doc, &fallbacks, SnippetSelector::ByContext(&caret), "bar")
            .unwrap()
            .unwrap();
        assert_eq!(info.snippets[0].contents, "  # bar");

        let selected = EditorContext::capture(&doc, TextRange::new(24, 27));
        let info = keyword
            .get_insert_info(&mut doc, &fallbacks, SnippetSelector::ByContext(&selected), "bar")
            .unwrap()
            .unwrap();
        assert_eq!(info.snippets[0].contents, "  #! bar");
    }
}
