use super::{Keyword, KeywordRef};
use crate::{
    config::DeleteMode,
    document::Document,
    error::{Error, Result},
    types::TextRange,
};
use std::slice;
use tracing::debug;

impl Keyword<'_> {
    /// Region to erase in order to delete `target`.
    ///
    /// With `cleanup` configured, deleting the last keyword of a place
    /// erases the place's whole enclosing statement instead, including the
    /// line terminator when that statement is exactly one full line.
    pub fn get_delete_region<'k>(
        &self,
        document: &Document,
        target: impl Into<KeywordRef<'k>>,
    ) -> Result<Option<TextRange>> {
        let occurrence = match target.into() {
            KeywordRef::Occurrence(occurrence) => occurrence.clone(),
            KeywordRef::Value(value) => match self.find(document, value)? {
                Some(occurrence) => occurrence,
                None => return Ok(None),
            },
        };

        let mut region = match &self.config.delete {
            DeleteMode::Statement => {
                match self.statements.get_statement(document, occurrence.range) {
                    Some(statement) => statement,
                    None => return Ok(None),
                }
            }
            DeleteMode::Token => self
                .statements
                .get_token_delete_region(document, occurrence.range.start),
            DeleteMode::Unknown(mode) => return Err(Error::UnknownDeleteMode(mode.clone())),
        };

        if self.config.cleanup {
            let remaining = self.get_in(document, slice::from_ref(&occurrence.place))?;
            if remaining.len() == 1 {
                let place_point = occurrence.place.range.start;
                let Some(container) = self
                    .statements
                    .get_statement(document, TextRange::point(place_point))
                else {
                    return Ok(None);
                };

                debug!("Last keyword in place, collapsing container {}", container);
                region = container;
                if container == document.line(place_point) {
                    region = TextRange::new(container.start, (container.end + 1).min(document.len()));
                }
            }
        }

        Ok(Some(region))
    }
}

#[cfg(test)]
mod tests {
    use crate::document::Document;
    use crate::engine::{Keyword, test_support::config};
    use crate::error::Error;
    use crate::matcher::RegexMatcher;
    use crate::statement::LineStatementResolver;
    use serde_json::{Value, json};

    const DOC: &str = "\
class X {
  # foo
  # bar
}
after
";

    fn delete_text(settings: Value, source: &str, value: &str) -> Option<String> {
        let config = config(settings);
        let matcher = RegexMatcher::new();
        let keyword = Keyword::new(&config, &matcher, &LineStatementResolver);
        let doc = Document::new(source);
        keyword
            .get_delete_region(&doc, value)
            .unwrap()
            .map(|region| doc.substr(region).to_string())
    }

    fn class_settings(extra: Value) -> Value {
        let mut settings = json!({
            "place": "class X \\{[^}]*\\}",
            "definition": "  # (\\w+)",
            "delete": "statement"
        });
        if let (Some(settings), Some(extra)) = (settings.as_object_mut(), extra.as_object()) {
            settings.extend(extra.clone());
        }
        settings
    }

    #[test]
    fn test_statement_mode_deletes_the_line_statement() {
        let text = delete_text(class_settings(json!({})), DOC, "foo");
        assert_eq!(text.as_deref(), Some("# foo"));
    }

    #[test]
    fn test_statement_spanning_lines_is_deleted_whole() {
        let settings = json!({
            "place": "from x import \\([^)]*\\)",
            "definition": "^    (\\w+)",
            "delete": "statement"
        });
        let source = "from x import (\n    a,\n    b)\nprint(a)\n";
        let text = delete_text(settings, source, "b");
        assert_eq!(text.as_deref(), Some("from x import (\n    a,\n    b)"));
    }

    #[test]
    fn test_token_mode() {
        let source = "class X {\n  # foo trailing\n}\n";
        let text = delete_text(class_settings(json!({"delete": "token"})), source, "foo");
        assert_eq!(text.as_deref(), Some("foo "));
    }

    #[test]
    fn test_missing_value_is_noop() {
        assert_eq!(delete_text(class_settings(json!({})), DOC, "nope"), None);
    }

    #[test]
    fn test_unknown_mode_is_fatal() {
        let config = config(class_settings(json!({"delete": "paragraph"})));
        let matcher = RegexMatcher::new();
        let keyword = Keyword::new(&config, &matcher, &LineStatementResolver);

        let err = keyword
            .get_delete_region(&Document::new(DOC), "foo")
            .unwrap_err();
        assert!(matches!(err, Error::UnknownDeleteMode(mode) if mode == "paragraph"));
    }

    #[test]
    fn test_cleanup_keeps_container_while_others_remain() {
        let text = delete_text(class_settings(json!({"cleanup": true})), DOC, "foo");
        assert_eq!(text.as_deref(), Some("# foo"));
    }

    #[test]
    fn test_cleanup_collapses_container_of_last_keyword() {
        let source = "class X {\n  # foo\n}\nafter\n";
        let text = delete_text(class_settings(json!({"cleanup": true})), source, "foo");
        assert_eq!(text.as_deref(), Some("class X {\n  # foo\n}"));
    }

    #[test]
    fn test_cleanup_of_single_line_container_eats_terminator() {
        let settings = json!({
            "place": "^use \\{[^}]*\\};",
            "definition": "\\{(\\w+)\\}",
            "cleanup": true
        });
        let text = delete_text(settings, "use {Debug};\nfn main() {}\n", "Debug");
        assert_eq!(text.as_deref(), Some("use {Debug};\n"));
    }

    #[test]
    fn test_without_cleanup_place_is_never_touched() {
        let source = "class X {\n  # foo\n}\nafter\n";
        let config = config(class_settings(json!({})));
        let matcher = RegexMatcher::new();
        let keyword = Keyword::new(&config, &matcher, &LineStatementResolver);
        let doc = Document::new(source);

        let occurrence = keyword.find(&doc, "foo").unwrap().unwrap();
        let region = keyword.get_delete_region(&doc, &occurrence).unwrap().unwrap();
        assert!(occurrence.place.range.contains_range(&region));
        assert_ne!(region, occurrence.place.range);
    }
}
