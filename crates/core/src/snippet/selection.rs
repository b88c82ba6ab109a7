use super::SnippetTemplate;
use crate::{
    config::KeywordConfig,
    context::{self, ContextSubject},
    error::{Error, Result},
};
use tracing::debug;

/// How to pick a template from the configured `snippets` list
#[derive(Clone, Copy)]
pub enum SnippetSelector<'a> {
    /// Exactly this template; out of range is a configuration error
    ByIndex(usize),
    /// Last declared template whose `context` holds for the subject
    ByContext(&'a dyn ContextSubject),
    /// Last declared template, contexts ignored (e.g. a list panel query)
    Unconstrained,
}

impl std::fmt::Debug for SnippetSelector<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnippetSelector::ByIndex(index) => f.debug_tuple("ByIndex").field(index).finish(),
            SnippetSelector::ByContext(_) => f.write_str("ByContext(..)"),
            SnippetSelector::Unconstrained => f.write_str("Unconstrained"),
        }
    }
}

fn select_template<'c>(
    config: &'c KeywordConfig,
    selector: SnippetSelector<'_>,
) -> Result<Option<&'c SnippetTemplate>> {
    match selector {
        SnippetSelector::ByIndex(index) => config
            .snippets
            .get(index)
            .map(Some)
            .ok_or_else(|| Error::SnippetIndexOutOfRange {
                index,
                available: config.snippets.len(),
                keyword_type: config.keyword_type.clone(),
            }),
        SnippetSelector::ByContext(subject) => {
            for template in config.snippets.iter().rev() {
                let matches = match &template.context {
                    Some(rules) => context::check(subject, rules)?,
                    None => true,
                };
                if matches {
                    return Ok(Some(template));
                }
            }
            Ok(None)
        }
        SnippetSelector::Unconstrained => Ok(config.snippets.last()),
    }
}

/// Candidate snippets for inserting `keyword`, rendered and ready to use.
///
/// When `keyword` is a key of `aliases`, one candidate is produced per
/// alias string, each rendered from the alias text itself; otherwise the
/// selected template is rendered. `None` when no template applies.
pub fn resolve_snippets(
    config: &KeywordConfig,
    selector: SnippetSelector<'_>,
    keyword: &str,
) -> Result<Option<Vec<SnippetTemplate>>> {
    let Some(template) = select_template(config, selector)? else {
        debug!("No snippet applies for {:?}", selector);
        return Ok(None);
    };

    let snippets = match config.aliases_for(keyword) {
        Some(aliases) => aliases
            .iter()
            .map(|alias| template.rendered_with(alias, keyword))
            .collect(),
        None => vec![template.rendered_with(&template.contents, keyword)],
    };

    Ok(Some(snippets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeywordConfigLayer;
    use serde_json::{Value, json};

    struct Scope(&'static str);

    impl ContextSubject for Scope {
        fn query(&self, key: &str) -> Vec<Value> {
            match key {
                "scope" => vec![json!(self.0)],
                _ => Vec::new(),
            }
        }
    }

    fn config(extra: Value) -> KeywordConfig {
        let mut base = json!({"place": "p", "definition": "(d)"});
        if let (Some(base), Some(extra)) = (base.as_object_mut(), extra.as_object()) {
            base.extend(extra.clone());
        }
        KeywordConfig::from_layer("import", KeywordConfigLayer::from_value(base).unwrap()).unwrap()
    }

    fn contents(snippets: Option<Vec<SnippetTemplate>>) -> Vec<String> {
        snippets
            .unwrap()
            .into_iter()
            .map(|snippet| snippet.contents)
            .collect()
    }

    #[test]
    fn test_by_index() {
        let config = config(json!({"snippets": [{"contents": "a $value"}, {"contents": "b $value"}]}));
        let snippets = resolve_snippets(&config, SnippetSelector::ByIndex(0), "x").unwrap();
        assert_eq!(contents(snippets), ["a x"]);
    }

    #[test]
    fn test_index_out_of_range_is_fatal() {
        let config = config(json!({"snippets": [{"contents": "a"}]}));
        let err = resolve_snippets(&config, SnippetSelector::ByIndex(1), "x").unwrap_err();
        assert!(matches!(
            err,
            Error::SnippetIndexOutOfRange { index: 1, available: 1, .. }
        ));
    }

    #[test]
    fn test_context_scans_from_last() {
        let config = config(json!({"snippets": [
            {"contents": "generic $value"},
            {"contents": "python $value", "context": [{"key": "scope", "operand": "python"}]},
            {"contents": "ruby $value", "context": [{"key": "scope", "operand": "ruby"}]}
        ]}));

        let python = Scope("python");
        let picked = resolve_snippets(&config, SnippetSelector::ByContext(&python), "os").unwrap();
        assert_eq!(contents(picked), ["python os"]);

        let rust = Scope("rust");
        let picked = resolve_snippets(&config, SnippetSelector::ByContext(&rust), "os").unwrap();
        assert_eq!(contents(picked), ["generic os"]);

        let picked = resolve_snippets(&config, SnippetSelector::Unconstrained, "os").unwrap();
        assert_eq!(contents(picked), ["ruby os"]);
    }

    #[test]
    fn test_no_matching_context_yields_none() {
        let config = config(json!({"snippets": [
            {"contents": "python", "context": [{"key": "scope", "operand": "python"}]}
        ]}));
        let rust = Scope("rust");
        assert!(
            resolve_snippets(&config, SnippetSelector::ByContext(&rust), "os")
                .unwrap()
                .is_none()
        );

        let empty = self::config(json!({}));
        assert!(
            resolve_snippets(&empty, SnippetSelector::Unconstrained, "os")
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_aliases_produce_one_candidate_each() {
        let config = config(json!({
            "snippets": [{"contents": "import $value", "description": "import"}],
            "aliases": {"np": ["import numpy as np", "from numpy import $value"]}
        }));

        let snippets = resolve_snippets(&config, SnippetSelector::ByIndex(0), "np")
            .unwrap()
            .unwrap();
        assert_eq!(snippets.len(), 2);
        assert_eq!(snippets[0].contents, "import numpy as np");
        assert_eq!(snippets[1].contents, "from numpy import np");
        assert_eq!(snippets[0].description.as_deref(), Some("import"));
    }
}
