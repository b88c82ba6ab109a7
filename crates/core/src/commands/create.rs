use super::list::{ListEntry, show_keywords};
use crate::{
    context::EditorContext,
    document::Document,
    engine::{InsertInfo, Keyword},
    error::Result,
    fallback::FallbackRunner,
    snippet::{SnippetSelector, SnippetTemplate},
    types::TextRange,
};
use serde::Serialize;
use tracing::debug;

/// Picks one of several candidate snippets; `None` cancels the insert
pub trait SnippetChooser {
    fn choose(&mut self, candidates: &[SnippetTemplate]) -> Option<usize>;
}

impl<F> SnippetChooser for F
where
    F: FnMut(&[SnippetTemplate]) -> Option<usize>,
{
    fn choose(&mut self, candidates: &[SnippetTemplate]) -> Option<usize> {
        self(candidates)
    }
}

/// What a create command inserted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Created {
    pub position: usize,
    /// Range of the inserted text in the edited document
    pub inserted: TextRange,
    pub snippet: SnippetTemplate,
}

/// Create `value` at its insertion point using the first snippet template.
///
/// `snippet_override` replaces the configured candidates with a single
/// template rendered for `value`.
pub fn create_keyword(
    keyword: &Keyword<'_>,
    document: &mut Document,
    fallbacks: &dyn FallbackRunner,
    value: &str,
    snippet_override: Option<&SnippetTemplate>,
) -> Result<Option<Created>> {
    let Some(info) = prepare(
        keyword,
        document,
        fallbacks,
        SnippetSelector::ByIndex(0),
        value,
        snippet_override,
    )?
    else {
        return Ok(None);
    };

    match info.snippets.first() {
        Some(snippet) => insert_snippet(document, info.position, snippet).map(Some),
        None => Ok(None),
    }
}

/// Create a keyword from the selected text, or the word under the caret.
///
/// The snippet template is chosen by the selection's context; when aliases
/// produce several candidates `chooser` decides.
pub fn create_keyword_at_selection(
    keyword: &Keyword<'_>,
    document: &mut Document,
    fallbacks: &dyn FallbackRunner,
    selection: TextRange,
    chooser: &mut dyn SnippetChooser,
) -> Result<Option<Created>> {
    let target = if selection.is_empty() {
        document.word(selection.end)
    } else {
        selection
    };
    let value = document.substr(target).to_string();
    if value.is_empty() {
        return Ok(None);
    }

    let context = EditorContext::capture(document, selection);
    let Some(info) = prepare(
        keyword,
        document,
        fallbacks,
        SnippetSelector::ByContext(&context),
        &value,
        None,
    )?
    else {
        return Ok(None);
    };

    let snippet = match info.snippets.as_slice() {
        [] => return Ok(None),
        [only] => only,
        candidates => match chooser.choose(candidates) {
            Some(index) if index < candidates.len() => &candidates[index],
            _ => {
                debug!("Snippet choice cancelled");
                return Ok(None);
            }
        },
    };

    insert_snippet(document, info.position, snippet).map(Some)
}

/// Create `query` from a keyword list's search text and refresh the list
pub fn create_keyword_from_list(
    keyword: &Keyword<'_>,
    document: &mut Document,
    fallbacks: &dyn FallbackRunner,
    query: &str,
) -> Result<Option<(Created, Vec<ListEntry>)>> {
    if query.is_empty() {
        return Ok(None);
    }

    let Some(info) = prepare(
        keyword,
        document,
        fallbacks,
        SnippetSelector::Unconstrained,
        query,
        None,
    )?
    else {
        return Ok(None);
    };
    let Some(snippet) = info.snippets.first() else {
        return Ok(None);
    };

    let created = insert_snippet(document, info.position, snippet)?;
    let entries = show_keywords(keyword, document)?;
    Ok(Some((created, entries)))
}

fn prepare(
    keyword: &Keyword<'_>,
    document: &mut Document,
    fallbacks: &dyn FallbackRunner,
    selector: SnippetSelector<'_>,
    value: &str,
    snippet_override: Option<&SnippetTemplate>,
) -> Result<Option<InsertInfo>> {
    if keyword.find(document, value)?.is_some() {
        debug!("Keyword {:?} already exists", value);
        return Ok(None);
    }

    let Some(mut info) = keyword.get_insert_info(document, fallbacks, selector, value)? else {
        return Ok(None);
    };
    if let Some(template) = snippet_override {
        info.snippets = vec![template.rendered_with(&template.contents, value)];
    }
    Ok(Some(info))
}

/// Insert the snippet text as its own line at `position`
fn insert_snippet(
    document: &mut Document,
    position: usize,
    snippet: &SnippetTemplate,
) -> Result<Created> {
    let mut text = snippet.text();
    text.push('\n');
    if position == document.len() && !document.is_empty() && !document.text().ends_with('\n') {
        text.insert(0, '\n');
    }

    document.insert(position, &text)?;
    Ok(Created {
        position,
        inserted: TextRange::new(position, position + text.len()),
        snippet: snippet.clone(),
    })
}
