use crate::{document::Document, engine::Keyword, error::Result, types::Occurrence};
use serde::Serialize;

/// Characters of the place shown next to each keyword
pub const PLACE_PREVIEW_CHARS: usize = 30;

pub const EMPTY_LIST_LABEL: &str = "No keywords found";

/// One row of the keyword list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListEntry {
    /// `None` only for the placeholder row of an empty list
    pub occurrence: Option<Occurrence>,
    pub label: String,
    pub detail: String,
}

/// List every keyword in document order, or a single placeholder row
pub fn show_keywords(keyword: &Keyword<'_>, document: &Document) -> Result<Vec<ListEntry>> {
    let mut entries: Vec<ListEntry> = keyword
        .get(document)?
        .into_iter()
        .map(|occurrence| ListEntry {
            label: occurrence.value.clone(),
            detail: occurrence.place_preview(PLACE_PREVIEW_CHARS),
            occurrence: Some(occurrence),
        })
        .collect();

    if entries.is_empty() {
        entries.push(ListEntry {
            occurrence: None,
            label: EMPTY_LIST_LABEL.to_string(),
            detail: String::new(),
        });
    }

    Ok(entries)
}
