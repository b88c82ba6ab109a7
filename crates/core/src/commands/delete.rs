use super::list::{ListEntry, show_keywords};
use crate::{
    document::Document,
    engine::{Keyword, KeywordRef},
    error::Result,
    types::TextRange,
};
use tracing::debug;

/// Delete a keyword and return the refreshed list.
///
/// `None` when the keyword could not be located or no delete region was
/// found; the document is left untouched then.
pub fn delete_keyword<'k>(
    keyword: &Keyword<'_>,
    document: &mut Document,
    target: impl Into<KeywordRef<'k>>,
) -> Result<Option<Vec<ListEntry>>> {
    let Some(region) = keyword.get_delete_region(document, target)? else {
        debug!("Nothing to delete");
        return Ok(None);
    };

    erase_region(document, region)?;
    show_keywords(keyword, document).map(Some)
}

/// Erase `region`, then drop the line it sat on if only whitespace is left
fn erase_region(document: &mut Document, region: TextRange) -> Result<()> {
    if region.is_empty() {
        return Ok(());
    }

    let consumed_terminator = document.substr(region).ends_with('\n');
    document.erase(region)?;
    if consumed_terminator {
        return Ok(());
    }

    let line = document.line(region.start);
    if !document.substr(line).trim().is_empty() {
        return Ok(());
    }

    let blank = if line.end < document.len() {
        TextRange::new(line.start, line.end + 1)
    } else if line.start > 0 {
        TextRange::new(line.start - 1, line.end)
    } else {
        line
    };
    document.erase(blank)
}
