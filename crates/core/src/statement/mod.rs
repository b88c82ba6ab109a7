//! Statement extents: "which statement encloses this point?"
//!
//! Two resolvers ship with the crate. [`LineStatementResolver`] works on any
//! text using line and bracket structure; [`TreeSitterStatementResolver`]
//! uses the Rust grammar and is picked for `.rs` documents.

pub mod line;
pub mod syntax;

pub use line::LineStatementResolver;
pub use syntax::TreeSitterStatementResolver;

use crate::{document::Document, types::TextRange};

/// Resolves statement and token boundaries in a document
pub trait StatementResolver: Send + Sync {
    /// The `[start, end)` range of the statement enclosing `range`, if any
    fn get_statement(&self, document: &Document, range: TextRange) -> Option<TextRange>;

    /// Region to erase when deleting the token at `point`
    fn get_token_delete_region(&self, document: &Document, point: usize) -> TextRange {
        token_delete_region(document, point)
    }
}

/// Pick a resolver suited to the document's language
pub fn resolver_for(document: &Document) -> Box<dyn StatementResolver> {
    let is_rust = document
        .path()
        .and_then(|path| path.extension())
        .is_some_and(|ext| ext == "rs");

    if is_rust {
        Box::new(TreeSitterStatementResolver::new())
    } else {
        Box::new(LineStatementResolver::new())
    }
}

/// A token is the run of non-whitespace around `point`.
///
/// The region also takes the horizontal whitespace after the token, or the
/// whitespace before it when the token ends its line, so that removing the
/// region leaves single spacing behind.
pub fn token_delete_region(document: &Document, point: usize) -> TextRange {
    let line = document.line(point);
    let text = document.text();
    let point = document.snap_to_chars(TextRange::point(point)).start;

    let start = text[line.start..point]
        .char_indices()
        .rev()
        .take_while(|(_, c)| !c.is_whitespace())
        .last()
        .map_or(point, |(i, _)| line.start + i);
    let end = text[point..line.end]
        .char_indices()
        .find(|(_, c)| c.is_whitespace())
        .map_or(line.end, |(i, _)| point + i);

    let trailing = text[end..line.end]
        .char_indices()
        .find(|(_, c)| !is_horizontal_space(*c))
        .map_or(line.end, |(i, _)| end + i);
    if trailing > end {
        return TextRange::new(start, trailing);
    }

    let leading = text[line.start..start]
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_horizontal_space(*c))
        .last()
        .map_or(start, |(i, _)| line.start + i);
    TextRange::new(leading, end)
}

fn is_horizontal_space(c: char) -> bool {
    c == ' ' || c == '\t'
}
