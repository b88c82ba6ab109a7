use super::StatementResolver;
use crate::{
    document::Document,
    parser::{RustParser, node_to_range, utils::enclosing_statement},
    types::TextRange,
};
use tracing::warn;

/// Statement resolver for Rust sources built on the tree-sitter grammar.
///
/// The statement is the nearest node around the range that is a direct
/// child of a statement list (file, block, impl/trait body, struct fields,
/// enum variants).
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeSitterStatementResolver;

impl TreeSitterStatementResolver {
    pub fn new() -> Self {
        Self
    }
}

impl StatementResolver for TreeSitterStatementResolver {
    fn get_statement(&self, document: &Document, range: TextRange) -> Option<TextRange> {
        let tree = match RustParser::new().and_then(|mut parser| parser.parse(document.text())) {
            Ok(tree) => tree,
            Err(e) => {
                warn!("Statement lookup skipped: {}", e);
                return None;
            }
        };

        let node = tree
            .root_node()
            .descendant_for_byte_range(range.start, range.end)?;
        enclosing_statement(node).map(|statement| node_to_range(&statement))
    }
}
