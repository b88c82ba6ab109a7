use crate::types::TextRange;
use tree_sitter::Node;

/// Node kinds whose direct children are individual statements or items
pub const STATEMENT_LIST_KINDS: &[&str] = &[
    "source_file",
    "block",
    "declaration_list",
    "field_declaration_list",
    "enum_variant_list",
];

pub fn node_to_range(node: &Node) -> TextRange {
    TextRange::new(node.start_byte(), node.end_byte())
}

/// Walk up from `node` to the nearest ancestor (or itself) sitting directly in a statement list
pub fn enclosing_statement<'tree>(node: Node<'tree>) -> Option<Node<'tree>> {
    let mut current = node;
    loop {
        let parent = current.parent()?;
        if STATEMENT_LIST_KINDS.contains(&parent.kind()) {
            return Some(current);
        }
        current = parent;
    }
}
