//! Rust source parsing using tree-sitter

pub mod rust_parser;
pub mod utils;

// Re-export commonly used items
pub use rust_parser::RustParser;
pub use utils::{node_to_range, STATEMENT_LIST_KINDS};
