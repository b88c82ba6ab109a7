//! keyword - Locate, insert and delete configured keywords in text documents
//!
//! This crate provides functionality to:
//! - Find "places" (regions such as an import block) and the keywords inside them
//! - Work out where a new keyword goes, creating its place through a fallback if needed
//! - Compute the region to erase when a keyword is deleted, collapsing emptied places
//! - Load layered keyword settings from resource files, documents and project files
pub mod aliases;
pub mod commands;
pub mod config;
pub mod context;
pub mod document;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod matcher;
pub mod parser;
pub mod snippet;
pub mod statement;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

pub use aliases::{AliasUpdate, HarvestedAliases, harvest_aliases};
pub use config::{KeywordConfig, ProjectSettings, SettingsLoader};
pub use context::{ContextRule, ContextSubject, EditorContext};
pub use document::Document;
pub use engine::{InsertInfo, Keyword, KeywordRef};
pub use fallback::{BuiltinFallbacks, FallbackRunner};
pub use matcher::{FindOptions, Match, PatternMatcher, RegexMatcher};
pub use snippet::{SnippetSelector, SnippetTemplate};
pub use statement::{
    LineStatementResolver, StatementResolver, TreeSitterStatementResolver, resolver_for,
};
