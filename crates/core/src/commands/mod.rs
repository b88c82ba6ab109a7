//! Command layer: the user-facing keyword operations
//!
//! Each command takes everything it works on as explicit parameters (the
//! bound [`Keyword`], the document, the selection, a chooser for multiple
//! candidates) and applies its edits to the document directly.

mod create;
mod delete;
mod list;

pub use create::{Created, SnippetChooser, create_keyword, create_keyword_at_selection, create_keyword_from_list};
pub use delete::delete_keyword;
pub use list::{EMPTY_LIST_LABEL, ListEntry, PLACE_PREVIEW_CHARS, show_keywords};
