//! Keyword configuration: typed settings layers and where they come from
//!
//! Settings for a keyword type are assembled from every global
//! `keyword-settings.json` resource that mentions the type, followed by the
//! document's own `keyword.<type>` override. Later layers win for scalar
//! fields; `aliases` maps are unioned.

pub mod keyword_config;
pub mod loader;
pub mod merge;
pub mod project;

// Re-export main types
pub use keyword_config::{AliasEntry, DeleteMode, KeywordConfig, KeywordConfigLayer, NewPlaceFallback};
pub use loader::{ConfigSource, DOCUMENT_SETTINGS_PREFIX, SETTINGS_FILE_NAME, SettingsLoader};
pub use merge::merge_layers;
pub use project::{PROJECT_FILE_EXTENSION, ProjectSettings};
