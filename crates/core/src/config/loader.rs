//! Discovery and loading of keyword settings sources

use super::{KeywordConfig, KeywordConfigLayer};
use crate::{
    document::Document,
    error::{Error, Result},
};
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of global settings resources
pub const SETTINGS_FILE_NAME: &str = "keyword-settings.json";

/// Prefix of the per-document override key, e.g. `keyword.import`
pub const DOCUMENT_SETTINGS_PREFIX: &str = "keyword.";

/// Where a settings layer was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Resource(PathBuf),
    Document,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Resource(path) => write!(f, "{}", path.display()),
            ConfigSource::Document => write!(f, "document settings"),
        }
    }
}

/// Loads keyword settings from resource directories plus a document override
#[derive(Debug, Clone, Default)]
pub struct SettingsLoader {
    resource_dirs: Vec<PathBuf>,
}

impl SettingsLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resource_dirs.push(dir.into());
        self
    }

    pub fn with_resource_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.resource_dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    pub fn resource_dirs(&self) -> &[PathBuf] {
        &self.resource_dirs
    }

    /// All settings resources, in load order.
    ///
    /// Each resource directory contributes its own settings file first, then
    /// the settings files of its immediate subdirectories in name order.
    pub fn find_resources(&self) -> Vec<PathBuf> {
        let mut resources = Vec::new();

        for dir in &self.resource_dirs {
            let own = dir.join(SETTINGS_FILE_NAME);
            if own.is_file() {
                resources.push(own);
            }

            let Ok(entries) = std::fs::read_dir(dir) else {
                debug!("Skipping unreadable resource dir: {:?}", dir);
                continue;
            };
            let mut nested: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| path.is_dir())
                .map(|path| path.join(SETTINGS_FILE_NAME))
                .filter(|path| path.is_file())
                .collect();
            nested.sort();
            resources.extend(nested);
        }

        resources
    }

    /// Every layer that defines `keyword_type`, in merge order
    pub fn load_layers(
        &self,
        keyword_type: &str,
        document: &Document,
    ) -> Result<Vec<(ConfigSource, KeywordConfigLayer)>> {
        let mut layers = Vec::new();

        for resource in self.find_resources() {
            let mut settings = read_settings_file(&resource)?;
            if let Some(value) = settings.remove(keyword_type) {
                debug!("Found \"{}\" settings in {:?}", keyword_type, resource);
                layers.push((
                    ConfigSource::Resource(resource),
                    KeywordConfigLayer::from_value(value)?,
                ));
            }
        }

        let key = format!("{DOCUMENT_SETTINGS_PREFIX}{keyword_type}");
        if let Some(value) = document.setting(&key) {
            debug!("Applying document override {}", key);
            layers.push((
                ConfigSource::Document,
                KeywordConfigLayer::from_value(value.clone())?,
            ));
        }

        Ok(layers)
    }

    /// Merged configuration for `keyword_type`
    pub fn load(&self, keyword_type: &str, document: &Document) -> Result<KeywordConfig> {
        let layers = self.load_layers(keyword_type, document)?;
        KeywordConfig::from_layers(keyword_type, layers.into_iter().map(|(_, layer)| layer))
    }
}

/// Read a settings document: a JSON object keyed by keyword type
pub fn read_settings_file(path: &Path) -> Result<Map<String, Value>> {
    let contents = std::fs::read_to_string(path)?;
    match serde_json::from_str(&contents) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(Error::ConfigError(format!(
            "Settings in {} must be a JSON object",
            path.display()
        ))),
        Err(e) => Err(Error::ConfigError(format!(
            "Failed to parse {}: {e}",
            path.display()
        ))),
    }
}
