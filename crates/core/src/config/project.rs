//! Project settings files (`*.keyword-project`)
//!
//! A project file is a JSON object whose `settings` map is attached to every
//! document of the project, so `settings["keyword.<type>"]` acts as the
//! document-level override. Harvested aliases are written back here.

use super::loader::DOCUMENT_SETTINGS_PREFIX;
use crate::{
    aliases::HarvestedAliases,
    error::{Error, Result},
};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const PROJECT_FILE_EXTENSION: &str = "keyword-project";

#[derive(Debug, Clone)]
pub struct ProjectSettings {
    path: PathBuf,
    root: Map<String, Value>,
}

impl ProjectSettings {
    /// Find the nearest project file at or above `start_path`
    pub fn find_project_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = if start_path.is_file() {
            start_path.parent()?
        } else {
            start_path
        };

        loop {
            if let Ok(entries) = std::fs::read_dir(current) {
                let mut candidates: Vec<PathBuf> = entries
                    .filter_map(|entry| entry.ok())
                    .map(|entry| entry.path())
                    .filter(|path| {
                        path.is_file()
                            && path
                                .extension()
                                .is_some_and(|ext| ext == PROJECT_FILE_EXTENSION)
                    })
                    .collect();
                candidates.sort();
                if let Some(found) = candidates.into_iter().next() {
                    return Some(found);
                }
            }

            current = current.parent()?;
        }
    }

    /// Locate and load the project file governing `start_path`
    pub fn locate(start_path: &Path) -> Result<Self> {
        let path = Self::find_project_file(start_path).ok_or(Error::ProjectSettingsNotFound)?;
        debug!("Using project settings at {:?}", path);
        Self::load(&path)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let root = match serde_json::from_str(&contents) {
            Ok(Value::Object(root)) => root,
            Ok(_) => {
                return Err(Error::ConfigError(format!(
                    "Project file {} must be a JSON object",
                    path.display()
                )));
            }
            Err(e) => {
                return Err(Error::ConfigError(format!(
                    "Failed to parse {}: {e}",
                    path.display()
                )));
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            root,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the project file
    pub fn project_root(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// The `settings` map, empty when absent
    pub fn settings(&self) -> Map<String, Value> {
        match self.root.get("settings") {
            Some(Value::Object(settings)) => settings.clone(),
            _ => Map::new(),
        }
    }

    /// Union harvested aliases into `settings["keyword.<type>"].aliases`.
    ///
    /// The document is only replaced once every keyword type merged cleanly.
    pub fn merge_aliases(&mut self, harvested: &HarvestedAliases) -> Result<()> {
        let mut root = self.root.clone();
        let settings = object_entry(&mut root, "settings")?;

        for (keyword_type, aliases) in harvested {
            let key = format!("{DOCUMENT_SETTINGS_PREFIX}{keyword_type}");
            let keyword_settings = object_entry(settings, &key)?;
            let existing = object_entry(keyword_settings, "aliases")?;

            for (alias, values) in aliases {
                existing.insert(
                    alias.clone(),
                    Value::Array(values.iter().cloned().map(Value::String).collect()),
                );
            }
            info!("Merged {} aliases into {}", aliases.len(), key);
        }

        self.root = root;
        Ok(())
    }

    pub fn to_pretty_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }

    pub fn save(&self) -> Result<()> {
        let mut contents = self.to_pretty_string()?;
        contents.push('\n');
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

fn object_entry<'a>(map: &'a mut Map<String, Value>, key: &str) -> Result<&'a mut Map<String, Value>> {
    match map
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()))
    {
        Value::Object(object) => Ok(object),
        _ => Err(Error::ConfigError(format!(
            "Project setting \"{key}\" must be a JSON object"
        ))),
    }
}
