//! Harvesting `(value, alias)` pairs from project files into project settings
//!
//! The update runs in two explicit phases: [`AliasUpdate::open`] locates and
//! loads the project settings (failing fast when there are none), then
//! [`AliasUpdate::run`] scans files with each keyword type's `search`
//! pattern and writes the merged aliases back.

use crate::{
    config::{KeywordConfig, ProjectSettings},
    document::Document,
    error::{Error, Result},
    matcher::{FindOptions, PatternMatcher},
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// keyword type -> alias -> values, values in first-seen order
pub type HarvestedAliases = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// Scan `files` with every config's `search` pattern.
///
/// Group 1 of a match is the value and group 2 the alias it is filed under.
/// Files that cannot be read as text are skipped. Every requested keyword
/// type gets an entry, even when nothing was found for it.
pub fn harvest_aliases<I, P>(
    configs: &[KeywordConfig],
    files: I,
    matcher: &dyn PatternMatcher,
) -> Result<HarvestedAliases>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut searches = Vec::with_capacity(configs.len());
    for config in configs {
        let search = config.search.as_deref().ok_or_else(|| {
            Error::ConfigError(format!(
                "Keyword type \"{}\" has no \"search\" pattern",
                config.keyword_type
            ))
        })?;
        searches.push((config.keyword_type.as_str(), search));
    }

    let mut harvested: HarvestedAliases = searches
        .iter()
        .map(|(keyword_type, _)| (keyword_type.to_string(), BTreeMap::new()))
        .collect();

    for file in files {
        let file = file.as_ref();
        let document = match Document::load_from_file(file) {
            Ok(document) => document,
            Err(e) => {
                warn!("Skipping {}: {}", file.display(), e);
                continue;
            }
        };

        for (keyword_type, search) in &searches {
            let aliases = harvested.entry(keyword_type.to_string()).or_default();
            for found in matcher.find(&document, 0, search, &FindOptions::default())? {
                let (Some(value), Some(alias)) = (found.group(1), found.group(2)) else {
                    continue;
                };
                let values = aliases.entry(alias.to_string()).or_default();
                if !values.iter().any(|existing| existing == value) {
                    values.push(value.to_string());
                }
            }
        }
    }

    Ok(harvested)
}

/// An alias update whose project settings have already been opened
#[derive(Debug)]
pub struct AliasUpdate {
    project: ProjectSettings,
}

impl AliasUpdate {
    /// Phase one: find the project settings governing `start_path`
    pub fn open(start_path: &Path) -> Result<Self> {
        Ok(Self {
            project: ProjectSettings::locate(start_path)?,
        })
    }

    pub fn from_project(project: ProjectSettings) -> Self {
        Self { project }
    }

    pub fn project(&self) -> &ProjectSettings {
        &self.project
    }

    /// Phase two: harvest `files`, merge into the project settings and save
    pub fn run(
        mut self,
        configs: &[KeywordConfig],
        files: &[PathBuf],
        matcher: &dyn PatternMatcher,
    ) -> Result<HarvestedAliases> {
        debug!("Harvesting aliases from {} files", files.len());
        let harvested = harvest_aliases(configs, files, matcher)?;
        self.project.merge_aliases(&harvested)?;
        self.project.save()?;
        info!("Aliases written to {}", self.project.path().display());
        Ok(harvested)
    }
}
