use anyhow::{Context, Result};
use keyword_core::{
    Document, KeywordConfig, ProjectSettings, SettingsLoader,
    config::{ConfigSource, KeywordConfigLayer},
};
use std::{
    env,
    path::{Path, PathBuf},
};
use tracing::debug;

/// Colon-separated list of extra resource directories
pub const RESOURCES_ENV: &str = "KEYWORD_RESOURCES";

/// Resource directories named by `KEYWORD_RESOURCES`
pub fn env_resource_dirs() -> Vec<PathBuf> {
    env::var_os(RESOURCES_ENV)
        .map(|value| {
            env::split_paths(&value)
                .filter(|dir| !dir.as_os_str().is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Settings sources for one invocation: resource directories plus the
/// project file that supplies per-document overrides.
pub struct Workspace {
    loader: SettingsLoader,
    project: Option<PathBuf>,
}

impl Workspace {
    /// `resources` come first, then the directories from the environment
    pub fn new(resources: &[PathBuf], project: Option<PathBuf>) -> Self {
        let mut dirs = resources.to_vec();
        dirs.extend(env_resource_dirs());
        debug!("Resource directories: {:?}", dirs);

        Self {
            loader: SettingsLoader::new().with_resource_dirs(dirs),
            project,
        }
    }

    pub fn loader(&self) -> &SettingsLoader {
        &self.loader
    }

    /// Project settings governing `path`, if any
    pub fn project_for(&self, path: &Path) -> Result<Option<ProjectSettings>> {
        let file = match &self.project {
            Some(file) => Some(file.clone()),
            None => ProjectSettings::find_project_file(path),
        };

        file.map(|file| {
            ProjectSettings::load(&file)
                .with_context(|| format!("Failed to load project file {}", file.display()))
        })
        .transpose()
    }

    /// Load a document with the settings of its project attached
    pub fn open_document(&self, path: &Path) -> Result<Document> {
        let path = absolute_path(path)?;
        if !path.exists() {
            return Err(anyhow::anyhow!("File not found: {}", path.display()));
        }

        let document = Document::load_from_file(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Ok(match self.project_for(&path)? {
            Some(project) => {
                debug!("Document settings from {}", project.path().display());
                document.with_settings(project.settings())
            }
            None => document,
        })
    }

    pub fn keyword_config(&self, keyword_type: &str, document: &Document) -> Result<KeywordConfig> {
        self.loader
            .load(keyword_type, document)
            .with_context(|| format!("Failed to load settings for \"{keyword_type}\""))
    }

    pub fn layers(
        &self,
        keyword_type: &str,
        document: &Document,
    ) -> Result<Vec<(ConfigSource, KeywordConfigLayer)>> {
        Ok(self.loader.load_layers(keyword_type, document)?)
    }
}

/// Resolve `path` against the current directory
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()?.join(path))
    }
}
