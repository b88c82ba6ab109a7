pub mod config;
pub mod create;
pub mod delete;
pub mod list;
pub mod places;
pub mod update_aliases;

pub use config::config_command;
pub use create::{create_at_command, create_command};
pub use delete::delete_command;
pub use list::list_command;
pub use places::places_command;
pub use update_aliases::update_aliases_command;

use anyhow::Result;
use clap::Args;
use keyword_core::{Document, KeywordConfig};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::Workspace;
use crate::config::workspace::absolute_path;
use crate::utils::write_back;

/// Flags shared by the commands that edit a file
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct EditOptions {
    /// Print the edited file instead of writing it
    #[arg(short, long)]
    pub dry_run: bool,
}

/// A document loaded for one keyword type
pub struct Session {
    pub path: PathBuf,
    pub document: Document,
    pub config: KeywordConfig,
    fingerprint: String,
}

impl Session {
    pub fn open(workspace: &Workspace, file: &Path, keyword_type: &str) -> Result<Self> {
        let path = absolute_path(file)?;
        let document = workspace.open_document(&path)?;
        let config = workspace.keyword_config(keyword_type, &document)?;
        debug!("Loaded \"{}\" for {}", keyword_type, path.display());

        Ok(Self {
            fingerprint: document.fingerprint(),
            path,
            document,
            config,
        })
    }

    /// Print the document on a dry run, otherwise write it back if it changed
    pub fn finish(&self, edit: EditOptions) -> Result<()> {
        if edit.dry_run {
            print!("{}", self.document.text());
            return Ok(());
        }
        if self.document.fingerprint() == self.fingerprint {
            debug!("{} unchanged", self.path.display());
            return Ok(());
        }
        write_back(&self.document, &self.path, &self.fingerprint)
    }
}
