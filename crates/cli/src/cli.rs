use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{
    EditOptions, config_command, create_at_command, create_command, delete_command, list_command,
    places_command, update_aliases_command,
};
use crate::config::Workspace;

#[derive(Parser, Debug)]
#[command(name = "keyword")]
#[command(version, about = "Locate, create and delete configured keywords in text files", long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug                Enable debug logging\n    KEYWORD_RESOURCES=DIR[:DIR]   Extra directories holding keyword-settings.json")]
pub struct Cli {
    #[command(flatten)]
    pub sources: SourceArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where keyword settings are read from
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Directory holding keyword-settings.json files (repeatable)
    #[arg(short = 'r', long = "resources", global = true)]
    pub resources: Vec<PathBuf>,

    /// Project file to read document settings from instead of searching upwards
    #[arg(short = 'p', long = "project", global = true)]
    pub project: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the keywords of a type found in a file
    #[command(visible_alias = "ls")]
    List {
        file: PathBuf,

        /// Keyword type (a key of the settings documents)
        #[arg(short = 't', long = "type")]
        keyword_type: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the places a keyword type matches in a file
    Places {
        file: PathBuf,

        #[arg(short = 't', long = "type")]
        keyword_type: String,
    },
    /// Show the merged configuration of a keyword type and where it came from
    Config {
        file: PathBuf,

        #[arg(short = 't', long = "type")]
        keyword_type: String,
    },
    /// Add a keyword unless it is already present
    Create {
        file: PathBuf,

        #[arg(short = 't', long = "type")]
        keyword_type: String,

        /// Keyword value to insert
        value: String,

        /// Snippet contents to use instead of the configured ones
        #[arg(short, long)]
        snippet: Option<String>,

        #[command(flatten)]
        edit: EditOptions,
    },
    /// Add the keyword under a caret or selection
    CreateAt {
        /// FILE:LINE[:COL] (1-based) or FILE@OFFSET
        location: String,

        #[arg(short = 't', long = "type")]
        keyword_type: String,

        /// Selection end, as LINE[:COL] or @OFFSET in the same file
        #[arg(long)]
        to: Option<String>,

        /// 1-based snippet to use when several candidates apply
        #[arg(short, long)]
        choice: Option<usize>,

        #[command(flatten)]
        edit: EditOptions,
    },
    /// Delete a keyword, collapsing its place when configured to
    #[command(visible_alias = "rm")]
    Delete {
        file: PathBuf,

        #[arg(short = 't', long = "type")]
        keyword_type: String,

        value: String,

        #[command(flatten)]
        edit: EditOptions,
    },
    /// Harvest aliases from project files into the project settings
    UpdateAliases {
        /// File or directory inside the project
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Keyword types to harvest (repeatable)
        #[arg(short = 't', long = "type", required = true)]
        keyword_types: Vec<String>,

        /// Only scan files with these extensions (repeatable)
        #[arg(short, long = "ext")]
        extensions: Vec<String>,

        /// Print the updated project file instead of writing it
        #[arg(short, long)]
        dry_run: bool,
    },
}

impl Cli {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        let workspace = Workspace::new(&self.sources.resources, self.sources.project);

        match self.command {
            Commands::List {
                file,
                keyword_type,
                json,
            } => list_command(&workspace, &file, &keyword_type, json),
            Commands::Places { file, keyword_type } => {
                places_command(&workspace, &file, &keyword_type)
            }
            Commands::Config { file, keyword_type } => {
                config_command(&workspace, &file, &keyword_type)
            }
            Commands::Create {
                file,
                keyword_type,
                value,
                snippet,
                edit,
            } => create_command(
                &workspace,
                &file,
                &keyword_type,
                &value,
                snippet.as_deref(),
                edit,
            ),
            Commands::CreateAt {
                location,
                keyword_type,
                to,
                choice,
                edit,
            } => create_at_command(
                &workspace,
                &location,
                &keyword_type,
                to.as_deref(),
                choice,
                edit,
            ),
            Commands::Delete {
                file,
                keyword_type,
                value,
                edit,
            } => delete_command(&workspace, &file, &keyword_type, &value, edit),
            Commands::UpdateAliases {
                path,
                keyword_types,
                extensions,
                dry_run,
            } => update_aliases_command(&workspace, &path, &keyword_types, &extensions, dry_run),
        }
    }
}
