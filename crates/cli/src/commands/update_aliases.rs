use anyhow::{Context, Result};
use keyword_core::{AliasUpdate, Document, HarvestedAliases, RegexMatcher, harvest_aliases};
use std::path::Path;
use tracing::info;

use crate::config::Workspace;
use crate::config::workspace::absolute_path;
use crate::utils::collect_files;

pub fn update_aliases_command(
    workspace: &Workspace,
    path: &Path,
    keyword_types: &[String],
    extensions: &[String],
    dry_run: bool,
) -> Result<()> {
    let start = absolute_path(path)?;
    let update = AliasUpdate::open(&start)
        .with_context(|| format!("No *.keyword-project file at or above {}", start.display()))?;
    let project = update.project();
    println!("📍 Project: {}", project.path().display());

    // Project settings take part in the merge just as they do for documents
    let scratch = Document::new("").with_settings(project.settings());
    let configs = keyword_types
        .iter()
        .map(|keyword_type| workspace.keyword_config(keyword_type, &scratch))
        .collect::<Result<Vec<_>>>()?;

    let files = collect_files(project.project_root(), extensions);
    info!("Scanning {} files", files.len());
    let matcher = RegexMatcher::new();

    if dry_run {
        let harvested = harvest_aliases(&configs, &files, &matcher)?;
        let mut preview = project.clone();
        preview.merge_aliases(&harvested)?;
        print_summary(&harvested);
        println!("{}", preview.to_pretty_string()?);
    } else {
        let harvested = update.run(&configs, &files, &matcher)?;
        print_summary(&harvested);
        println!("✅ Project settings updated");
    }

    Ok(())
}

fn print_summary(harvested: &HarvestedAliases) {
    for (keyword_type, aliases) in harvested {
        println!("   • {}: {} alias(es)", keyword_type, aliases.len());
    }
}
