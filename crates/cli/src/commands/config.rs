use anyhow::Result;
use std::path::Path;

use crate::config::Workspace;
use crate::config::workspace::absolute_path;
use crate::display::format_config_sources;

pub fn config_command(workspace: &Workspace, file: &Path, keyword_type: &str) -> Result<()> {
    let path = absolute_path(file)?;
    let document = workspace.open_document(&path)?;

    println!("📂 Resource directories:");
    for dir in workspace.loader().resource_dirs() {
        println!("   • {}", dir.display());
    }

    let sources: Vec<_> = workspace
        .layers(keyword_type, &document)?
        .into_iter()
        .map(|(source, _)| source)
        .collect();
    println!("\n🔀 Layers for \"{keyword_type}\" (later wins):");
    print!("{}", format_config_sources(&sources));

    let config = workspace.keyword_config(keyword_type, &document)?;
    println!("\n⚙️  Merged configuration:");
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}
