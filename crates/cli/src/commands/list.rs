use anyhow::Result;
use keyword_core::{Keyword, RegexMatcher, commands::show_keywords, resolver_for};
use std::path::Path;
use tracing::debug;

use super::Session;
use crate::config::Workspace;
use crate::display::format_entries;

pub fn list_command(workspace: &Workspace, file: &Path, keyword_type: &str, json: bool) -> Result<()> {
    debug!("Listing \"{}\" keywords in {}", keyword_type, file.display());

    let session = Session::open(workspace, file, keyword_type)?;
    let matcher = RegexMatcher::new();
    let statements = resolver_for(&session.document);
    let keyword = Keyword::new(&session.config, &matcher, statements.as_ref());

    let entries = show_keywords(&keyword, &session.document)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print!("{}", format_entries(&session.document, &entries));
    }

    Ok(())
}
