use anyhow::Result;
use keyword_core::{Keyword, RegexMatcher, resolver_for};
use std::path::Path;

use super::Session;
use crate::config::Workspace;
use crate::display::format_places;

pub fn places_command(workspace: &Workspace, file: &Path, keyword_type: &str) -> Result<()> {
    let session = Session::open(workspace, file, keyword_type)?;
    let matcher = RegexMatcher::new();
    let statements = resolver_for(&session.document);
    let keyword = Keyword::new(&session.config, &matcher, statements.as_ref());

    let places = keyword.get_places(&session.document)?;
    println!("🔍 {} place(s) for \"{}\" in {}", places.len(), keyword_type, session.path.display());
    print!("{}", format_places(&session.document, &places));

    Ok(())
}
